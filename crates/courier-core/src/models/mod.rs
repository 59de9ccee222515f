//! Records exchanged with the sibling services.
//!
//! Models decode from the `data` field of a service response and ignore
//! fields they do not declare. Every model converts into
//! [`Convertible`](crate::Convertible) through its field mapping.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::{EnumValue, Primitive};

// Record fields mirror the service schemas one to one.
#[allow(missing_docs)]
mod beatmaps;
#[allow(missing_docs)]
mod chats;
#[allow(missing_docs)]
mod scores;
#[allow(missing_docs)]
mod users;

pub use beatmaps::{Beatmap, Beatmapset, GameMode};
pub use chats::{Chat, ChatUpdate, Member};
pub use scores::{Grade, Score};
pub use users::{Account, Action, Presence, PresenceUpdate, QueuedPacket, Session, Spectator, Stats};

/// Raised when a service sends an enumerated value this crate does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    /// Enumeration name.
    pub kind: &'static str,
    /// Offending value.
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: impl ToString) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Lifecycle status shared by most records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Live record.
    Active,
    /// Disabled but retained.
    Deactivated,
    /// Soft-deleted.
    Deleted,
}

impl Status {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deactivated => "deactivated",
            Self::Deleted => "deleted",
        }
    }
}

impl EnumValue for Status {
    fn primitive(self) -> Primitive {
        Primitive::Str(self.as_str().to_string())
    }
}

/// Ranking state of a beatmap or beatmapset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum RankedStatus {
    /// Abandoned.
    Graveyard = -2,
    /// Still being mapped.
    WorkInProgress = -1,
    /// Submitted, awaiting nomination.
    Pending = 0,
    /// Ranked.
    Ranked = 1,
    /// Approved.
    Approved = 2,
    /// Qualified for ranking.
    Qualified = 3,
    /// Loved.
    Loved = 4,
}

impl From<RankedStatus> for i64 {
    fn from(status: RankedStatus) -> Self {
        status as Self
    }
}

impl TryFrom<i64> for RankedStatus {
    type Error = UnknownVariant;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -2 => Ok(Self::Graveyard),
            -1 => Ok(Self::WorkInProgress),
            0 => Ok(Self::Pending),
            1 => Ok(Self::Ranked),
            2 => Ok(Self::Approved),
            3 => Ok(Self::Qualified),
            4 => Ok(Self::Loved),
            other => Err(UnknownVariant::new("ranked status", other)),
        }
    }
}

impl EnumValue for RankedStatus {
    fn primitive(self) -> Primitive {
        Primitive::Int(self.into())
    }
}

crate::enum_value!(Status, RankedStatus);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{normalize, Convertible, ParamValue};
    use serde_json::json;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_value(Status::Deactivated).unwrap(), json!("deactivated"));
        let status: Status = serde_json::from_value(json!("active")).unwrap();
        assert_eq!(status, Status::Active);
    }

    #[test]
    fn test_ranked_status_wire_format() {
        assert_eq!(serde_json::to_value(RankedStatus::Graveyard).unwrap(), json!(-2));
        let status: RankedStatus = serde_json::from_value(json!(4)).unwrap();
        assert_eq!(status, RankedStatus::Loved);

        let err = serde_json::from_value::<RankedStatus>(json!(9)).unwrap_err();
        assert!(err.to_string().contains("unknown ranked status value: 9"));
    }

    #[test]
    fn test_enums_flatten_to_primitives() {
        assert_eq!(
            ParamValue::from(Status::Active).resolve(),
            Some(Primitive::Str("active".to_string()))
        );
        assert_eq!(normalize(&Convertible::from(RankedStatus::Qualified)), json!(3));
    }
}
