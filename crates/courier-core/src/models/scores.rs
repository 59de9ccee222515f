//! Scores service records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GameMode, Status};
use crate::params::{EnumValue, Primitive};

/// Letter grade of a play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Grade {
    /// Silver SS.
    Xh,
    /// SS.
    X,
    /// Silver S.
    Sh,
    /// S.
    S,
    /// A.
    A,
    /// B.
    B,
    /// C.
    C,
    /// D.
    D,
    /// Failed.
    F,
    /// No grade.
    N,
}

impl Grade {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xh => "XH",
            Self::X => "X",
            Self::Sh => "SH",
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
            Self::N => "N",
        }
    }
}

impl EnumValue for Grade {
    fn primitive(self) -> Primitive {
        Primitive::Str(self.as_str().to_string())
    }
}

crate::enum_value!(Grade);

/// A submitted play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub score_id: i64,
    pub beatmap_md5: String,
    pub account_id: i64,
    pub username: String,
    pub mode: GameMode,
    pub mods: i64,
    pub score: i64,
    pub performance: f64,
    pub accuracy: f64,
    pub max_combo: i64,
    pub count_50s: i64,
    pub count_100s: i64,
    pub count_300s: i64,
    pub count_gekis: i64,
    pub count_katus: i64,
    pub count_misses: i64,
    pub grade: Grade,
    pub passed: bool,
    pub perfect: bool,
    pub seconds_elapsed: i64,
    pub anticheat_flags: i64,
    pub client_checksum: String,
    pub status: Status,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
}

crate::model!(Score => "score");
