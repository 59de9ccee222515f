//! Users service records: accounts, stats, sessions, presences,
//! queued packets and spectators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Status, UnknownVariant};
use crate::params::{EnumValue, Primitive};

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: i64,
    pub username: String,
    /// Generated by the service from `username`.
    pub safe_username: String,
    pub email_address: String,
    pub country: String,
    pub status: Status,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
}

/// Per-mode statistics of an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub account_id: i64,
    pub game_mode: i64,
    pub total_score: i64,
    pub ranked_score: i64,
    pub performance: i64,
    pub play_count: i64,
    pub play_time: i64,
    pub accuracy: f64,
    pub max_combo: i64,
    pub total_hits: i64,
    pub replay_views: i64,
    pub xh_count: i64,
    pub x_count: i64,
    pub sh_count: i64,
    pub s_count: i64,
    pub a_count: i64,
}

/// A logged-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: Uuid,
    pub account_id: i64,
    pub user_agent: String,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub expires_at: DateTime<Utc>,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
}

/// What a player is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Action {
    Idle = 0,
    Afk = 1,
    Playing = 2,
    Editing = 3,
    Modding = 4,
    Multiplayer = 5,
    Watching = 6,
    Unknown = 7,
    Testing = 8,
    Submitting = 9,
    Paused = 10,
    Lobby = 11,
    Multiplaying = 12,
    OsuDirect = 13,
}

impl From<Action> for i64 {
    fn from(action: Action) -> Self {
        action as Self
    }
}

impl TryFrom<i64> for Action {
    type Error = UnknownVariant;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Idle,
            1 => Self::Afk,
            2 => Self::Playing,
            3 => Self::Editing,
            4 => Self::Modding,
            5 => Self::Multiplayer,
            6 => Self::Watching,
            7 => Self::Unknown,
            8 => Self::Testing,
            9 => Self::Submitting,
            10 => Self::Paused,
            11 => Self::Lobby,
            12 => Self::Multiplaying,
            13 => Self::OsuDirect,
            other => return Err(UnknownVariant::new("action", other)),
        })
    }
}

impl EnumValue for Action {
    fn primitive(self) -> Primitive {
        Primitive::Int(self.into())
    }
}

crate::enum_value!(Action);

/// Online presence of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presence {
    pub session_id: Uuid,
    pub game_mode: i64,
    pub account_id: i64,
    pub username: String,
    pub country_code: i64,
    pub privileges: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub action: Action,
    pub info_text: String,
    pub map_md5: String,
    pub map_id: i64,
    pub mods: i64,
    pub osu_version: String,
    pub utc_offset: i64,
    pub display_city: bool,
    pub pm_private: bool,
}

/// Fields to change on a presence. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresenceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_mode: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privileges: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_md5: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mods: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osu_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_city: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm_private: Option<bool>,
}

/// A packet waiting to be delivered to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedPacket {
    pub data: Vec<u8>,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

/// A session spectating another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spectator {
    pub session_id: Uuid,
    pub account_id: i64,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

crate::model!(
    Account => "account",
    Stats => "stats",
    Session => "session",
    Presence => "presence",
    PresenceUpdate => "presence_update",
    QueuedPacket => "queued_packet",
    Spectator => "spectator",
);
