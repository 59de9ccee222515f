//! Chat service records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Status;

/// A chat channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub chat_id: i64,
    pub name: String,
    pub topic: String,
    pub read_privileges: i64,
    pub write_privileges: i64,
    pub auto_join: bool,
    pub instance: bool,
    pub status: Status,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    pub created_by: i64,
}

/// A session joined to a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub session_id: Uuid,
    pub account_id: i64,
    pub chat_id: i64,
    pub username: String,
    pub privileges: i64,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub joined_at: DateTime<Utc>,
}

/// Fields to change on a chat. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_privileges: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_privileges: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_join: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

crate::model!(Chat => "chat", Member => "member", ChatUpdate => "chat_update");
