//! Client for the chat service.

use courier_core::models::{Chat, ChatUpdate, Member, Status};
use courier_core::{mapping, QueryParams};
use courier_http::{ServiceCall, ServiceHttpClient};
use courier_telemetry::Logging;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::resource::Resource;
use crate::urls::CHAT_SERVICE_URL;

/// A chat to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewChat {
    /// Channel name, e.g. `#osu`.
    pub name: String,
    /// Channel topic.
    pub topic: String,
    /// Privileges required to read.
    pub read_privileges: i64,
    /// Privileges required to write.
    pub write_privileges: i64,
    /// Joined automatically on login.
    pub auto_join: bool,
    /// Creating account.
    pub created_by: i64,
}

courier_core::model!(NewChat => "new_chat");

/// Filters for [`ChatsClient::get_chats`].
///
/// Only active chats are listed unless `status` is changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatFilter {
    /// Channel name.
    pub name: Option<String>,
    /// Channel topic.
    pub topic: Option<String>,
    /// Read privileges.
    pub read_privileges: Option<i64>,
    /// Write privileges.
    pub write_privileges: Option<i64>,
    /// Auto-join flag.
    pub auto_join: Option<bool>,
    /// Instanced (per-match) chats.
    pub instance: Option<bool>,
    /// Record status.
    pub status: Option<Status>,
    /// Creating account.
    pub created_by: Option<i64>,
}

impl Default for ChatFilter {
    fn default() -> Self {
        Self {
            name: None,
            topic: None,
            read_privileges: None,
            write_privileges: None,
            auto_join: None,
            instance: None,
            status: Some(Status::Active),
            created_by: None,
        }
    }
}

impl ChatFilter {
    fn params(&self) -> QueryParams {
        QueryParams::new()
            .with("name", self.name.clone())
            .with("topic", self.topic.clone())
            .with("read_privileges", self.read_privileges)
            .with("write_privileges", self.write_privileges)
            .with("auto_join", self.auto_join)
            .with("instance", self.instance)
            .with("status", self.status)
            .with("created_by", self.created_by)
    }
}

/// Client for `/v1/chats` and chat membership.
#[derive(Debug, Clone)]
pub struct ChatsClient {
    resource: Resource,
}

impl ChatsClient {
    /// Creates a client for the default service URL.
    pub fn new(http: ServiceHttpClient, logging: &Logging) -> Self {
        Self::with_base_url(http, logging, CHAT_SERVICE_URL)
    }

    /// Creates a client for a custom service URL.
    pub fn with_base_url(http: ServiceHttpClient, logging: &Logging, base_url: &str) -> Self {
        Self {
            resource: Resource::new(http, base_url, logging.logger("chats")),
        }
    }

    /// Returns the service URL.
    pub fn base_url(&self) -> &str {
        self.resource.base_url()
    }

    // chats

    /// Creates a chat.
    pub async fn create_chat(&self, chat: &NewChat) -> ApiResult<Option<Chat>> {
        let call = ServiceCall::post(self.resource.url("/v1/chats")).json(chat);
        self.resource.fetch(call, "Failed to create chat").await
    }

    /// Fetches one chat.
    pub async fn get_chat(&self, chat_id: i64) -> ApiResult<Option<Chat>> {
        let call = ServiceCall::get(self.resource.url(format_args!("/v1/chats/{chat_id}")));
        self.resource.fetch(call, "Failed to get chat").await
    }

    /// Lists chats matching `filter`.
    pub async fn get_chats(&self, filter: &ChatFilter) -> ApiResult<Option<Vec<Chat>>> {
        let call = ServiceCall::get(self.resource.url("/v1/chats")).params(filter.params());
        self.resource.fetch(call, "Failed to get chats").await
    }

    /// Changes the fields set in `update`.
    ///
    /// Unset fields are omitted from the body, so a field cannot be cleared
    /// to `null` through this call.
    pub async fn partial_update_chat(
        &self,
        chat_id: i64,
        update: &ChatUpdate,
    ) -> ApiResult<Option<Chat>> {
        let call =
            ServiceCall::patch(self.resource.url(format_args!("/v1/chats/{chat_id}"))).json(update);
        self.resource.fetch(call, "Failed to update chat").await
    }

    /// Deletes a chat, returning its final state.
    pub async fn delete_chat(&self, chat_id: i64) -> ApiResult<Option<Chat>> {
        let call = ServiceCall::delete(self.resource.url(format_args!("/v1/chats/{chat_id}")));
        self.resource.fetch(call, "Failed to delete chat").await
    }

    // members

    /// Adds a session to a chat.
    pub async fn join_chat(
        &self,
        chat_id: i64,
        session_id: Uuid,
        account_id: i64,
        username: &str,
        privileges: i64,
    ) -> ApiResult<Option<Member>> {
        let call = ServiceCall::post(self.resource.url(format_args!("/v1/chats/{chat_id}/members")))
            .json(mapping! {
                "session_id" => session_id,
                "account_id" => account_id,
                "username" => username,
                "privileges" => privileges,
            });
        self.resource.fetch(call, "Failed to join chat").await
    }

    /// Removes a session from a chat.
    pub async fn leave_chat(&self, chat_id: i64, session_id: Uuid) -> ApiResult<Option<Member>> {
        let call = ServiceCall::delete(
            self.resource
                .url(format_args!("/v1/chats/{chat_id}/members/{session_id}")),
        );
        self.resource.fetch(call, "Failed to leave chat").await
    }

    /// Lists the members of a chat.
    pub async fn get_members(&self, chat_id: i64) -> ApiResult<Option<Vec<Member>>> {
        let call = ServiceCall::get(self.resource.url(format_args!("/v1/chats/{chat_id}/members")));
        self.resource.fetch(call, "Failed to get chat members").await
    }
}
