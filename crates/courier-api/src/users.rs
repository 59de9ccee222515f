//! Client for the users service.

use chrono::{DateTime, Utc};
use courier_core::models::{
    Account, Action, Presence, PresenceUpdate, QueuedPacket, Session, Spectator, Stats,
};
use courier_core::{mapping, Convertible, QueryParams};
use courier_http::{ServiceCall, ServiceHttpClient};
use courier_telemetry::Logging;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::resource::Resource;
use crate::urls::USERS_SERVICE_URL;

/// Initial statistics for one game mode of an account.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct NewStats {
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

/// A presence to create for a freshly logged-in session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct NewPresence {
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

courier_core::model!(NewStats => "new_stats", NewPresence => "new_presence");

/// Filters for [`UsersClient::get_all_sessions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    /// Owning account.
    pub account_id: Option<i64>,
    /// Client user agent.
    pub user_agent: Option<String>,
}

impl SessionFilter {
    fn params(&self) -> QueryParams {
        QueryParams::new()
            .with("account_id", self.account_id)
            .with("user_agent", self.user_agent.clone())
    }
}

/// Filters for [`UsersClient::get_all_presences`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceFilter {
    /// Game mode.
    pub game_mode: Option<i64>,
    /// Account.
    pub account_id: Option<i64>,
    /// Username.
    pub username: Option<String>,
    /// Country code.
    pub country_code: Option<String>,
    /// Client version.
    pub osu_version: Option<String>,
    /// UTC offset in hours.
    pub utc_offset: Option<i64>,
    /// Whether the city is shown.
    pub display_city: Option<bool>,
    /// Whether private messages are restricted to friends.
    pub pm_private: Option<bool>,
}

impl PresenceFilter {
    fn params(&self) -> QueryParams {
        QueryParams::new()
            .with("game_mode", self.game_mode)
            .with("account_id", self.account_id)
            .with("username", self.username.clone())
            .with("country_code", self.country_code.clone())
            .with("osu_version", self.osu_version.clone())
            .with("utc_offset", self.utc_offset)
            .with("display_city", self.display_city)
            .with("pm_private", self.pm_private)
    }
}

/// Client for accounts, stats, sessions, presences, queued packets and
/// spectators.
#[derive(Debug, Clone)]
pub struct UsersClient {
    resource: Resource,
}

impl UsersClient {
    /// Creates a client for the default service URL.
    pub fn new(http: ServiceHttpClient, logging: &Logging) -> Self {
        Self::with_base_url(http, logging, USERS_SERVICE_URL)
    }

    /// Creates a client for a custom service URL.
    pub fn with_base_url(http: ServiceHttpClient, logging: &Logging, base_url: &str) -> Self {
        Self {
            resource: Resource::new(http, base_url, logging.logger("users")),
        }
    }

    /// Returns the service URL.
    pub fn base_url(&self) -> &str {
        self.resource.base_url()
    }

    // accounts

    /// Registers an account. `password_md5` is the client-side MD5 of the
    /// password.
    pub async fn sign_up(
        &self,
        username: &str,
        password_md5: &str,
        email_address: &str,
        country: &str,
    ) -> ApiResult<Option<Account>> {
        let call = ServiceCall::post(self.resource.url("/v1/accounts")).json(mapping! {
            "username" => username,
            "password" => password_md5,
            "email_address" => email_address,
            "country" => country,
        });
        self.resource.fetch(call, "Failed to sign up").await
    }

    /// Lists all accounts.
    pub async fn get_accounts(&self) -> ApiResult<Option<Vec<Account>>> {
        let call = ServiceCall::get(self.resource.url("/v1/accounts"));
        self.resource.fetch(call, "Failed to get accounts").await
    }

    /// Fetches one account.
    pub async fn get_account(&self, account_id: i64) -> ApiResult<Option<Account>> {
        let call = ServiceCall::get(self.resource.url(format_args!("/v1/accounts/{account_id}")));
        self.resource.fetch(call, "Failed to get account").await
    }

    /// Changes the fields present in `update`.
    ///
    /// Only the keys in `update` are sent. Include a key mapped to
    /// [`Convertible::Null`] to clear it.
    pub async fn partial_update_account(
        &self,
        account_id: i64,
        update: impl Into<Convertible>,
    ) -> ApiResult<Option<Account>> {
        let call = ServiceCall::patch(self.resource.url(format_args!("/v1/accounts/{account_id}")))
            .json(update);
        self.resource.fetch(call, "Failed to update account").await
    }

    /// Deletes an account, returning its final state.
    pub async fn delete_account(&self, account_id: i64) -> ApiResult<Option<Account>> {
        let call =
            ServiceCall::delete(self.resource.url(format_args!("/v1/accounts/{account_id}")));
        self.resource.fetch(call, "Failed to delete account").await
    }

    // stats

    /// Creates statistics for one game mode of an account.
    pub async fn create_stats(&self, account_id: i64, stats: &NewStats) -> ApiResult<Option<Stats>> {
        let call =
            ServiceCall::post(self.resource.url(format_args!("/v1/accounts/{account_id}/stats")))
                .json(stats);
        self.resource.fetch(call, "Failed to create stats").await
    }

    /// Fetches the statistics of one game mode.
    pub async fn get_stats(&self, account_id: i64, game_mode: i64) -> ApiResult<Option<Stats>> {
        let call = ServiceCall::get(
            self.resource
                .url(format_args!("/v1/accounts/{account_id}/stats/{game_mode}")),
        );
        self.resource.fetch(call, "Failed to get stats").await
    }

    /// Lists the statistics of every game mode.
    pub async fn get_all_account_stats(&self, account_id: i64) -> ApiResult<Option<Vec<Stats>>> {
        let call =
            ServiceCall::get(self.resource.url(format_args!("/v1/accounts/{account_id}/stats")));
        self.resource.fetch(call, "Failed to get all account stats").await
    }

    /// Changes the fields present in `update`.
    ///
    /// Only the keys in `update` are sent. Include a key mapped to
    /// [`Convertible::Null`] to clear it.
    pub async fn partial_update_stats(
        &self,
        account_id: i64,
        game_mode: i64,
        update: impl Into<Convertible>,
    ) -> ApiResult<Option<Stats>> {
        let call = ServiceCall::patch(
            self.resource
                .url(format_args!("/v1/accounts/{account_id}/stats/{game_mode}")),
        )
        .json(update);
        self.resource.fetch(call, "Failed to update stats").await
    }

    /// Deletes the statistics of one game mode, returning their final state.
    pub async fn delete_stats(&self, account_id: i64, game_mode: i64) -> ApiResult<Option<Stats>> {
        let call = ServiceCall::delete(
            self.resource
                .url(format_args!("/v1/accounts/{account_id}/stats/{game_mode}")),
        );
        self.resource.fetch(call, "Failed to delete stats").await
    }

    // sessions

    /// Opens a session. `identifier` is a username or email address.
    pub async fn log_in(
        &self,
        identifier: &str,
        passphrase: &str,
        user_agent: &str,
    ) -> ApiResult<Option<Session>> {
        let call = ServiceCall::post(self.resource.url("/v1/sessions")).json(mapping! {
            "identifier" => identifier,
            "passphrase" => passphrase,
            "user_agent" => user_agent,
        });
        self.resource.fetch(call, "Failed to log in").await
    }

    /// Closes a session, returning its final state.
    pub async fn log_out(&self, session_id: Uuid) -> ApiResult<Option<Session>> {
        let call = ServiceCall::delete(self.resource.url(format_args!("/v1/sessions/{session_id}")));
        self.resource.fetch(call, "Failed to log out").await
    }

    /// Fetches one session.
    pub async fn get_session(&self, session_id: Uuid) -> ApiResult<Option<Session>> {
        let call = ServiceCall::get(self.resource.url(format_args!("/v1/sessions/{session_id}")));
        self.resource.fetch(call, "Failed to get session").await
    }

    /// Lists sessions matching `filter`.
    pub async fn get_all_sessions(&self, filter: &SessionFilter) -> ApiResult<Option<Vec<Session>>> {
        let call = ServiceCall::get(self.resource.url("/v1/sessions")).params(filter.params());
        self.resource.fetch(call, "Failed to get all sessions").await
    }

    /// Sets or clears the expiry of a session.
    ///
    /// `None` is sent as an explicit `null`.
    pub async fn partial_update_session(
        &self,
        session_id: Uuid,
        expires_at: Option<DateTime<Utc>>,
    ) -> ApiResult<Option<Session>> {
        let call = ServiceCall::patch(self.resource.url(format_args!("/v1/sessions/{session_id}")))
            .json(mapping! { "expires_at" => expires_at });
        self.resource.fetch(call, "Failed to update session").await
    }

    // presences

    /// Creates the presence of a session.
    pub async fn create_presence(&self, presence: &NewPresence) -> ApiResult<Option<Presence>> {
        let call = ServiceCall::post(self.resource.url("/v1/presences")).json(presence);
        self.resource.fetch(call, "Failed to create presence").await
    }

    /// Fetches the presence of a session.
    pub async fn get_presence(&self, session_id: Uuid) -> ApiResult<Option<Presence>> {
        let call = ServiceCall::get(self.resource.url(format_args!("/v1/presences/{session_id}")));
        self.resource.fetch(call, "Failed to get presence").await
    }

    /// Lists presences matching `filter`.
    pub async fn get_all_presences(
        &self,
        filter: &PresenceFilter,
    ) -> ApiResult<Option<Vec<Presence>>> {
        let call = ServiceCall::get(self.resource.url("/v1/presences")).params(filter.params());
        self.resource.fetch(call, "Failed to get all presences").await
    }

    /// Changes the fields set in `update`.
    ///
    /// Unset fields are omitted from the body, so a field cannot be cleared
    /// to `null` through this call.
    pub async fn partial_update_presence(
        &self,
        session_id: Uuid,
        update: &PresenceUpdate,
    ) -> ApiResult<Option<Presence>> {
        let call =
            ServiceCall::patch(self.resource.url(format_args!("/v1/presences/{session_id}")))
                .json(update);
        self.resource.fetch(call, "Failed to update presence").await
    }

    /// Deletes the presence of a session, returning its final state.
    pub async fn delete_presence(&self, session_id: Uuid) -> ApiResult<Option<Presence>> {
        let call =
            ServiceCall::delete(self.resource.url(format_args!("/v1/presences/{session_id}")));
        self.resource.fetch(call, "Failed to delete presence").await
    }

    // queued packets

    /// Queues raw packet bytes for delivery to a session.
    pub async fn enqueue_packet(&self, session_id: Uuid, data: &[u8]) -> ApiResult<bool> {
        let call = ServiceCall::post(
            self.resource
                .url(format_args!("/v1/sessions/{session_id}/queued-packets")),
        )
        .json(mapping! { "data" => data.to_vec() });
        self.resource.succeeded(call, "Failed to enqueue packet").await
    }

    /// Takes every packet queued for a session.
    pub async fn dequeue_all_packets(&self, session_id: Uuid) -> ApiResult<Option<Vec<QueuedPacket>>> {
        let call = ServiceCall::get(
            self.resource
                .url(format_args!("/v1/sessions/{session_id}/queued-packets")),
        );
        self.resource.fetch(call, "Failed to dequeue all packets").await
    }

    // spectators

    /// Starts `session_id` spectating `host_session_id`.
    pub async fn create_spectator(
        &self,
        host_session_id: Uuid,
        session_id: Uuid,
        account_id: i64,
    ) -> ApiResult<Option<Spectator>> {
        let call = ServiceCall::post(
            self.resource
                .url(format_args!("/v1/sessions/{host_session_id}/spectators")),
        )
        .json(mapping! {
            "session_id" => session_id,
            "account_id" => account_id,
        });
        self.resource.fetch(call, "Failed to create spectator").await
    }

    /// Stops `session_id` spectating `host_session_id`.
    pub async fn delete_spectator(
        &self,
        host_session_id: Uuid,
        session_id: Uuid,
    ) -> ApiResult<Option<Spectator>> {
        let call = ServiceCall::delete(self.resource.url(format_args!(
            "/v1/sessions/{host_session_id}/spectators/{session_id}"
        )));
        self.resource.fetch(call, "Failed to delete spectator").await
    }

    /// Lists the spectators of a host session.
    pub async fn get_spectators(&self, host_session_id: Uuid) -> ApiResult<Option<Vec<Spectator>>> {
        let call = ServiceCall::get(
            self.resource
                .url(format_args!("/v1/sessions/{host_session_id}/spectators")),
        );
        self.resource.fetch(call, "Failed to get spectators").await
    }

    /// Returns the session being spectated by `spectator_session_id`.
    pub async fn get_spectator_host(&self, spectator_session_id: Uuid) -> ApiResult<Option<Uuid>> {
        let call = ServiceCall::get(
            self.resource
                .url(format_args!("/v1/sessions/{spectator_session_id}/spectating")),
        );
        self.resource.fetch(call, "Failed to get spectator host").await
    }
}
