//! Client for the scores service.

use courier_core::models::{GameMode, Grade, Score, Status};
use courier_core::QueryParams;
use courier_http::{ServiceCall, ServiceHttpClient};
use courier_telemetry::Logging;
use serde::Serialize;

use crate::error::ApiResult;
use crate::resource::Resource;
use crate::urls::SCORES_SERVICE_URL;
use crate::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// A play to submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct NewScore {
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
}

courier_core::model!(NewScore => "new_score");

/// Filters for [`ScoresClient::get_scores`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreFilter {
    /// MD5 of the beatmap played.
    pub beatmap_md5: Option<String>,
    /// Player account.
    pub account_id: Option<i64>,
    /// Game mode.
    pub mode: Option<GameMode>,
    /// Mod bitmask.
    pub mods: Option<i64>,
    /// Whether the play passed.
    pub passed: Option<bool>,
    /// Whether the play was a full combo.
    pub perfect: Option<bool>,
    /// Record status.
    pub status: Option<Status>,
    /// 1-based page number.
    pub page: i64,
    /// Records per page.
    pub page_size: i64,
}

impl Default for ScoreFilter {
    fn default() -> Self {
        Self {
            beatmap_md5: None,
            account_id: None,
            mode: None,
            mods: None,
            passed: None,
            perfect: None,
            status: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ScoreFilter {
    fn params(&self) -> QueryParams {
        QueryParams::new()
            .with("beatmap_md5", self.beatmap_md5.clone())
            .with("account_id", self.account_id)
            .with("mode", self.mode)
            .with("mods", self.mods)
            .with("passed", self.passed)
            .with("perfect", self.perfect)
            .with("status", self.status)
            .with("page", self.page)
            .with("page_size", self.page_size)
    }
}

/// Client for `/v1/scores`.
#[derive(Debug, Clone)]
pub struct ScoresClient {
    resource: Resource,
}

impl ScoresClient {
    /// Creates a client for the default service URL.
    pub fn new(http: ServiceHttpClient, logging: &Logging) -> Self {
        Self::with_base_url(http, logging, SCORES_SERVICE_URL)
    }

    /// Creates a client for a custom service URL.
    pub fn with_base_url(http: ServiceHttpClient, logging: &Logging, base_url: &str) -> Self {
        Self {
            resource: Resource::new(http, base_url, logging.logger("scores")),
        }
    }

    /// Returns the service URL.
    pub fn base_url(&self) -> &str {
        self.resource.base_url()
    }

    /// Submits a play.
    pub async fn submit_score(&self, score: &NewScore) -> ApiResult<Option<Score>> {
        let call = ServiceCall::post(self.resource.url("/v1/scores")).json(score);
        self.resource.fetch(call, "Failed to submit score").await
    }

    /// Fetches one score.
    pub async fn get_score(&self, score_id: i64) -> ApiResult<Option<Score>> {
        let call = ServiceCall::get(self.resource.url(format_args!("/v1/scores/{score_id}")));
        self.resource.fetch(call, "Failed to get score").await
    }

    /// Lists scores matching `filter`.
    pub async fn get_scores(&self, filter: &ScoreFilter) -> ApiResult<Option<Vec<Score>>> {
        let call = ServiceCall::get(self.resource.url("/v1/scores")).params(filter.params());
        self.resource.fetch(call, "Failed to get scores").await
    }

    /// Deletes a score, returning its final state.
    pub async fn delete_score(&self, score_id: i64) -> ApiResult<Option<Score>> {
        let call = ServiceCall::delete(self.resource.url(format_args!("/v1/scores/{score_id}")));
        self.resource.fetch(call, "Failed to delete score").await
    }
}
