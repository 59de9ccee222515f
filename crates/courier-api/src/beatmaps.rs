//! Client for the beatmaps service.

use courier_core::models::{Beatmap, Beatmapset, GameMode, RankedStatus, Status};
use courier_core::QueryParams;
use courier_http::{ServiceCall, ServiceHttpClient};
use courier_telemetry::Logging;

use crate::error::ApiResult;
use crate::resource::Resource;
use crate::urls::BEATMAPS_SERVICE_URL;
use crate::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Filters for [`BeatmapsClient::get_beatmaps`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeatmapFilter {
    /// Beatmapset the beatmaps belong to.
    pub set_id: Option<i64>,
    /// MD5 of the beatmap file.
    pub md5_hash: Option<String>,
    /// Game mode.
    pub mode: Option<GameMode>,
    /// Ranked status.
    pub ranked_status: Option<RankedStatus>,
    /// Record status.
    pub status: Option<Status>,
    /// 1-based page number.
    pub page: i64,
    /// Records per page.
    pub page_size: i64,
}

impl Default for BeatmapFilter {
    fn default() -> Self {
        Self {
            set_id: None,
            md5_hash: None,
            mode: None,
            ranked_status: None,
            status: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl BeatmapFilter {
    fn params(&self) -> QueryParams {
        QueryParams::new()
            .with("set_id", self.set_id)
            .with("md5_hash", self.md5_hash.clone())
            .with("mode", self.mode)
            .with("ranked_status", self.ranked_status)
            .with("status", self.status)
            .with("page", self.page)
            .with("page_size", self.page_size)
    }
}

/// Filters for [`BeatmapsClient::get_beatmapsets`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeatmapsetFilter {
    /// Beatmapset id.
    pub set_id: Option<i64>,
    /// Song artist.
    pub artist: Option<String>,
    /// Mapper name.
    pub creator: Option<String>,
    /// Song title.
    pub title: Option<String>,
    /// Explicit content flag.
    pub nsfw: Option<bool>,
    /// Ranked status.
    pub ranked_status: Option<RankedStatus>,
    /// Record status.
    pub status: Option<Status>,
    /// 1-based page number.
    pub page: i64,
    /// Records per page.
    pub page_size: i64,
}

impl Default for BeatmapsetFilter {
    fn default() -> Self {
        Self {
            set_id: None,
            artist: None,
            creator: None,
            title: None,
            nsfw: None,
            ranked_status: None,
            status: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl BeatmapsetFilter {
    fn params(&self) -> QueryParams {
        QueryParams::new()
            .with("set_id", self.set_id)
            .with("artist", self.artist.clone())
            .with("creator", self.creator.clone())
            .with("title", self.title.clone())
            .with("nsfw", self.nsfw)
            .with("ranked_status", self.ranked_status)
            .with("status", self.status)
            .with("page", self.page)
            .with("page_size", self.page_size)
    }
}

/// Client for `/v1/beatmaps` and `/v1/beatmapsets`.
#[derive(Debug, Clone)]
pub struct BeatmapsClient {
    resource: Resource,
}

impl BeatmapsClient {
    /// Creates a client for the default service URL.
    pub fn new(http: ServiceHttpClient, logging: &Logging) -> Self {
        Self::with_base_url(http, logging, BEATMAPS_SERVICE_URL)
    }

    /// Creates a client for a custom service URL.
    pub fn with_base_url(http: ServiceHttpClient, logging: &Logging, base_url: &str) -> Self {
        Self {
            resource: Resource::new(http, base_url, logging.logger("beatmaps")),
        }
    }

    /// Returns the service URL.
    pub fn base_url(&self) -> &str {
        self.resource.base_url()
    }

    /// Fetches one beatmap.
    pub async fn get_beatmap(&self, beatmap_id: i64) -> ApiResult<Option<Beatmap>> {
        let call = ServiceCall::get(self.resource.url(format_args!("/v1/beatmaps/{beatmap_id}")));
        self.resource.fetch(call, "Failed to get beatmap").await
    }

    /// Lists beatmaps matching `filter`.
    pub async fn get_beatmaps(&self, filter: &BeatmapFilter) -> ApiResult<Option<Vec<Beatmap>>> {
        let call = ServiceCall::get(self.resource.url("/v1/beatmaps")).params(filter.params());
        self.resource.fetch(call, "Failed to get beatmaps").await
    }

    /// Fetches one beatmapset.
    pub async fn get_beatmapset(&self, set_id: i64) -> ApiResult<Option<Beatmapset>> {
        let call = ServiceCall::get(self.resource.url(format_args!("/v1/beatmapsets/{set_id}")));
        self.resource.fetch(call, "Failed to get beatmapset").await
    }

    /// Lists beatmapsets matching `filter`.
    pub async fn get_beatmapsets(
        &self,
        filter: &BeatmapsetFilter,
    ) -> ApiResult<Option<Vec<Beatmapset>>> {
        let call = ServiceCall::get(self.resource.url("/v1/beatmapsets")).params(filter.params());
        self.resource.fetch(call, "Failed to get beatmapsets").await
    }
}
