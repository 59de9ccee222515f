//! Beatmaps service records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{RankedStatus, Status};
use crate::params::{EnumValue, Primitive};

/// Ruleset a beatmap or score belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// osu!standard.
    Osu,
    /// osu!taiko.
    Taiko,
    /// osu!catch.
    Fruits,
    /// osu!mania.
    Mania,
}

impl GameMode {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Osu => "osu",
            Self::Taiko => "taiko",
            Self::Fruits => "fruits",
            Self::Mania => "mania",
        }
    }
}

impl EnumValue for GameMode {
    fn primitive(self) -> Primitive {
        Primitive::Str(self.as_str().to_string())
    }
}

crate::enum_value!(GameMode);

/// A single difficulty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beatmap {
    pub beatmap_id: i64,
    pub md5_hash: String,
    pub set_id: i64,
    pub convert: bool,
    pub mode: GameMode,
    pub od: f64,
    pub ar: f64,
    pub cs: f64,
    pub hp: f64,
    pub bpm: f64,
    pub hit_length: i64,
    pub total_length: i64,
    pub count_circles: i64,
    pub count_sliders: i64,
    pub count_spinners: i64,
    pub difficulty_rating: f64,
    pub is_scoreable: bool,
    pub pass_count: i64,
    pub play_count: i64,
    pub version: String,
    pub mapper_id: i64,
    pub ranked_status: RankedStatus,
    pub status: Status,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
}

/// A set of difficulties sharing one song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beatmapset {
    pub beatmapset_id: i64,
    pub artist: String,
    pub artist_unicode: String,
    pub covers: Map<String, Value>,
    pub creator: String,
    pub favourite_count: i64,
    pub nsfw: bool,
    pub osu_play_count: i64,
    pub preview_url: String,
    pub source: String,
    pub title: String,
    pub title_unicode: String,
    /// Account id of the mapper.
    pub mapper_id: i64,
    pub mapper_name: String,
    pub video: bool,
    pub download_disabled: bool,
    pub availability_information: Option<String>,
    pub bpm: f64,
    pub can_be_hyped: bool,
    pub discussion_locked: bool,
    pub current_hype: i64,
    pub required_hype: i64,
    pub is_scoreable: bool,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub osu_updated_at: DateTime<Utc>,
    pub legacy_thread_url: String,
    pub current_nominations: i64,
    pub required_nominations: i64,
    pub ranked_status: RankedStatus,
    #[serde(default, deserialize_with = "crate::timestamp::deserialize_option")]
    pub osu_ranked_at: Option<DateTime<Utc>>,
    pub storyboard: bool,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub osu_submitted_at: DateTime<Utc>,
    pub tags: String,
    pub status: Status,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
}

crate::model!(Beatmap => "beatmap", Beatmapset => "beatmapset");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn beatmap_json() -> Value {
        json!({
            "beatmap_id": 5,
            "md5_hash": "a5b99395a42bd55bc5eb1d2411cbdf8b",
            "set_id": 1,
            "convert": false,
            "mode": "osu",
            "od": 6.0,
            "ar": 6.0,
            "cs": 4.0,
            "hp": 6.0,
            "bpm": 119.999,
            "hit_length": 108,
            "total_length": 142,
            "count_circles": 160,
            "count_sliders": 30,
            "count_spinners": 3,
            "difficulty_rating": 2.55,
            "is_scoreable": true,
            "pass_count": 100,
            "play_count": 1000,
            "version": "Normal",
            "mapper_id": 2,
            "ranked_status": 1,
            "status": "active",
            "created_at": "2007-10-06T17:46:31Z",
            "updated_at": "2014-05-18T17:16:30Z",
            "unknown_extra": "ignored"
        })
    }

    #[test]
    fn test_beatmap_decodes_and_ignores_unknown_fields() {
        let beatmap: Beatmap = serde_json::from_value(beatmap_json()).unwrap();
        assert_eq!(beatmap.beatmap_id, 5);
        assert_eq!(beatmap.mode, GameMode::Osu);
        assert_eq!(beatmap.ranked_status, RankedStatus::Ranked);
        assert_eq!(beatmap.status, Status::Active);
    }

    #[test]
    fn test_beatmap_normalizes_to_its_fields() {
        let beatmap: Beatmap = serde_json::from_value(beatmap_json()).unwrap();
        let normalized = crate::normalize(&crate::Convertible::from(&beatmap));

        let mut expected = beatmap_json();
        expected.as_object_mut().unwrap().remove("unknown_extra");
        assert_eq!(normalized["beatmap_id"], expected["beatmap_id"]);
        assert_eq!(normalized["mode"], json!("osu"));
        assert_eq!(normalized["ranked_status"], json!(1));
        assert_eq!(normalized.as_object().unwrap().len(), expected.as_object().unwrap().len());
    }
}
