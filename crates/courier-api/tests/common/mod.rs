//! Shared fixtures for resource client tests.

#![allow(dead_code)]

use courier_telemetry::Logging;
use courier_test::{CapturingSink, MockTransport};
use serde_json::{json, Value};

pub struct Harness {
    pub mock: MockTransport,
    pub sink: CapturingSink,
    pub logging: Logging,
}

pub fn harness() -> Harness {
    let sink = CapturingSink::new();
    Harness {
        mock: MockTransport::new(),
        logging: sink.logging(),
        sink,
    }
}

pub fn beatmap_json(beatmap_id: i64) -> Value {
    json!({
        "beatmap_id": beatmap_id,
        "md5_hash": "a5b99395a42bd55bc5eb1d2411cbdf8b",
        "set_id": 1,
        "convert": false,
        "mode": "osu",
        "od": 6.0,
        "ar": 6.0,
        "cs": 4.0,
        "hp": 6.0,
        "bpm": 119.5,
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
        "updated_at": "2014-05-18T17:16:30Z"
    })
}

pub fn chat_json(chat_id: i64) -> Value {
    json!({
        "chat_id": chat_id,
        "name": "#osu",
        "topic": "General discussion",
        "read_privileges": 1,
        "write_privileges": 1,
        "auto_join": true,
        "instance": false,
        "status": "active",
        "updated_at": "2024-01-01T00:00:00Z",
        "created_at": "2024-01-01T00:00:00Z",
        "created_by": 1
    })
}

pub fn session_json(session_id: &str) -> Value {
    json!({
        "session_id": session_id,
        "account_id": 1000,
        "user_agent": "osu!",
        "expires_at": "2024-01-02T00:00:00Z",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}
