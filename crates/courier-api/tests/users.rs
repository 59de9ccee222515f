mod common;

use common::{harness, session_json};
use courier_api::{SessionFilter, UsersClient};
use courier_core::mapping;
use courier_http::Method;
use courier_telemetry::{context, Level};
use serde_json::{json, Value};
use uuid::Uuid;

const SESSION_ID: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

fn session_id() -> Uuid {
    Uuid::parse_str(SESSION_ID).unwrap()
}

fn body(request: &courier_http::TransportRequest) -> Value {
    serde_json::from_slice(request.body.as_ref().unwrap()).unwrap()
}

#[tokio::test]
async fn test_log_in() {
    let h = harness();
    h.mock.respond_data(200, session_json(SESSION_ID));
    let client = UsersClient::new(h.mock.client(), &h.logging);

    let session = client.log_in("cookiezi", "hunter2", "osu!").await.unwrap().unwrap();

    assert_eq!(session.session_id, session_id());
    let request = h.mock.last_request().unwrap();
    assert_eq!(request.url, "http://users-service/v1/sessions");
    assert_eq!(
        body(&request),
        json!({"identifier": "cookiezi", "passphrase": "hunter2", "user_agent": "osu!"})
    );
}

#[tokio::test]
async fn test_partial_update_session_sends_null_expiry() {
    let h = harness();
    h.mock.respond_data(200, session_json(SESSION_ID));
    let client = UsersClient::new(h.mock.client(), &h.logging);

    client.partial_update_session(session_id(), None).await.unwrap();

    let request = h.mock.last_request().unwrap();
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(body(&request), json!({"expires_at": null}));
}

#[tokio::test]
async fn test_get_all_sessions_params() {
    let h = harness();
    h.mock.respond_data(200, json!([session_json(SESSION_ID)]));
    let client = UsersClient::new(h.mock.client(), &h.logging);

    let filter = SessionFilter {
        account_id: Some(1000),
        user_agent: None,
    };
    let sessions = client.get_all_sessions(&filter).await.unwrap().unwrap();

    assert_eq!(sessions.len(), 1);
    assert_eq!(
        h.mock.last_request().unwrap().query,
        vec![("account_id".to_string(), "1000".to_string())]
    );
}

#[tokio::test]
async fn test_partial_update_account_with_mapping() {
    let h = harness();
    h.mock.respond_data(
        200,
        json!({
            "account_id": 1000,
            "username": "cookiezi",
            "safe_username": "cookiezi",
            "email_address": "c@example.com",
            "country": "kr",
            "status": "active",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        }),
    );
    let client = UsersClient::new(h.mock.client(), &h.logging);

    let account = client
        .partial_update_account(1000, mapping! { "country" => "kr" })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(account.country, "kr");
    assert_eq!(body(&h.mock.last_request().unwrap()), json!({"country": "kr"}));
}

#[tokio::test]
async fn test_partial_update_stats_can_clear_with_null() {
    let h = harness();
    h.mock.respond(404, json!({"error": "not found"}));
    let client = UsersClient::new(h.mock.client(), &h.logging);

    client
        .partial_update_stats(1000, 0, mapping! { "max_combo" => 1200, "replay_views" => None::<i64> })
        .await
        .unwrap();

    assert_eq!(
        body(&h.mock.last_request().unwrap()),
        json!({"max_combo": 1200, "replay_views": null})
    );
}

#[tokio::test]
async fn test_get_account_with_naive_timestamps() {
    let h = harness();
    h.mock.respond_data(
        200,
        json!({
            "account_id": 1000,
            "username": "cookiezi",
            "safe_username": "cookiezi",
            "email_address": "c@example.com",
            "country": "kr",
            "status": "active",
            "created_at": "2024-01-01T00:00:00.123456",
            "updated_at": "2024-01-01T00:00:00"
        }),
    );
    let client = UsersClient::new(h.mock.client(), &h.logging);

    let account = client.get_account(1000).await.unwrap().unwrap();

    assert_eq!(account.account_id, 1000);
    assert_eq!(account.created_at.timestamp_subsec_micros(), 123_456);
    assert_eq!(account.updated_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    assert!(h.sink.records_at(Level::Error).is_empty());
}

#[tokio::test]
async fn test_enqueue_packet() {
    let h = harness();
    h.mock
        .respond(201, json!({"data": null}))
        .respond(404, json!({"error": "session not found"}));
    let client = UsersClient::new(h.mock.client(), &h.logging);

    assert!(client.enqueue_packet(session_id(), &[5, 0, 0, 4, 0, 0, 0, 1, 0, 0, 0]).await.unwrap());
    assert_eq!(
        body(&h.mock.last_request().unwrap()),
        json!({"data": [5, 0, 0, 4, 0, 0, 0, 1, 0, 0, 0]})
    );
    assert_eq!(
        h.mock.last_request().unwrap().url,
        format!("http://users-service/v1/sessions/{SESSION_ID}/queued-packets")
    );

    assert!(!client.enqueue_packet(session_id(), &[1]).await.unwrap());
    let errors = h.sink.records_at(Level::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["status"], 404);
}

#[tokio::test]
async fn test_dequeue_all_packets() {
    let h = harness();
    h.mock.respond_data(
        200,
        json!([{"data": [1, 2, 3], "created_at": "2024-01-01T00:00:00Z"}]),
    );
    let client = UsersClient::new(h.mock.client(), &h.logging);

    let packets = client.dequeue_all_packets(session_id()).await.unwrap().unwrap();
    assert_eq!(packets[0].data, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_get_spectator_host() {
    let h = harness();
    h.mock.respond_data(200, json!(SESSION_ID));
    let client = UsersClient::new(h.mock.client(), &h.logging);

    let host = client.get_spectator_host(Uuid::nil()).await.unwrap();

    assert_eq!(host, Some(session_id()));
    assert_eq!(
        h.mock.last_request().unwrap().url,
        "http://users-service/v1/sessions/00000000-0000-0000-0000-000000000000/spectating"
    );
}

#[tokio::test]
async fn test_delete_stats_returns_final_state() {
    let h = harness();
    h.mock.respond_data(
        200,
        json!({
            "account_id": 1000, "game_mode": 0, "total_score": 0, "ranked_score": 0,
            "performance": 0, "play_count": 0, "play_time": 0, "accuracy": 0.0,
            "max_combo": 0, "total_hits": 0, "replay_views": 0, "xh_count": 0,
            "x_count": 0, "sh_count": 0, "s_count": 0, "a_count": 0
        }),
    );
    let client = UsersClient::new(h.mock.client(), &h.logging);

    let stats = client.delete_stats(1000, 0).await.unwrap().unwrap();

    assert_eq!(stats.account_id, 1000);
    let request = h.mock.last_request().unwrap();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.url, "http://users-service/v1/accounts/1000/stats/0");
}

#[tokio::test]
async fn test_failure_log_carries_request_id() {
    let h = harness();
    h.mock.respond(500, json!({"error": "internal"}));
    let client = UsersClient::new(h.mock.client(), &h.logging);

    let result = context::scope(Some("req-42".to_string()), async {
        client.get_account(1000).await
    })
    .await;

    assert!(result.unwrap().is_none());
    let errors = h.sink.records_at(Level::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["request_id"], "req-42");
    assert_eq!(errors[0]["event"], "Failed to get account");
}
