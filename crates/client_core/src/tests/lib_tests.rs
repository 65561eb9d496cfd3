use super::*;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use shared::domain::QueryMode;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: String,
}

impl Reply {
    fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Clone)]
struct MockAgentState {
    recommend_reply: Arc<Mutex<Reply>>,
    activity_reply: Arc<Mutex<Reply>>,
    recommend_bodies: Arc<Mutex<Vec<Value>>>,
    activity_requests: Arc<Mutex<Vec<(String, Option<u32>)>>>,
}

#[derive(serde::Deserialize)]
struct LimitQuery {
    limit: Option<u32>,
}

async fn mock_recommend(
    State(state): State<MockAgentState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.recommend_bodies.lock().await.push(body);
    let reply = state.recommend_reply.lock().await.clone();
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
}

async fn mock_activity(
    State(state): State<MockAgentState>,
    Path(user_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> impl IntoResponse {
    state
        .activity_requests
        .lock()
        .await
        .push((user_id, query.limit));
    let reply = state.activity_reply.lock().await.clone();
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
}

async fn spawn_agent_server(
    recommend_reply: Reply,
    activity_reply: Reply,
) -> Result<(String, MockAgentState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = MockAgentState {
        recommend_reply: Arc::new(Mutex::new(recommend_reply)),
        activity_reply: Arc::new(Mutex::new(activity_reply)),
        recommend_bodies: Arc::new(Mutex::new(Vec::new())),
        activity_requests: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/api/recommend", post(mock_recommend))
        .route("/api/activity/:user_id", get(mock_activity))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

fn client_for(server_url: &str) -> HttpAgentClient {
    let config = ClientConfig::with_base_url(server_url).expect("config");
    HttpAgentClient::new(config).expect("client")
}

fn sales_rep_recommendations() -> Reply {
    Reply::json(
        StatusCode::OK,
        json!({
            "user_id": "sales_rep_001",
            "analysis_timestamp": "2024-01-01T00:00:00Z",
            "recommendations": [
                {"action": "Follow up", "priority": "High", "reason": "Deal closing soon"}
            ]
        }),
    )
}

fn no_activities() -> Reply {
    Reply::json(StatusCode::OK, json!({"count": 0, "activities": []}))
}

#[tokio::test]
async fn recommendation_round_trip_projects_one_high_row() {
    let (server_url, state) = spawn_agent_server(sales_rep_recommendations(), no_activities())
        .await
        .expect("spawn server");
    let client = client_for(&server_url);
    let mut session = Session::new();

    session
        .request_recommendations(&client, "sales_rep_001")
        .await
        .expect("recommendations");

    let bodies = state.recommend_bodies.lock().await.clone();
    assert_eq!(bodies, vec![json!({"user_id": "sales_rep_001", "limit": 10})]);

    let display = session.active_display_in(&Utc).expect("display");
    assert_eq!(display.rows.len(), 1);
    match &display.rows[0] {
        DisplayRow::Recommendation(row) => {
            assert_eq!(row.ordinal, 1);
            assert_eq!(row.severity.class_name(), "high");
            assert_eq!(row.reason, "Deal closing soon");
            assert_eq!(row.action, "Follow up");
        }
        other => panic!("unexpected row {other:?}"),
    }
    assert_eq!(display.summary, "for sales_rep_001");
}

#[tokio::test]
async fn empty_activity_log_projects_an_empty_state() {
    let (server_url, state) = spawn_agent_server(sales_rep_recommendations(), no_activities())
        .await
        .expect("spawn server");
    let client = client_for(&server_url);
    let mut session = Session::new();
    session.select_mode(QueryMode::Activities);

    session
        .request_activities(&client, "sales_rep_001")
        .await
        .expect("activities");

    let requests = state.activity_requests.lock().await.clone();
    assert_eq!(requests, vec![("sales_rep_001".to_string(), Some(20))]);

    let display = session.active_display().expect("display");
    assert!(display.rows.is_empty());
    assert!(display.empty_state.is_some());
    assert_eq!(display.summary, "0 activities found");
}

#[tokio::test]
async fn service_detail_is_surfaced_verbatim() {
    let (server_url, _state) = spawn_agent_server(
        Reply::json(StatusCode::NOT_FOUND, json!({"detail": "No activity found"})),
        no_activities(),
    )
    .await
    .expect("spawn server");
    let client = client_for(&server_url);
    let mut session = Session::new();

    let err = session
        .request_recommendations(&client, "nobody")
        .await
        .expect_err("must fail");

    assert!(matches!(
        err,
        SessionError::Transport(TransportError::Status { status: 404, .. })
    ));
    assert_eq!(session.error(), Some("No activity found"));
    assert!(session.recommendation_result().is_none());
    assert!(!session.is_loading());
}

#[tokio::test]
async fn error_status_without_detail_falls_back_to_generic_message() {
    let (server_url, _state) = spawn_agent_server(
        sales_rep_recommendations(),
        Reply::raw(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
    )
    .await
    .expect("spawn server");
    let client = client_for(&server_url);
    let mut session = Session::new();

    let _ = session
        .request_activities(&client, "u1")
        .await
        .expect_err("must fail");

    assert_eq!(session.error(), Some("Failed to fetch activities"));
}

#[tokio::test]
async fn undecodable_body_is_a_transport_error() {
    let (server_url, _state) = spawn_agent_server(
        Reply::raw(StatusCode::OK, "<html>proxy login</html>"),
        no_activities(),
    )
    .await
    .expect("spawn server");
    let client = client_for(&server_url);

    let user = shared::domain::UserId::parse("u1").expect("user");
    let err = client
        .fetch_recommendations(&user)
        .await
        .expect_err("must fail");
    assert!(matches!(err, TransportError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn service_timestamps_without_offset_are_accepted() {
    let (server_url, _state) = spawn_agent_server(
        Reply::json(
            StatusCode::OK,
            json!({
                "user_id": "u1",
                "analysis_timestamp": "2024-05-06T07:08:09.123456",
                "recommendations": []
            }),
        ),
        Reply::json(
            StatusCode::OK,
            json!({
                "count": 1,
                "activities": [
                    {"id": 42, "action": "demo_scheduled", "timestamp": "2024-05-06T07:00:00", "context": "Acme"}
                ]
            }),
        ),
    )
    .await
    .expect("spawn server");
    let client = client_for(&server_url);
    let user = shared::domain::UserId::parse("u1").expect("user");

    let recommendations = client.fetch_recommendations(&user).await.expect("recs");
    assert!(recommendations.items.is_empty());
    assert_eq!(
        recommendations.analysis_timestamp.format("%H:%M:%S").to_string(),
        "07:08:09"
    );

    let activities = client.fetch_activities(&user).await.expect("activities");
    assert_eq!(activities.items[0].id, "42");
    assert_eq!(activities.items[0].context.as_deref(), Some("Acme"));
    assert_eq!(activities.user_id, "u1");
}

#[tokio::test]
async fn user_id_is_sent_as_a_single_encoded_path_segment() {
    let (server_url, state) = spawn_agent_server(sales_rep_recommendations(), no_activities())
        .await
        .expect("spawn server");
    let client = client_for(&server_url);
    let user = shared::domain::UserId::parse("team a/b").expect("user");

    client.fetch_activities(&user).await.expect("activities");

    let requests = state.activity_requests.lock().await.clone();
    assert_eq!(requests, vec![("team a/b".to_string(), Some(20))]);
}

#[tokio::test]
async fn unreachable_service_is_a_network_error_and_session_stays_usable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let client = client_for(&format!("http://{addr}"));
    let mut session = Session::new();

    let err = session
        .request_recommendations(&client, "u1")
        .await
        .expect_err("must fail");
    assert!(matches!(
        err,
        SessionError::Transport(TransportError::Network(_))
    ));
    assert_eq!(session.error(), Some("Failed to fetch recommendations"));

    let ticket = session.begin_recommendations("u1").expect("session still usable");
    assert_eq!(ticket.mode(), QueryMode::Recommendations);
}
