//! Shared helpers for endpoint-level tests.
//!
//! Each test builds a session against a wiremock server; the helpers here
//! construct the JSON bodies the backend would return.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ubuntoo::adapters::mock::MemoryCredentialStore;
use ubuntoo::api::ApiClient;
use ubuntoo::session::{Session, SessionStatus};

/// Minimal user profile body with the given identity.
pub fn user_json(id: &str, username: &str, full_name: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{}@example.com", username),
        "username": username,
        "full_name": full_name,
        "soft_skills": [],
        "personal_values": [],
        "engagements": [],
        "badges": [],
        "followers_count": 0,
        "following_count": 0,
        "posts_count": 0,
        "created_at": "2025-01-15T10:00:00Z"
    })
}

/// User profile body with a specific skill set.
pub fn user_with_skills_json(id: &str, skills: &[&str]) -> Value {
    let mut user = user_json(id, "ana", "Ana");
    user["soft_skills"] = json!(skills);
    user
}

/// Post body as the list endpoint returns it (author snapshot embedded).
pub fn post_json(id: &str, author_id: &str, content: &str) -> Value {
    json!({
        "id": id,
        "user_id": author_id,
        "user": {
            "id": author_id,
            "username": "ana",
            "full_name": "Ana",
            "job_title": "Engineer"
        },
        "content": content,
        "post_type": "idea",
        "tags": [],
        "likes_count": 0,
        "comments_count": 0,
        "shares_count": 0,
        "created_at": "2025-02-01T08:30:00Z"
    })
}

/// Challenge body ending the given number of days from now.
pub fn challenge_json(
    id: &str,
    ends_in_days: i64,
    max_participants: Option<u32>,
    participants: &[&str],
) -> Value {
    let now = Utc::now();
    json!({
        "id": id,
        "title": "Community challenge",
        "description": "Share an initiative",
        "category": "innovation-socio-professionnelle",
        "start_date": (now - Duration::days(1)).to_rfc3339(),
        "end_date": (now + Duration::days(ends_in_days)).to_rfc3339(),
        "participants": participants,
        "max_participants": max_participants,
        "rewards": ["innovation"],
        "created_by": "admin",
        "created_at": (now - Duration::days(1)).to_rfc3339()
    })
}

/// Badge body owned by the given user.
pub fn badge_json(id: &str, user_id: &str, badge_type: &str, status: &str) -> Value {
    json!({
        "id": id,
        "user_id": user_id,
        "badge_type": badge_type,
        "title": "Nomination",
        "description": "Peer nomination",
        "status": status,
        "votes_for": 1,
        "votes_against": 0,
        "created_at": "2025-02-10T09:00:00Z"
    })
}

/// Install a test subscriber once so `RUST_LOG=debug cargo test` shows the
/// client's transition logs.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build a session bound to the mock server, with an empty credential
/// store.
pub fn session_against(server: &MockServer) -> Arc<Session> {
    init_tracing();
    let api = ApiClient::with_base_url(server.uri()).unwrap();
    Arc::new(Session::new(api, Box::new(MemoryCredentialStore::new())))
}

/// Build a session and authenticate it by logging in against a mocked
/// exchange endpoint returning the given token and user.
pub async fn authenticated_session(server: &MockServer, token: &str, user: Value) -> Arc<Session> {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "token_type": "bearer",
            "user": user
        })))
        .up_to_n_times(1)
        .mount(server)
        .await;

    let session = session_against(server);
    session
        .login("ana@example.com", "secret")
        .await
        .expect("login against mock server failed");
    assert_eq!(session.status(), SessionStatus::Authenticated);
    session
}
