//! Integration tests for the session lifecycle.
//!
//! Covers the credential exchange, startup restore, logout semantics and
//! the discard-stale-results rules around auth transitions.

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{session_against, user_json};
use ubuntoo::adapters::mock::MemoryCredentialStore;
use ubuntoo::api::ApiClient;
use ubuntoo::error::{AuthError, ClientError};
use ubuntoo::session::{Session, SessionStatus};

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_success_establishes_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "a@x.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t1",
            "token_type": "bearer",
            "user": user_json("u1", "ana", "Ana")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri()).unwrap();
    let store = Arc::new(MemoryCredentialStore::new());
    let session = Session::new(api, Box::new(store.clone()));
    let user = session.login("a@x.com", "secret").await.unwrap();

    assert_eq!(user.id, "u1");
    assert_eq!(user.full_name, "Ana");
    assert_eq!(session.status(), SessionStatus::Authenticated);
    assert_eq!(session.current_user().unwrap().id, "u1");
    // The exchanged credential is persisted under the well-known key.
    assert_eq!(store.stored(), Some("t1".to_string()));
}

#[tokio::test]
async fn test_login_failure_surfaces_server_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let session = session_against(&server);
    let err = session.login("a@x.com", "wrong").await.unwrap_err();

    assert_eq!(err.user_message(), "Invalid credentials");
    assert!(!err.requires_reauth());
    // Session state is left unchanged.
    assert_eq!(session.status(), SessionStatus::Unauthenticated);
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn test_login_network_failure_leaves_session_unchanged() {
    let api = ApiClient::with_base_url("http://127.0.0.1:1").unwrap();
    let session = Session::new(api, Box::new(MemoryCredentialStore::new()));

    let err = session.login("a@x.com", "secret").await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
    assert!(err.user_message().contains("try again"));
    assert_eq!(session.status(), SessionStatus::Unauthenticated);
}

#[tokio::test]
async fn test_logout_during_pending_login_discards_exchange() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "access_token": "t1",
                    "token_type": "bearer",
                    "user": user_json("u1", "ana", "Ana")
                }))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri()).unwrap();
    let store = Arc::new(MemoryCredentialStore::new());
    let session = Session::new(api, Box::new(store.clone()));

    let (result, _) = tokio::join!(session.login("a@x.com", "secret"), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        session.logout();
    });

    assert_eq!(result.unwrap_err(), ClientError::Auth(AuthError::Superseded));
    assert_eq!(session.status(), SessionStatus::Unauthenticated);
    assert!(session.current_user().is_none());
    // The late-arriving credential was never kept.
    assert_eq!(store.stored(), None);
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_success_implies_authentication() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "email": "new@x.com",
            "password": "secret",
            "username": "newbie",
            "full_name": "New Member"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t-new",
            "token_type": "bearer",
            "user": user_json("u9", "newbie", "New Member")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_against(&server);
    let registration = ubuntoo::models::Registration {
        email: "new@x.com".to_string(),
        password: "secret".to_string(),
        username: "newbie".to_string(),
        full_name: "New Member".to_string(),
        job_title: None,
        bio: None,
    };
    let user = session.register(&registration).await.unwrap();

    assert_eq!(user.id, "u9");
    assert_eq!(session.status(), SessionStatus::Authenticated);
}

#[tokio::test]
async fn test_register_conflict_surfaces_detail_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "Email already registered"})),
        )
        .mount(&server)
        .await;

    let session = session_against(&server);
    let registration = ubuntoo::models::Registration {
        email: "dup@x.com".to_string(),
        password: "secret".to_string(),
        username: "dup".to_string(),
        full_name: "Dup".to_string(),
        job_title: None,
        bio: None,
    };
    let err = session.register(&registration).await.unwrap_err();

    assert_eq!(err.user_message(), "Email already registered");
    assert_eq!(session.status(), SessionStatus::Unauthenticated);
}

// ============================================================================
// Startup restore
// ============================================================================

#[tokio::test]
async fn test_initialize_without_credential_never_calls_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u1", "ana", "Ana")))
        .expect(0)
        .mount(&server)
        .await;

    let session = session_against(&server);
    let status = session.initialize().await;

    assert_eq!(status, SessionStatus::Unauthenticated);
    assert_eq!(session.status(), SessionStatus::Unauthenticated);
}

#[tokio::test]
async fn test_initialize_with_valid_credential_restores_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("Authorization", "Bearer persisted-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u1", "ana", "Ana")))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri()).unwrap();
    let session = Session::new(
        api,
        Box::new(MemoryCredentialStore::with_token("persisted-token")),
    );

    let status = session.initialize().await;

    assert_eq!(status, SessionStatus::Authenticated);
    assert_eq!(session.current_user().unwrap().id, "u1");
}

#[tokio::test]
async fn test_initialize_with_rejected_credential_clears_it() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token"})))
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri()).unwrap();
    let store = Arc::new(MemoryCredentialStore::with_token("expired-token"));
    let session = Session::new(api, Box::new(store.clone()));

    let status = session.initialize().await;

    assert_eq!(status, SessionStatus::Unauthenticated);
    assert_eq!(session.status(), SessionStatus::Unauthenticated);
    assert!(session.current_user().is_none());
    // Round-trip property: persisted-invalid implies cleared.
    assert_eq!(store.stored(), None);
}

#[tokio::test]
async fn test_initialize_with_malformed_profile_falls_back() {
    let server = MockServer::start().await;

    // A body that does not match the declared profile record.
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri()).unwrap();
    let session = Session::new(api, Box::new(MemoryCredentialStore::with_token("tok")));

    let status = session.initialize().await;

    assert_eq!(status, SessionStatus::Unauthenticated);
}

// ============================================================================
// Credential freshness across logout
// ============================================================================

#[tokio::test]
async fn test_relogin_after_logout_uses_fresh_credential() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t1",
            "token_type": "bearer",
            "user": user_json("u1", "ana", "Ana")
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri()).unwrap();
    let store = Arc::new(MemoryCredentialStore::new());
    let session = Session::new(api, Box::new(store.clone()));
    session.login("a@x.com", "secret").await.unwrap();
    session.logout();
    assert_eq!(session.status(), SessionStatus::Unauthenticated);
    assert_eq!(store.stored(), None);

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t2",
            "token_type": "bearer",
            "user": user_json("u1", "ana", "Ana")
        })))
        .mount(&server)
        .await;

    session.login("a@x.com", "secret").await.unwrap();
    assert_eq!(store.stored(), Some("t2".to_string()));

    // Any request issued after the second login must carry the fresh
    // credential, never the pre-logout one.
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("Authorization", "Bearer t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u1", "ana", "Ana")))
        .expect(1)
        .mount(&server)
        .await;

    session.refresh_current_user().await.unwrap();
}

// ============================================================================
// Forced logout on unauthorized responses
// ============================================================================

#[tokio::test]
async fn test_unauthorized_response_forces_logout() {
    let server = MockServer::start().await;
    let session = common::authenticated_session(&server, "t1", user_json("u1", "ana", "Ana")).await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token"})))
        .mount(&server)
        .await;

    let err = session.refresh_current_user().await.unwrap_err();

    assert!(err.requires_reauth());
    assert_eq!(session.status(), SessionStatus::Unauthenticated);
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn test_duplicate_login_submission_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "access_token": "t1",
                    "token_type": "bearer",
                    "user": user_json("u1", "ana", "Ana")
                }))
                .set_delay(Duration::from_millis(80)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = session_against(&server);

    let (first, second) = tokio::join!(session.login("a@x.com", "secret"), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        session.login("a@x.com", "secret").await
    });

    assert!(first.is_ok());
    assert!(matches!(
        second.unwrap_err(),
        ClientError::ActionPending { .. }
    ));
}
