//! End-to-end tests: a real server on an ephemeral port, driven by the
//! client auth manager over HTTP.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use tokio::net::TcpListener;
use zinga_auth::{AuthConfig, AuthManager, HttpAuthBackend, MemoryStore};
use zinga_core::models::user::{CreateUser, UserRole};
use zinga_core::repository::UserRepository;
use zinga_db::repository::SurrealUserRepository;
use zinga_server::{AppState, router};

const PARENT_EMAIL: &str = "parent@example.com";
const PARENT_PASSWORD: &str = "Sunshine1!";

struct TestServer {
    base_url: String,
    users: Arc<SurrealUserRepository<Db>>,
}

async fn spawn_server() -> TestServer {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    zinga_db::run_migrations(&db).await.unwrap();

    let repo = SurrealUserRepository::new(db);
    repo.create(CreateUser {
        id: None,
        email: PARENT_EMAIL.into(),
        name: "Parent".into(),
        role: UserRole::User,
        password: Some(PARENT_PASSWORD.into()),
    })
    .await
    .unwrap();
    zinga_auth::demo::create_demo_accounts(&repo, Some("AdminPass1!"))
        .await
        .unwrap();

    let state = AppState::new(repo, 8);
    let users = Arc::clone(&state.users);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{addr}"),
        users,
    }
}

fn manager(server: &TestServer) -> AuthManager<HttpAuthBackend, MemoryStore> {
    AuthManager::new(
        HttpAuthBackend::new(&server.base_url).unwrap(),
        MemoryStore::new(),
        AuthConfig::default(),
    )
}

#[tokio::test]
async fn login_over_http_creates_session() {
    let server = spawn_server().await;
    let auth = manager(&server);

    let outcome = auth.login(PARENT_EMAIL, PARENT_PASSWORD).await;
    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.message, "Login successful");

    let user = outcome.user.unwrap();
    assert_eq!(user.email, PARENT_EMAIL);
    assert!(user.last_login.is_some());
    assert!(user.password_hash.is_none(), "hash must not cross the wire");

    let session = auth.current_session().unwrap();
    assert_eq!(session.user.email, PARENT_EMAIL);
    assert_eq!(session.token.len(), 64);
}

#[tokio::test]
async fn wrong_password_is_rejected_and_recorded() {
    let server = spawn_server().await;
    let auth = manager(&server);

    let outcome = auth.login(PARENT_EMAIL, "Wrong1!pass").await;
    assert!(!outcome.success);
    assert_eq!(outcome.message, "Invalid email or password");
    assert!(auth.current_session().is_none());

    let attempts = auth.login_attempts();
    assert_eq!(attempts.len(), 1);
    assert!(!attempts[0].success);
}

#[tokio::test]
async fn admin_login_gets_admin_session() {
    let server = spawn_server().await;
    let auth = manager(&server);

    let outcome = auth.login("admin@zingalinga.com", "AdminPass1!").await;
    assert!(outcome.success, "{}", outcome.message);
    assert!(zinga_auth::is_admin(outcome.session.as_ref()));
}

#[tokio::test]
async fn change_password_persists_new_credential() {
    let server = spawn_server().await;
    let auth = manager(&server);

    let session = auth
        .login(PARENT_EMAIL, PARENT_PASSWORD)
        .await
        .session
        .unwrap();

    let outcome = auth
        .change_password(PARENT_PASSWORD, "Moonlight2@", &session)
        .await;
    assert!(outcome.success, "{}", outcome.message);

    assert!(!auth.login(PARENT_EMAIL, PARENT_PASSWORD).await.success);
    assert!(auth.login(PARENT_EMAIL, "Moonlight2@").await.success);

    let stored = server.users.get_by_email(PARENT_EMAIL).await.unwrap();
    assert!(stored.password_hash.is_some());
}

async fn post_change_password(
    server: &TestServer,
    current_password: &str,
    new_password: &str,
) -> (reqwest::StatusCode, serde_json::Value) {
    let response = reqwest::Client::new()
        .post(format!("{}/api/auth/change-password", server.base_url))
        .json(&serde_json::json!({
            "email": PARENT_EMAIL,
            "currentPassword": current_password,
            "newPassword": new_password,
        }))
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn change_password_with_wrong_current_is_unauthorized() {
    let server = spawn_server().await;

    let (status, body) = post_change_password(&server, "Wrong1!pass", "Moonlight2@").await;
    assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        serde_json::json!({"success": false, "error": "Invalid email or password"})
    );

    assert!(manager(&server).login(PARENT_EMAIL, PARENT_PASSWORD).await.success);
}

#[tokio::test]
async fn change_password_with_weak_new_password_is_bad_request() {
    let server = spawn_server().await;

    let (status, body) = post_change_password(&server, PARENT_PASSWORD, "abc").await;
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Password must be at least 8 characters long");

    let auth = manager(&server);
    assert!(auth.login(PARENT_EMAIL, PARENT_PASSWORD).await.success);
    assert!(!auth.login(PARENT_EMAIL, "abc").await.success);
}

#[tokio::test]
async fn malformed_login_body_is_bad_request() {
    let server = spawn_server().await;
    let response = reqwest::Client::new()
        .post(format!("{}/api/auth/login", server.base_url))
        .header("content-type", "application/json")
        .body("{\"email\":")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Malformed payload");
}

#[tokio::test]
async fn terms_page_is_served() {
    let server = spawn_server().await;
    let response = reqwest::get(format!("{}/terms", server.base_url))
        .await
        .unwrap();

    assert!(response.status().is_success());
    let html = response.text().await.unwrap();
    assert!(html.contains("Terms of Service"));
    assert!(html.contains("Back to Home"));
}
