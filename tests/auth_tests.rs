//! Integration tests for the authentication facade and session persistence.

use mockito::Server;
use tempfile::TempDir;
use tourbook::Api;

mod common;

fn api_at(url: &str, dir: &TempDir) -> Api {
    common::init_tracing();
    Api::with_base_url(url, dir.path().to_path_buf()).unwrap()
}

const USER: &str = r#"{"id": 1, "email": "admin@example.com", "is_superuser": true}"#;

#[tokio::test]
async fn test_login_stores_token_and_user() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let api = api_at(&server.url(), &dir);
    assert!(!api.auth.is_authenticated());

    let login_mock = server
        .mock("POST", "/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "tok123", "token_type": "bearer"}"#)
        .create_async()
        .await;

    // The current-user fetch must go out with the just-stored token.
    let me_mock = server
        .mock("GET", "/users/me")
        .match_header("authorization", "bearer tok123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(USER)
        .create_async()
        .await;

    let user = api.auth.login("admin@example.com", "secret").await.unwrap();

    login_mock.assert_async().await;
    me_mock.assert_async().await;

    assert!(user.is_superuser);
    assert!(api.auth.is_authenticated());
    assert!(api.auth.is_superuser());
    assert_eq!(
        api.auth.stored_user().map(|u| u.email),
        Some("admin@example.com".to_string())
    );
    assert!(dir.path().join("credentials.json").exists());
}

#[tokio::test]
async fn test_session_survives_reconstruction() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();

    {
        let api = api_at(&server.url(), &dir);

        let _login = server
            .mock("POST", "/login")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "tok123", "token_type": "bearer"}"#)
            .create_async()
            .await;
        let _me = server
            .mock("GET", "/users/me")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(USER)
            .create_async()
            .await;

        api.auth.login("admin@example.com", "secret").await.unwrap();
    }

    let reopened = api_at(&server.url(), &dir);
    assert!(reopened.auth.is_authenticated());
    assert!(reopened.auth.is_superuser());
}

#[tokio::test]
async fn test_logout_clears_credentials_locally() {
    let server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("credentials.json"),
        r#"{"access_token": "tok123", "token_type": "bearer", "user": null}"#,
    )
    .unwrap();

    let api = api_at(&server.url(), &dir);
    assert!(api.auth.is_authenticated());

    api.auth.logout().unwrap();

    assert!(!api.auth.is_authenticated());
    assert!(!dir.path().join("credentials.json").exists());
    // Logout is local only; the signal is reserved for backend rejections.
    assert!(!api.logout_signal().is_triggered());
}

#[tokio::test]
async fn test_register_does_not_log_in() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let api = api_at(&server.url(), &dir);

    let mock = server
        .mock("POST", "/register")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 2, "email": "new@example.com", "is_superuser": false}"#)
        .create_async()
        .await;

    let user = api.auth.register("new@example.com", "secret").await.unwrap();

    mock.assert_async().await;
    assert_eq!(user.email, "new@example.com");
    assert!(!api.auth.is_authenticated());
}

#[tokio::test]
async fn test_check_admin_access_false_on_failure() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let api = api_at(&server.url(), &dir);

    let _mock = server
        .mock("GET", "/users/me")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Could not validate credentials"}"#)
        .create_async()
        .await;

    assert!(!api.auth.check_admin_access().await);
}

#[tokio::test]
async fn test_failed_login_leaves_store_empty() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let api = api_at(&server.url(), &dir);

    let _mock = server
        .mock("POST", "/login")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Incorrect email or password"}"#)
        .create_async()
        .await;

    assert!(api.auth.login("admin@example.com", "wrong").await.is_err());
    assert!(!api.auth.is_authenticated());
    assert!(!dir.path().join("credentials.json").exists());
}
