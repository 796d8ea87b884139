//! Integration tests for the review facade.

use mockito::Server;
use tempfile::TempDir;
use tourbook::models::ReviewCreate;
use tourbook::Api;

mod common;

fn api(url: &str) -> (Api, TempDir) {
    common::init_tracing();
    let dir = TempDir::new().unwrap();
    let api = Api::with_base_url(url, dir.path().to_path_buf()).unwrap();
    (api, dir)
}

const TWO_REVIEWS_OLDEST_FIRST: &str = r#"[
    {
        "id": 1,
        "author_name": "Boris",
        "email": "boris@example.com",
        "rating": 4,
        "text": "Good",
        "created_at": "2026-05-01T10:00:00Z",
        "is_active": true
    },
    {
        "id": 2,
        "author_name": "Anna",
        "email": "anna@example.com",
        "rating": 5,
        "text": "Great",
        "created_at": "2026-06-01T10:00:00Z",
        "is_active": true
    }
]"#;

#[tokio::test]
async fn test_approved_sorted_newest_first() {
    let mut server = Server::new_async().await;
    let (api, _dir) = api(&server.url());

    let _mock = server
        .mock("GET", "/review/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TWO_REVIEWS_OLDEST_FIRST)
        .create_async()
        .await;

    let reviews = api.reviews.approved().await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].id, 2);
    assert_eq!(reviews[1].id, 1);
}

#[tokio::test]
async fn test_approved_is_cached() {
    let mut server = Server::new_async().await;
    let (api, _dir) = api(&server.url());

    let mock = server
        .mock("GET", "/review/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TWO_REVIEWS_OLDEST_FIRST)
        .expect(1)
        .create_async()
        .await;

    api.reviews.approved().await.unwrap();
    api.reviews.approved().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_invalidates_review_listings() {
    let mut server = Server::new_async().await;
    let (api, _dir) = api(&server.url());

    let list_mock = server
        .mock("GET", "/review/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TWO_REVIEWS_OLDEST_FIRST)
        .expect(2)
        .create_async()
        .await;

    let create_mock = server
        .mock("POST", "/review/")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "id": 3,
                "author_name": "Clara",
                "email": "clara@example.com",
                "rating": 5,
                "text": "Wonderful",
                "created_at": "2026-06-02T10:00:00Z",
                "is_active": false
            }"#,
        )
        .create_async()
        .await;

    api.reviews.approved().await.unwrap();

    let payload = ReviewCreate {
        author_name: "Clara".to_string(),
        email: "clara@example.com".to_string(),
        rating: 5,
        text: "Wonderful".to_string(),
    };
    let created = api.reviews.create(&payload).await.unwrap();
    assert!(!created.is_active);

    api.reviews.approved().await.unwrap();

    list_mock.assert_async().await;
    create_mock.assert_async().await;
}

#[tokio::test]
async fn test_stats() {
    let mut server = Server::new_async().await;
    let (api, _dir) = api(&server.url());

    let mock = server
        .mock("GET", "/review/stats")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "total": 10,
                "average_rating": 4.2,
                "rating_distribution": {"1": 0, "2": 1, "3": 1, "4": 3, "5": 5},
                "pending_count": 2,
                "approved_count": 8
            }"#,
        )
        .expect(1)
        .create_async()
        .await;

    let stats = api.reviews.stats().await.unwrap();
    // Cached on repeat.
    api.reviews.stats().await.unwrap();

    mock.assert_async().await;
    assert_eq!(stats.total, 10);
    assert_eq!(stats.pending_count, 2);
}

#[tokio::test]
async fn test_toggle_review() {
    let mut server = Server::new_async().await;
    let (api, _dir) = api(&server.url());

    let mock = server
        .mock("POST", "/review/admin/2/toggle")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "id": 2,
                "author_name": "Anna",
                "email": "anna@example.com",
                "rating": 5,
                "text": "Great",
                "created_at": "2026-06-01T10:00:00Z",
                "is_active": false
            }"#,
        )
        .create_async()
        .await;

    let toggled = api.reviews.toggle(2).await.unwrap();
    mock.assert_async().await;
    assert!(!toggled.is_active);
}

#[tokio::test]
async fn test_pending_uses_admin_endpoint() {
    let mut server = Server::new_async().await;
    let (api, _dir) = api(&server.url());

    let mock = server
        .mock("GET", "/review/admin/pending")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let pending = api.reviews.pending().await.unwrap();
    mock.assert_async().await;
    assert!(pending.is_empty());
}
