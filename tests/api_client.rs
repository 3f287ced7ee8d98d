mod common;

use blogify::api::ApiError;
use blogify::model::NewComment;
use common::client_for;
use common::mock_api::MockApi;
use serde_json::json;

#[tokio::test]
async fn fetch_catalog_decodes_posts_and_users() {
    let mock = MockApi::start().await;
    let client = client_for(&mock.base_url());

    let catalog = client.fetch_catalog().await.unwrap();
    assert_eq!(catalog.posts.len(), 25);
    assert_eq!(catalog.posts[0].user_id, 1);
    assert_eq!(catalog.posts[24].user_id, 2);
    assert_eq!(catalog.users.len(), 2);
    assert_eq!(catalog.users[0].name, "Leanne Graham");
}

#[tokio::test]
async fn catalog_fails_when_either_request_fails() {
    let mock = MockApi::start().await;
    mock.fail("/users", 500);
    let client = client_for(&mock.base_url());

    let err = client.fetch_catalog().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn fetch_comments_sends_post_id_query() {
    let mock = MockApi::start().await;
    let client = client_for(&mock.base_url());

    let comments = client.fetch_comments(1).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert!(comments.iter().all(|c| c.post_id == 1));
    assert_eq!(comments[0].email.as_deref(), Some("a@example.com"));

    let requests = mock.captured_requests();
    let last = requests.last().unwrap();
    assert_eq!(last.method, "GET");
    assert_eq!(last.path, "/comments");
    assert_eq!(last.query.as_deref(), Some("postId=1"));
}

#[tokio::test]
async fn fetch_comments_drops_other_posts() {
    let mock = MockApi::start().await;
    // Server ignoring the query string still yields only this post's thread.
    mock.serve_raw(
        "/comments",
        &json!([
            { "postId": 1, "id": 1, "name": "a", "email": "a@x", "body": "x" },
            { "postId": 2, "id": 6, "name": "b", "email": "b@x", "body": "y" }
        ])
        .to_string(),
    );
    let client = client_for(&mock.base_url());

    let comments = client.fetch_comments(2).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].id, 6);
}

#[tokio::test]
async fn create_comment_posts_camel_case_body() {
    let mock = MockApi::start().await;
    let client = client_for(&mock.base_url());

    let created = client
        .create_comment(&NewComment {
            post_id: 3,
            name: "Ann".into(),
            email: "ann@example.com".into(),
            body: "Nice post".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 501);

    let requests = mock.captured_requests();
    let post = requests.iter().find(|r| r.method == "POST").unwrap();
    assert_eq!(post.path, "/comments");
    assert_eq!(
        post.json(),
        json!({
            "postId": 3,
            "name": "Ann",
            "email": "ann@example.com",
            "body": "Nice post"
        })
    );
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let mock = MockApi::start().await;
    mock.fail("/posts", 404);
    let client = client_for(&mock.base_url());

    let err = client.fetch_posts().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let mock = MockApi::start().await;
    mock.serve_raw("/posts", "{\"not\": \"a list\"}");
    let client = client_for(&mock.base_url());

    let err = client.fetch_posts().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_a_connect_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = client_for(&format!("http://{addr}"));

    let err = client.fetch_users().await.unwrap_err();
    assert!(
        matches!(err, ApiError::Connect { .. } | ApiError::Request { .. }),
        "got {err:?}"
    );
}
