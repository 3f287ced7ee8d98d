//! Mock blog API server for client and worker tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, Response, StatusCode};
use axum::routing::any;
use axum::Router;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// A captured request for assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Default)]
struct MockData {
    posts: Value,
    users: Value,
    comments: Value,
    /// Forced status per path, e.g. `"/users" -> 500`.
    failures: HashMap<String, u16>,
    /// Raw body per path, served instead of the fixture.
    raw: HashMap<String, String>,
    requests: Vec<CapturedRequest>,
}

#[derive(Clone)]
struct MockState {
    data: Arc<Mutex<MockData>>,
}

/// In-process HTTP server shaped like JSONPlaceholder.
pub struct MockApi {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockApi {
    /// Start with the default fixture (see [`fixture_posts`] and friends).
    pub async fn start() -> Self {
        let data = MockData {
            posts: fixture_posts(),
            users: fixture_users(),
            comments: fixture_comments(),
            ..MockData::default()
        };
        let state = MockState {
            data: Arc::new(Mutex::new(data)),
        };

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/{*path}", any(handle_request))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer every request to `path` with `status` and an error body.
    pub fn fail(&self, path: &str, status: u16) {
        self.state.data.lock().failures.insert(path.to_string(), status);
    }

    /// Answer `path` with `body` verbatim (status 200).
    pub fn serve_raw(&self, path: &str, body: &str) {
        self.state
            .data
            .lock()
            .raw
            .insert(path.to_string(), body.to_string());
    }

    pub fn set_comments(&self, comments: Value) {
        self.state.data.lock().comments = comments;
    }

    pub fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.state.data.lock().requests.clone()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

pub fn fixture_posts() -> Value {
    let posts: Vec<Value> = (1..=25)
        .map(|id| {
            json!({
                "userId": if id <= 12 { 1 } else { 2 },
                "id": id,
                "title": format!("post title {id}"),
                "body": format!("post body {id}\nsecond line"),
            })
        })
        .collect();
    Value::Array(posts)
}

pub fn fixture_users() -> Value {
    json!([
        {
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": { "city": "Gwenborough" }
        },
        {
            "id": 2,
            "name": "Ervin Howell",
            "username": "Antonette",
            "email": "Shanna@melissa.tv"
        }
    ])
}

pub fn fixture_comments() -> Value {
    json!([
        { "postId": 1, "id": 1, "name": "first", "email": "a@example.com", "body": "one" },
        { "postId": 1, "id": 2, "name": "second", "email": "b@example.com", "body": "two" },
        { "postId": 2, "id": 6, "name": "other", "email": "c@example.com", "body": "three" }
    ])
}

async fn handle_request(State(state): State<MockState>, req: Request<Body>) -> Response<Body> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);

    let body = axum::body::to_bytes(req.into_body(), 1024 * 1024)
        .await
        .unwrap_or_default()
        .to_vec();

    let mut data = state.data.lock();
    data.requests.push(CapturedRequest {
        method: method.to_string(),
        path: path.clone(),
        query: query.clone(),
        body: body.clone(),
    });

    if let Some(status) = data.failures.get(&path).copied() {
        return respond(status, json!({ "error": "mock failure" }).to_string());
    }
    if let Some(raw) = data.raw.get(&path) {
        return respond(200, raw.clone());
    }

    match (method, path.as_str()) {
        (Method::GET, "/posts") => respond(200, data.posts.to_string()),
        (Method::GET, "/users") => respond(200, data.users.to_string()),
        (Method::GET, "/comments") => {
            let post_id = query
                .as_deref()
                .and_then(|q| q.strip_prefix("postId="))
                .and_then(|id| id.parse::<u64>().ok());
            let filtered: Vec<Value> = data
                .comments
                .as_array()
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .filter(|c| post_id.is_none() || c["postId"].as_u64() == post_id)
                .collect();
            respond(200, Value::Array(filtered).to_string())
        }
        (Method::POST, "/comments") => {
            // Like JSONPlaceholder: echo the body with a fixed id.
            let mut echo: Value = serde_json::from_slice(&body).unwrap_or_else(|_| json!({}));
            echo["id"] = json!(501);
            respond(201, echo.to_string())
        }
        _ => respond(404, "{}".to_string()),
    }
}

fn respond(status: u16, body: String) -> Response<Body> {
    Response::builder()
        .status(StatusCode::from_u16(status).unwrap())
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}
