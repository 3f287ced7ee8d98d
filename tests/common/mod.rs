//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_api;

use blogify::api::ApiClient;
use blogify::config::{ApiConfig, Config};
use blogify::model::{Comment, CommentOrigin, Post, User};
use blogify::ui::app::App;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `content` to a `config.toml` inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn client_for(base_url: &str) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    };
    ApiClient::new(&config).expect("Failed to build client")
}

// -- Fixtures -----------------------------------------------------------------

pub fn post(id: u64, user_id: u64) -> Post {
    Post {
        id,
        user_id,
        title: format!("post {id}"),
        body: format!("body of post {id}"),
    }
}

pub fn user(id: u64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        username: name.to_lowercase(),
    }
}

pub fn comment(id: u64, post_id: u64) -> Comment {
    Comment {
        id,
        post_id,
        name: format!("commenter {id}"),
        email: Some(format!("c{id}@example.com")),
        body: format!("comment {id}"),
        origin: CommentOrigin::Fetched,
    }
}

/// 25 posts: ids 1..=12 by user 1, 13..=25 by user 2.
pub fn sample_posts() -> Vec<Post> {
    (1..=25)
        .map(|id| post(id, if id <= 12 { 1 } else { 2 }))
        .collect()
}

pub fn sample_users() -> Vec<User> {
    vec![user(1, "Ann"), user(2, "Bo")]
}

// -- App helpers --------------------------------------------------------------

pub fn make_app() -> App {
    App::new(&Config::default())
}
