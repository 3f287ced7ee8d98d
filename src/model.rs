//! Wire types for the blog API.
//!
//! Field names follow the remote JSON (`userId`, `postId`); unknown fields
//! such as a user's address are ignored on decode.

use serde::{Deserialize, Serialize};

pub type PostId = u64;
pub type UserId = u64;
pub type CommentId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
}

/// Where a comment in the thread came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentOrigin {
    /// Loaded from the remote thread.
    #[default]
    Fetched,
    /// Added in this session and confirmed by the server.
    Saved { remote_id: CommentId },
    /// Added in this session; the create request failed.
    Unsaved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub body: String,
    #[serde(skip)]
    pub origin: CommentOrigin,
}

impl Comment {
    pub fn is_unsaved(&self) -> bool {
        self.origin == CommentOrigin::Unsaved
    }
}

/// Body of `POST /comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: PostId,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Server echo of a created comment. Only the assigned id is trusted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedComment {
    pub id: CommentId,
}
