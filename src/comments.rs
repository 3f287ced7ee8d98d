//! Comment thread editing: drafts, validation, local add and remove.

use thiserror::Error;

use crate::model::{Comment, CommentId, CommentOrigin, NewComment, PostId};

/// A comment being written in the composer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentDraft {
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Why a draft cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Name is required")]
    MissingName,
    #[error("Email is required")]
    MissingEmail,
    #[error("Comment text is required")]
    MissingBody,
}

impl CommentDraft {
    /// Check required fields. Email is only required when the comment is
    /// sent to the server.
    pub fn validate(&self, require_email: bool) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }
        if require_email && self.email.trim().is_empty() {
            return Err(DraftError::MissingEmail);
        }
        if self.body.trim().is_empty() {
            return Err(DraftError::MissingBody);
        }
        Ok(())
    }

    pub fn to_request(&self, post_id: PostId) -> NewComment {
        NewComment {
            post_id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            body: self.body.trim().to_string(),
        }
    }
}

/// Append a comment built from `draft` to the thread of `post_id`.
///
/// A draft without a name or body leaves the list unchanged. The email
/// requirement for remote submission is checked before the request is made.
pub fn add_comment(
    existing: Vec<Comment>,
    draft: &CommentDraft,
    post_id: PostId,
    id: CommentId,
    origin: CommentOrigin,
) -> Vec<Comment> {
    if draft.validate(false).is_err() {
        return existing;
    }

    let email = draft.email.trim();
    let mut comments = existing;
    comments.push(Comment {
        id,
        post_id,
        name: draft.name.trim().to_string(),
        email: (!email.is_empty()).then(|| email.to_string()),
        body: draft.body.trim().to_string(),
        origin,
    });
    comments
}

/// Drop the comment with `id`. Unknown ids are ignored.
pub fn remove_comment(existing: Vec<Comment>, id: CommentId) -> Vec<Comment> {
    let mut comments = existing;
    comments.retain(|comment| comment.id != id);
    comments
}

/// Hands out list keys for comments added during the session.
///
/// Keys are strictly increasing and always above every id in the thread
/// they are allocated for, so they never collide with fetched comments.
/// Returns `None` once the id space above the thread is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalIdAllocator {
    last: CommentId,
}

impl LocalIdAllocator {
    pub fn next(&mut self, existing: &[Comment]) -> Option<CommentId> {
        let highest = existing.iter().map(|c| c.id).max().unwrap_or(0);
        let id = self.last.max(highest).checked_add(1)?;
        self.last = id;
        Some(id)
    }
}
