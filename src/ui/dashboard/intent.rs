use crate::comments::CommentDraft;
use crate::feed::AuthorFilter;
use crate::model::{Comment, CommentId, Post, PostId, User};
use crate::ui::dashboard::state::FetchTicket;
use crate::ui::mvi::Intent;

/// Keyboard edit applied to the focused composer field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    Insert(char),
    InsertStr(String),
    Backspace,
    Clear,
}

#[derive(Debug, Clone)]
pub enum DashboardIntent {
    /// A posts/users load was dispatched.
    CatalogRequested,
    CatalogLoaded { posts: Vec<Post>, users: Vec<User> },
    CatalogFailed { message: String },

    /// Change the author filter. Always returns to page 1.
    SelectAuthor(AuthorFilter),
    NextPage,
    PrevPage,
    GoToPage(usize),
    /// Move the highlighted row on the current page.
    MoveCursor(i32),

    /// Open a post. Starts a new comment-fetch generation.
    SelectPost { post_id: PostId },
    /// Return to the list, keeping filter and page.
    Back,
    CommentsLoaded { ticket: FetchTicket, comments: Vec<Comment> },
    CommentsFailed { ticket: FetchTicket, message: String },
    MoveCommentCursor(i32),
    DeleteComment { id: CommentId },

    FocusComposer,
    BlurComposer,
    FocusNextField,
    FocusPrevField,
    EditDraft(DraftEdit),
    /// Submission refused before any request was made.
    SubmitRejected { reason: String },
    SubmitStarted,
    CommentCreated {
        ticket: FetchTicket,
        draft: CommentDraft,
        remote_id: CommentId,
    },
    /// Create request failed. With `keep_local` the comment is kept in the
    /// thread marked unsaved; otherwise the thread is left untouched.
    CommentCreateFailed {
        ticket: FetchTicket,
        draft: CommentDraft,
        message: String,
        keep_local: bool,
    },
}

impl Intent for DashboardIntent {}
