use std::num::NonZeroUsize;

use crate::comments::{CommentDraft, LocalIdAllocator};
use crate::feed::{self, AuthorFilter, VisiblePosts};
use crate::model::{Comment, Post, PostId, User};
use crate::ui::mvi::UiState;

const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Progress of the initial posts/users load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed { message: String },
}

/// Identifies one comment fetch. Responses carrying a ticket that no
/// longer matches the open post are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub post_id: PostId,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CommentsState {
    #[default]
    Loading,
    Loaded(Vec<Comment>),
    Failed { message: String },
}

impl CommentsState {
    pub fn comments(&self) -> Option<&[Comment]> {
        match self {
            CommentsState::Loaded(comments) => Some(comments),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposerField {
    #[default]
    Name,
    Email,
    Body,
}

impl ComposerField {
    pub fn next(self) -> Self {
        match self {
            ComposerField::Name => ComposerField::Email,
            ComposerField::Email => ComposerField::Body,
            ComposerField::Body => ComposerField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ComposerField::Name => ComposerField::Body,
            ComposerField::Email => ComposerField::Name,
            ComposerField::Body => ComposerField::Email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposerState {
    pub draft: CommentDraft,
    pub field: ComposerField,
    /// Keyboard input goes to the draft while true.
    pub focused: bool,
    /// A create request is in flight; the draft is frozen.
    pub submitting: bool,
    /// Last validation or submission problem.
    pub notice: Option<String>,
}

impl ComposerState {
    pub fn field_value(&self, field: ComposerField) -> &str {
        match field {
            ComposerField::Name => &self.draft.name,
            ComposerField::Email => &self.draft.email,
            ComposerField::Body => &self.draft.body,
        }
    }

    pub(super) fn field_mut(&mut self) -> &mut String {
        match self.field {
            ComposerField::Name => &mut self.draft.name,
            ComposerField::Email => &mut self.draft.email,
            ComposerField::Body => &mut self.draft.body,
        }
    }
}

/// The open post and its comment thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub post_id: PostId,
    pub generation: u64,
    pub comments: CommentsState,
    pub comment_cursor: usize,
    pub composer: ComposerState,
}

impl PostDetail {
    pub fn ticket(&self) -> FetchTicket {
        FetchTicket {
            post_id: self.post_id,
            generation: self.generation,
        }
    }

    pub fn highlighted_comment(&self) -> Option<&Comment> {
        self.comments.comments()?.get(self.comment_cursor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Listing,
    Detail(PostDetail),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    pub load: LoadState,
    pub posts: Vec<Post>,
    pub users: Vec<User>,
    pub filter: AuthorFilter,
    /// 1-based, kept inside `[1, total_pages]`.
    pub page: usize,
    pub page_size: NonZeroUsize,
    /// Highlighted row on the current page.
    pub cursor: usize,
    pub selection: Selection,
    /// Last comment-fetch generation handed out.
    pub generation: u64,
    pub local_ids: LocalIdAllocator,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            load: LoadState::default(),
            posts: Vec::new(),
            users: Vec::new(),
            filter: AuthorFilter::All,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            cursor: 0,
            selection: Selection::Listing,
            generation: 0,
            local_ids: LocalIdAllocator::default(),
        }
    }
}

impl UiState for DashboardState {}

impl DashboardState {
    pub fn with_page_size(page_size: NonZeroUsize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Posts on the current page.
    pub fn visible(&self) -> VisiblePosts<'_> {
        feed::compute_visible_posts(&self.posts, self.filter, self.page, self.page_size)
    }

    pub fn total_pages(&self) -> usize {
        feed::total_pages(
            feed::filter_posts(&self.posts, self.filter).len(),
            self.page_size,
        )
    }

    pub fn highlighted_post(&self) -> Option<&Post> {
        self.visible().posts.get(self.cursor).copied()
    }

    pub fn detail(&self) -> Option<&PostDetail> {
        match &self.selection {
            Selection::Detail(detail) => Some(detail),
            Selection::Listing => None,
        }
    }

    pub fn selected_post(&self) -> Option<&Post> {
        let detail = self.detail()?;
        self.posts.iter().find(|post| post.id == detail.post_id)
    }

    /// Comments of the open post, once loaded.
    pub fn comments(&self) -> Option<&[Comment]> {
        self.detail()?.comments.comments()
    }

    pub fn fetch_ticket(&self) -> Option<FetchTicket> {
        self.detail().map(PostDetail::ticket)
    }

    pub fn author_name(&self, post: &Post) -> Option<&str> {
        feed::author_name(&self.users, post.user_id)
    }

    pub fn is_composing(&self) -> bool {
        self.detail().is_some_and(|detail| detail.composer.focused)
    }
}
