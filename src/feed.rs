//! Derived post view: author filtering and pagination.
//!
//! Everything here is pure and cheap enough to run on every draw. The
//! engine never clamps the page it is given; the dashboard reducer keeps
//! the stored page inside `[1, total_pages]`.

use std::num::NonZeroUsize;

use crate::model::{Post, User, UserId};

/// Which author's posts are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorFilter {
    #[default]
    All,
    Author(UserId),
}

impl AuthorFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            AuthorFilter::All => true,
            AuthorFilter::Author(id) => post.user_id == *id,
        }
    }
}

/// One page of the filtered post list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisiblePosts<'a> {
    pub posts: Vec<&'a Post>,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// Order-preserving subsequence of `posts` matching `filter`.
pub fn filter_posts<'a>(posts: &'a [Post], filter: AuthorFilter) -> Vec<&'a Post> {
    posts.iter().filter(|post| filter.matches(post)).collect()
}

/// `max(1, ceil(count / page_size))`.
pub fn total_pages(count: usize, page_size: NonZeroUsize) -> usize {
    count.div_ceil(page_size.get()).max(1)
}

/// Clamp a 1-based page number into `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Compute the posts visible on `page` (1-based) for the given filter.
///
/// A page past the end yields an empty slice; page `0` reads as page 1.
pub fn compute_visible_posts(
    posts: &[Post],
    filter: AuthorFilter,
    page: usize,
    page_size: NonZeroUsize,
) -> VisiblePosts<'_> {
    let filtered = filter_posts(posts, filter);
    let total_matches = filtered.len();
    let size = page_size.get();
    let start = page.max(1).saturating_sub(1).saturating_mul(size);
    let visible = filtered.into_iter().skip(start).take(size).collect();

    VisiblePosts {
        posts: visible,
        total_pages: total_pages(total_matches, page_size),
        total_matches,
    }
}

/// Resolve an author's display name. Unknown authors have no name.
pub fn author_name(users: &[User], user_id: UserId) -> Option<&str> {
    users
        .iter()
        .find(|user| user.id == user_id)
        .map(|user| user.name.as_str())
}

/// First `max_chars` characters of a post body followed by `...`.
pub fn excerpt(body: &str, max_chars: usize) -> String {
    let mut out: String = body.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
