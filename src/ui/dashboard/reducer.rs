use crate::comments::{add_comment, remove_comment, CommentDraft, LocalIdAllocator};
use crate::feed::clamp_page;
use crate::model::{Comment, CommentOrigin};
use crate::ui::dashboard::intent::{DashboardIntent, DraftEdit};
use crate::ui::dashboard::state::{
    CommentsState, ComposerState, DashboardState, FetchTicket, LoadState, PostDetail, Selection,
};
use crate::ui::mvi::Reducer;

const THREAD_FULL: &str = "Comment not added: no free comment id in this thread";

pub struct DashboardReducer;

impl Reducer for DashboardReducer {
    type State = DashboardState;
    type Intent = DashboardIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            DashboardIntent::CatalogRequested => DashboardState {
                load: LoadState::Loading,
                ..state
            },
            DashboardIntent::CatalogLoaded { posts, users } => {
                let state = DashboardState {
                    load: LoadState::Ready,
                    posts,
                    users,
                    cursor: 0,
                    ..state
                };
                with_clamped_page(state)
            }
            DashboardIntent::CatalogFailed { message } => DashboardState {
                load: LoadState::Failed { message },
                ..state
            },

            DashboardIntent::SelectAuthor(filter) => DashboardState {
                filter,
                page: 1,
                cursor: 0,
                ..state
            },
            DashboardIntent::NextPage => {
                let page = state.page.saturating_add(1);
                go_to_page(state, page)
            }
            DashboardIntent::PrevPage => {
                let page = state.page.saturating_sub(1);
                go_to_page(state, page)
            }
            DashboardIntent::GoToPage(page) => go_to_page(state, page),
            DashboardIntent::MoveCursor(delta) => {
                let len = state.visible().posts.len();
                let cursor = step(state.cursor, delta, len);
                DashboardState { cursor, ..state }
            }

            DashboardIntent::SelectPost { post_id } => {
                if !state.posts.iter().any(|post| post.id == post_id) {
                    return state;
                }
                let generation = state.generation + 1;
                DashboardState {
                    generation,
                    selection: Selection::Detail(PostDetail {
                        post_id,
                        generation,
                        comments: CommentsState::Loading,
                        comment_cursor: 0,
                        composer: ComposerState::default(),
                    }),
                    ..state
                }
            }
            DashboardIntent::Back => DashboardState {
                selection: Selection::Listing,
                ..state
            },
            DashboardIntent::CommentsLoaded { ticket, comments } => {
                update_current(state, ticket, |detail, _| {
                    // Never show another post's comments in this thread.
                    let comments = comments
                        .into_iter()
                        .filter(|comment| comment.post_id == detail.post_id)
                        .collect();
                    detail.comments = CommentsState::Loaded(comments);
                    detail.comment_cursor = 0;
                })
            }
            DashboardIntent::CommentsFailed { ticket, message } => {
                update_current(state, ticket, |detail, _| {
                    detail.comments = CommentsState::Failed { message };
                })
            }
            DashboardIntent::MoveCommentCursor(delta) => update_detail(state, |detail| {
                let len = detail.comments.comments().map_or(0, <[Comment]>::len);
                detail.comment_cursor = step(detail.comment_cursor, delta, len);
            }),
            DashboardIntent::DeleteComment { id } => update_detail(state, |detail| {
                if let CommentsState::Loaded(comments) = &mut detail.comments {
                    let remaining = remove_comment(std::mem::take(comments), id);
                    detail.comment_cursor =
                        detail.comment_cursor.min(remaining.len().saturating_sub(1));
                    *comments = remaining;
                }
            }),

            DashboardIntent::FocusComposer => update_detail(state, |detail| {
                detail.composer.focused = true;
            }),
            DashboardIntent::BlurComposer => update_detail(state, |detail| {
                detail.composer.focused = false;
            }),
            DashboardIntent::FocusNextField => update_detail(state, |detail| {
                detail.composer.field = detail.composer.field.next();
            }),
            DashboardIntent::FocusPrevField => update_detail(state, |detail| {
                detail.composer.field = detail.composer.field.prev();
            }),
            DashboardIntent::EditDraft(edit) => update_detail(state, |detail| {
                let composer = &mut detail.composer;
                if composer.submitting {
                    return;
                }
                let value = composer.field_mut();
                match edit {
                    DraftEdit::Insert(ch) => value.push(ch),
                    DraftEdit::InsertStr(text) => value.push_str(&text),
                    DraftEdit::Backspace => {
                        value.pop();
                    }
                    DraftEdit::Clear => value.clear(),
                }
                composer.notice = None;
            }),
            DashboardIntent::SubmitRejected { reason } => update_detail(state, |detail| {
                detail.composer.notice = Some(reason);
            }),
            DashboardIntent::SubmitStarted => update_detail(state, |detail| {
                detail.composer.submitting = true;
                detail.composer.notice = None;
            }),
            DashboardIntent::CommentCreated {
                ticket,
                draft,
                remote_id,
            } => update_current(state, ticket, |detail, local_ids| {
                if append_comment(detail, local_ids, &draft, CommentOrigin::Saved { remote_id }) {
                    detail.composer.draft = CommentDraft::default();
                    detail.composer.notice = None;
                } else {
                    detail.composer.notice = Some(THREAD_FULL.to_string());
                }
            }),
            DashboardIntent::CommentCreateFailed {
                ticket,
                draft,
                message,
                keep_local,
            } => update_current(state, ticket, |detail, local_ids| {
                if !keep_local {
                    detail.composer.notice = Some(format!("Comment not added: {}", message));
                } else if append_comment(detail, local_ids, &draft, CommentOrigin::Unsaved) {
                    detail.composer.draft = CommentDraft::default();
                    detail.composer.notice = Some(format!("Saved locally only: {}", message));
                } else {
                    detail.composer.notice = Some(THREAD_FULL.to_string());
                }
            }),
        }
    }
}

fn go_to_page(state: DashboardState, page: usize) -> DashboardState {
    let page = clamp_page(page, state.total_pages());
    let cursor = if page == state.page { state.cursor } else { 0 };
    DashboardState {
        page,
        cursor,
        ..state
    }
}

fn with_clamped_page(state: DashboardState) -> DashboardState {
    let page = clamp_page(state.page, state.total_pages());
    DashboardState { page, ..state }
}

/// Move an index by `delta` inside `0..len` without wrapping.
fn step(current: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let magnitude = delta.unsigned_abs() as usize;
    let next = if delta.is_negative() {
        current.saturating_sub(magnitude)
    } else {
        current.saturating_add(magnitude)
    };
    next.min(len - 1)
}

fn update_detail(mut state: DashboardState, apply: impl FnOnce(&mut PostDetail)) -> DashboardState {
    if let Selection::Detail(detail) = &mut state.selection {
        apply(detail);
    }
    state
}

/// Apply a response only if it belongs to the post that is open now.
fn update_current(
    mut state: DashboardState,
    ticket: FetchTicket,
    apply: impl FnOnce(&mut PostDetail, &mut LocalIdAllocator),
) -> DashboardState {
    match &mut state.selection {
        Selection::Detail(detail) if detail.ticket() == ticket => {
            apply(detail, &mut state.local_ids);
            detail.composer.submitting = false;
        }
        _ => {
            tracing::debug!(
                post_id = ticket.post_id,
                generation = ticket.generation,
                "Dropping response for a post that is no longer open"
            );
        }
    }
    state
}

fn append_comment(
    detail: &mut PostDetail,
    local_ids: &mut LocalIdAllocator,
    draft: &CommentDraft,
    origin: CommentOrigin,
) -> bool {
    // A thread that failed to load is treated as empty.
    if matches!(detail.comments, CommentsState::Failed { .. }) {
        detail.comments = CommentsState::Loaded(Vec::new());
    }
    if let CommentsState::Loaded(comments) = &mut detail.comments {
        let Some(id) = local_ids.next(comments) else {
            tracing::warn!(post_id = detail.post_id, "No local comment id left; comment not added");
            return false;
        };
        *comments = add_comment(std::mem::take(comments), draft, detail.post_id, id, origin);
        return true;
    }
    false
}
