use tokio::sync::mpsc;

use crate::comments::CommentDraft;
use crate::config::Config;
use crate::feed::AuthorFilter;
use crate::model::User;
use crate::ui::dashboard::{
    CommentsState, ComposerField, DashboardIntent, DashboardReducer, DashboardState, DraftEdit,
    FetchTicket,
};
use crate::ui::events::ApiEvent;
use crate::ui::mvi::Reducer;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PopupKind {
    AuthorPicker,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Focus {
    Dashboard,
    Popup(PopupKind),
}

/// Work the UI hands to the command worker.
#[derive(Debug)]
pub enum UiCommand {
    LoadCatalog,
    FetchComments { ticket: FetchTicket },
    CreateComment {
        ticket: FetchTicket,
        draft: CommentDraft,
    },
}

pub type UiCommandSender = mpsc::Sender<UiCommand>;

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App {
    should_quit: bool,
    focus: Focus,
    /// View state (MVI pattern).
    dashboard: DashboardState,
    /// Row in the author picker; 0 is "All Authors".
    author_selection: usize,
    command_sender: Option<UiCommandSender>,
    last_command_error: Option<String>,
    fallback_to_local: bool,
    excerpt_chars: usize,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            focus: Focus::Dashboard,
            dashboard: DashboardState::with_page_size(config.view.page_size()),
            author_selection: 0,
            command_sender: None,
            last_command_error: None,
            fallback_to_local: config.comments.fallback_to_local,
            excerpt_chars: config.view.excerpt_chars,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    pub fn excerpt_chars(&self) -> usize {
        self.excerpt_chars
    }

    pub fn show_popup(&self) -> bool {
        matches!(self.focus, Focus::Popup(_))
    }

    pub fn popup_kind(&self) -> Option<PopupKind> {
        match self.focus {
            Focus::Popup(kind) => Some(kind),
            Focus::Dashboard => None,
        }
    }

    pub fn toggle_popup(&mut self, kind: PopupKind) -> bool {
        self.focus = match self.focus {
            Focus::Popup(active) if active == kind => Focus::Dashboard,
            _ => {
                if kind == PopupKind::AuthorPicker {
                    self.reset_author_selection();
                }
                Focus::Popup(kind)
            }
        };
        matches!(self.focus, Focus::Popup(_))
    }

    pub fn close_popup(&mut self) {
        self.focus = Focus::Dashboard;
    }

    pub fn set_command_sender(&mut self, sender: UiCommandSender) {
        self.command_sender = Some(sender);
    }

    pub fn last_command_error(&self) -> Option<&str> {
        self.last_command_error.as_deref()
    }

    /// Dispatch an intent to the dashboard reducer.
    pub fn dispatch(&mut self, intent: DashboardIntent) {
        dispatch_mvi!(self, dashboard, DashboardReducer, intent);
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// (Re)load posts and users.
    pub fn request_catalog(&mut self) {
        self.dispatch(DashboardIntent::CatalogRequested);
        if !self.send_command(UiCommand::LoadCatalog) {
            let message = self
                .last_command_error
                .clone()
                .unwrap_or_else(|| "Data source unavailable".to_string());
            self.dispatch(DashboardIntent::CatalogFailed { message });
        }
    }

    // ========================================================================
    // Author filter
    // ========================================================================

    pub fn users(&self) -> &[User] {
        &self.dashboard.users
    }

    pub fn author_selection(&self) -> usize {
        self.author_selection
    }

    pub fn move_author_selection(&mut self, direction: i32) {
        // One extra row for "All Authors".
        let len = self.dashboard.users.len() + 1;
        let current = self.author_selection.min(len - 1);
        self.author_selection = if direction.is_negative() {
            if current == 0 {
                len - 1
            } else {
                current - 1
            }
        } else if current + 1 >= len {
            0
        } else {
            current + 1
        };
    }

    /// Apply the highlighted picker row as the author filter.
    pub fn apply_author_selection(&mut self) {
        let filter = match self.author_selection {
            0 => AuthorFilter::All,
            index => match self.dashboard.users.get(index - 1) {
                Some(user) => AuthorFilter::Author(user.id),
                None => AuthorFilter::All,
            },
        };
        self.select_author(filter);
    }

    pub fn select_author(&mut self, filter: AuthorFilter) {
        tracing::debug!(?filter, "Author filter changed");
        self.dispatch(DashboardIntent::SelectAuthor(filter));
    }

    fn reset_author_selection(&mut self) {
        self.author_selection = match self.dashboard.filter {
            AuthorFilter::All => 0,
            AuthorFilter::Author(id) => self
                .dashboard
                .users
                .iter()
                .position(|user| user.id == id)
                .map_or(0, |index| index + 1),
        };
    }

    // ========================================================================
    // Listing
    // ========================================================================

    pub fn next_page(&mut self) {
        self.dispatch(DashboardIntent::NextPage);
    }

    pub fn prev_page(&mut self) {
        self.dispatch(DashboardIntent::PrevPage);
    }

    pub fn move_cursor(&mut self, delta: i32) {
        self.dispatch(DashboardIntent::MoveCursor(delta));
    }

    pub fn open_highlighted_post(&mut self) {
        if let Some(post_id) = self.dashboard.highlighted_post().map(|post| post.id) {
            self.select_post(post_id);
        }
    }

    /// Open a post and fetch its comments.
    pub fn select_post(&mut self, post_id: u64) {
        self.dispatch(DashboardIntent::SelectPost { post_id });
        let Some(ticket) = self.dashboard.fetch_ticket() else {
            return;
        };
        if ticket.post_id != post_id {
            return;
        }
        if !self.send_command(UiCommand::FetchComments { ticket }) {
            let message = self
                .last_command_error
                .clone()
                .unwrap_or_else(|| "Data source unavailable".to_string());
            self.dispatch(DashboardIntent::CommentsFailed { ticket, message });
        }
    }

    // ========================================================================
    // Detail
    // ========================================================================

    pub fn back(&mut self) {
        self.dispatch(DashboardIntent::Back);
    }

    pub fn move_comment_cursor(&mut self, delta: i32) {
        self.dispatch(DashboardIntent::MoveCommentCursor(delta));
    }

    pub fn delete_highlighted_comment(&mut self) {
        let id = self
            .dashboard
            .detail()
            .and_then(|detail| detail.highlighted_comment())
            .map(|comment| comment.id);
        if let Some(id) = id {
            self.dispatch(DashboardIntent::DeleteComment { id });
        }
    }

    pub fn is_composing(&self) -> bool {
        self.dashboard.is_composing()
    }

    pub fn focus_composer(&mut self) {
        self.dispatch(DashboardIntent::FocusComposer);
    }

    pub fn blur_composer(&mut self) {
        self.dispatch(DashboardIntent::BlurComposer);
    }

    pub fn edit_draft(&mut self, edit: DraftEdit) {
        self.dispatch(DashboardIntent::EditDraft(edit));
    }

    /// Field the composer cursor is in, while composing.
    pub fn composer_field(&self) -> Option<ComposerField> {
        self.dashboard
            .detail()
            .filter(|detail| detail.composer.focused)
            .map(|detail| detail.composer.field)
    }

    /// Start a new line in the comment body. Other fields are single-line.
    pub fn insert_newline(&mut self) {
        if self.composer_field() == Some(ComposerField::Body) {
            self.edit_draft(DraftEdit::Insert('\n'));
        }
    }

    pub fn on_paste(&mut self, text: &str) {
        let Some(field) = self.composer_field() else {
            return;
        };
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let keep_newlines = field == ComposerField::Body;
        let text: String = text
            .chars()
            .filter(|ch| !ch.is_control() || (keep_newlines && *ch == '\n'))
            .collect();
        self.edit_draft(DraftEdit::InsertStr(text));
    }

    /// Validate the draft and send it to the server.
    pub fn submit_comment(&mut self) {
        let Some(detail) = self.dashboard.detail() else {
            return;
        };
        if detail.composer.submitting {
            return;
        }
        // A thread that failed to load still accepts new comments.
        if matches!(detail.comments, CommentsState::Loading) {
            self.dispatch(DashboardIntent::SubmitRejected {
                reason: "Comments are not loaded yet".to_string(),
            });
            return;
        }
        if let Err(err) = detail.composer.draft.validate(true) {
            self.dispatch(DashboardIntent::SubmitRejected {
                reason: err.to_string(),
            });
            return;
        }

        let ticket = detail.ticket();
        let draft = detail.composer.draft.clone();
        self.dispatch(DashboardIntent::SubmitStarted);
        if !self.send_command(UiCommand::CreateComment {
            ticket,
            draft: draft.clone(),
        }) {
            let message = self
                .last_command_error
                .clone()
                .unwrap_or_else(|| "Data source unavailable".to_string());
            self.dispatch(DashboardIntent::CommentCreateFailed {
                ticket,
                draft,
                message,
                keep_local: self.fallback_to_local,
            });
        }
    }

    // ========================================================================
    // Worker results
    // ========================================================================

    pub fn on_api_event(&mut self, event: ApiEvent) {
        let intent = match event {
            ApiEvent::CatalogLoaded(catalog) => DashboardIntent::CatalogLoaded {
                posts: catalog.posts,
                users: catalog.users,
            },
            ApiEvent::CatalogFailed { message } => DashboardIntent::CatalogFailed { message },
            ApiEvent::CommentsLoaded { ticket, comments } => {
                DashboardIntent::CommentsLoaded { ticket, comments }
            }
            ApiEvent::CommentsFailed { ticket, message } => {
                DashboardIntent::CommentsFailed { ticket, message }
            }
            ApiEvent::CommentCreated {
                ticket,
                draft,
                remote_id,
            } => DashboardIntent::CommentCreated {
                ticket,
                draft,
                remote_id,
            },
            ApiEvent::CommentCreateFailed {
                ticket,
                draft,
                message,
            } => DashboardIntent::CommentCreateFailed {
                ticket,
                draft,
                message,
                keep_local: self.fallback_to_local,
            },
        };
        self.dispatch(intent);
    }

    fn send_command(&mut self, command: UiCommand) -> bool {
        let Some(sender) = &self.command_sender else {
            return false;
        };

        match sender.try_send(command) {
            Ok(()) => {
                self.last_command_error = None;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Command send failed");
                self.last_command_error = Some(format!("Command send failed: {}", err));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Comment, CommentOrigin, Post};

    fn make_app() -> (App, mpsc::Receiver<UiCommand>) {
        let mut app = App::new(&Config::default());
        let (tx, rx) = mpsc::channel(16);
        app.set_command_sender(tx);
        (app, rx)
    }

    fn post(id: u64, user_id: u64) -> Post {
        Post {
            id,
            user_id,
            title: format!("post {id}"),
            body: "body".into(),
        }
    }

    fn user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.into(),
            username: name.to_lowercase(),
        }
    }

    fn loaded_app() -> (App, mpsc::Receiver<UiCommand>) {
        let (mut app, rx) = make_app();
        app.dispatch(DashboardIntent::CatalogLoaded {
            posts: (1..=25).map(|id| post(id, if id % 2 == 0 { 8 } else { 7 })).collect(),
            users: vec![user(7, "Ann"), user(8, "Bo")],
        });
        (app, rx)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.edit_draft(DraftEdit::Insert(ch));
        }
    }

    #[test]
    fn request_catalog_sends_load_command() {
        let (mut app, mut rx) = make_app();
        app.request_catalog();
        assert!(matches!(rx.try_recv(), Ok(UiCommand::LoadCatalog)));
    }

    #[test]
    fn request_catalog_without_worker_fails_visibly() {
        let mut app = App::new(&Config::default());
        app.request_catalog();
        assert!(matches!(
            app.dashboard().load,
            crate::ui::dashboard::LoadState::Failed { .. }
        ));
    }

    #[test]
    fn select_post_fetches_comments_with_ticket() {
        let (mut app, mut rx) = loaded_app();
        app.select_post(5);
        match rx.try_recv() {
            Ok(UiCommand::FetchComments { ticket }) => {
                assert_eq!(ticket.post_id, 5);
                assert_eq!(Some(ticket), app.dashboard().fetch_ticket());
            }
            other => panic!("expected FetchComments, got {other:?}"),
        }
    }

    #[test]
    fn selecting_unknown_post_sends_nothing() {
        let (mut app, mut rx) = loaded_app();
        app.select_post(999);
        assert!(rx.try_recv().is_err());
        assert!(app.dashboard().detail().is_none());
    }

    #[test]
    fn author_picker_applies_filter_and_resets_page() {
        let (mut app, _rx) = loaded_app();
        app.next_page();
        assert_eq!(app.dashboard().page, 2);

        app.toggle_popup(PopupKind::AuthorPicker);
        app.move_author_selection(1);
        app.apply_author_selection();

        assert_eq!(app.dashboard().filter, AuthorFilter::Author(7));
        assert_eq!(app.dashboard().page, 1);
    }

    #[test]
    fn author_picker_wraps_around() {
        let (mut app, _rx) = loaded_app();
        app.toggle_popup(PopupKind::AuthorPicker);
        app.move_author_selection(-1);
        assert_eq!(app.author_selection(), 2);
        app.move_author_selection(1);
        assert_eq!(app.author_selection(), 0);
    }

    #[test]
    fn reopening_picker_highlights_current_filter() {
        let (mut app, _rx) = loaded_app();
        app.select_author(AuthorFilter::Author(8));
        app.toggle_popup(PopupKind::AuthorPicker);
        assert_eq!(app.author_selection(), 2);
    }

    #[test]
    fn submit_with_missing_email_is_rejected_without_request() {
        let (mut app, mut rx) = loaded_app();
        app.select_post(1);
        let ticket = match rx.try_recv() {
            Ok(UiCommand::FetchComments { ticket }) => ticket,
            other => panic!("expected FetchComments, got {other:?}"),
        };
        app.dispatch(DashboardIntent::CommentsLoaded {
            ticket,
            comments: Vec::new(),
        });

        app.focus_composer();
        type_text(&mut app, "Ann");
        app.submit_comment();

        assert!(rx.try_recv().is_err());
        let detail = app.dashboard().detail().unwrap();
        assert_eq!(detail.composer.notice.as_deref(), Some("Email is required"));
        assert!(!detail.composer.submitting);
    }

    #[test]
    fn submit_sends_create_command() {
        let (mut app, mut rx) = loaded_app();
        app.select_post(1);
        let ticket = match rx.try_recv() {
            Ok(UiCommand::FetchComments { ticket }) => ticket,
            other => panic!("expected FetchComments, got {other:?}"),
        };
        app.dispatch(DashboardIntent::CommentsLoaded {
            ticket,
            comments: Vec::new(),
        });

        app.focus_composer();
        type_text(&mut app, "Ann");
        app.dispatch(DashboardIntent::FocusNextField);
        type_text(&mut app, "ann@example.com");
        app.dispatch(DashboardIntent::FocusNextField);
        type_text(&mut app, "Nice post");
        app.submit_comment();

        match rx.try_recv() {
            Ok(UiCommand::CreateComment { ticket: sent, draft }) => {
                assert_eq!(sent, ticket);
                assert_eq!(draft.body, "Nice post");
            }
            other => panic!("expected CreateComment, got {other:?}"),
        }
        assert!(app.dashboard().detail().unwrap().composer.submitting);
    }

    #[test]
    fn failed_create_keeps_comment_locally_by_default() {
        let (mut app, mut rx) = loaded_app();
        app.select_post(1);
        let ticket = match rx.try_recv() {
            Ok(UiCommand::FetchComments { ticket }) => ticket,
            other => panic!("expected FetchComments, got {other:?}"),
        };
        app.dispatch(DashboardIntent::CommentsLoaded {
            ticket,
            comments: Vec::new(),
        });

        app.on_api_event(ApiEvent::CommentCreateFailed {
            ticket,
            draft: CommentDraft {
                name: "Ann".into(),
                email: "ann@example.com".into(),
                body: "hello".into(),
            },
            message: "Could not reach the server".into(),
        });

        let comments: &[Comment] = app.dashboard().comments().unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].origin, CommentOrigin::Unsaved);
    }

    #[test]
    fn failed_create_without_fallback_leaves_thread_untouched() {
        let mut config = Config::default();
        config.comments.fallback_to_local = false;
        let mut app = App::new(&config);
        app.dispatch(DashboardIntent::CatalogLoaded {
            posts: vec![post(1, 7)],
            users: vec![user(7, "Ann")],
        });
        app.dispatch(DashboardIntent::SelectPost { post_id: 1 });
        let ticket = app.dashboard().fetch_ticket().unwrap();
        app.dispatch(DashboardIntent::CommentsLoaded {
            ticket,
            comments: Vec::new(),
        });

        app.on_api_event(ApiEvent::CommentCreateFailed {
            ticket,
            draft: CommentDraft {
                name: "Ann".into(),
                email: "ann@example.com".into(),
                body: "hello".into(),
            },
            message: "timeout".into(),
        });

        assert!(app.dashboard().comments().unwrap().is_empty());
        let notice = app.dashboard().detail().unwrap().composer.notice.clone();
        assert_eq!(notice.as_deref(), Some("Comment not added: timeout"));
    }

    #[test]
    fn paste_only_lands_in_composer() {
        let (mut app, _rx) = loaded_app();
        app.dispatch(DashboardIntent::SelectPost { post_id: 1 });
        app.on_paste("ignored");
        assert_eq!(app.dashboard().detail().unwrap().composer.draft.name, "");

        app.focus_composer();
        app.on_paste("Ann\n");
        assert_eq!(app.dashboard().detail().unwrap().composer.draft.name, "Ann");
    }

    #[test]
    fn body_keeps_pasted_and_typed_newlines() {
        let (mut app, _rx) = loaded_app();
        app.dispatch(DashboardIntent::SelectPost { post_id: 1 });
        app.focus_composer();
        app.insert_newline();
        assert_eq!(app.dashboard().detail().unwrap().composer.draft.name, "");

        app.dispatch(DashboardIntent::FocusNextField);
        app.dispatch(DashboardIntent::FocusNextField);
        app.on_paste("first\r\nsecond");
        app.insert_newline();
        type_text(&mut app, "third");
        assert_eq!(
            app.dashboard().detail().unwrap().composer.draft.body,
            "first\nsecond\nthird"
        );
    }

    #[test]
    fn submit_after_failed_comment_fetch_sends_create() {
        let (mut app, mut rx) = loaded_app();
        app.select_post(1);
        let ticket = match rx.try_recv() {
            Ok(UiCommand::FetchComments { ticket }) => ticket,
            other => panic!("expected FetchComments, got {other:?}"),
        };
        app.dispatch(DashboardIntent::CommentsFailed {
            ticket,
            message: "Could not reach the server".into(),
        });

        app.focus_composer();
        type_text(&mut app, "Ann");
        app.dispatch(DashboardIntent::FocusNextField);
        type_text(&mut app, "ann@example.com");
        app.dispatch(DashboardIntent::FocusNextField);
        type_text(&mut app, "hello");
        app.submit_comment();

        assert!(matches!(rx.try_recv(), Ok(UiCommand::CreateComment { .. })));
        assert_eq!(app.dashboard().detail().unwrap().composer.notice, None);

        app.on_api_event(ApiEvent::CommentCreateFailed {
            ticket,
            draft: CommentDraft {
                name: "Ann".into(),
                email: "ann@example.com".into(),
                body: "hello".into(),
            },
            message: "Could not reach the server".into(),
        });
        let comments = app.dashboard().comments().unwrap();
        assert_eq!(comments.len(), 1);
        assert!(comments[0].is_unsaved());
    }

    #[test]
    fn submit_while_comments_loading_is_rejected() {
        let (mut app, mut rx) = loaded_app();
        app.select_post(1);
        let _ = rx.try_recv();
        app.focus_composer();
        type_text(&mut app, "Ann");
        app.submit_comment();
        assert!(rx.try_recv().is_err());
        let notice = app.dashboard().detail().unwrap().composer.notice.clone();
        assert_eq!(notice.as_deref(), Some("Comments are not loaded yet"));
    }
}
