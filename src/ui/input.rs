use crate::ui::app::{App, PopupKind};
use crate::ui::dashboard::{DashboardIntent, DraftEdit, LoadState};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    if app.show_popup() {
        handle_popup_key(app, key);
        return;
    }

    if app.is_composing() {
        handle_composer_key(app, key);
        return;
    }

    if app.dashboard().detail().is_some() {
        handle_detail_key(app, key);
    } else {
        handle_listing_key(app, key);
    }
}

fn handle_popup_key(app: &mut App, key: KeyEvent) {
    match (app.popup_kind(), key.code) {
        (_, KeyCode::Esc) => app.close_popup(),
        (Some(PopupKind::AuthorPicker), KeyCode::Char('a')) => {
            app.toggle_popup(PopupKind::AuthorPicker);
        }
        (Some(PopupKind::AuthorPicker), KeyCode::Up | KeyCode::Char('k')) => {
            app.move_author_selection(-1)
        }
        (Some(PopupKind::AuthorPicker), KeyCode::Down | KeyCode::Char('j')) => {
            app.move_author_selection(1)
        }
        (Some(PopupKind::AuthorPicker), KeyCode::Enter) => {
            app.apply_author_selection();
            app.close_popup();
        }
        _ => {}
    }
}

fn handle_listing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        KeyCode::Char('r') => {
            if matches!(app.dashboard().load, LoadState::Failed { .. }) {
                app.request_catalog();
            }
        }
        KeyCode::Char('a') => {
            if app.dashboard().load == LoadState::Ready {
                app.toggle_popup(PopupKind::AuthorPicker);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => app.prev_page(),
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => app.next_page(),
        KeyCode::Home => app.dispatch(DashboardIntent::GoToPage(1)),
        KeyCode::End => {
            let last = app.dashboard().total_pages();
            app.dispatch(DashboardIntent::GoToPage(last));
        }
        KeyCode::Enter => app.open_highlighted_post(),
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => app.back(),
        KeyCode::Up | KeyCode::Char('k') => app.move_comment_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_comment_cursor(1),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_highlighted_comment(),
        KeyCode::Char('c') | KeyCode::Tab => app.focus_composer(),
        KeyCode::Char('r') => {
            if let Some(post_id) = app.dashboard().detail().map(|detail| detail.post_id) {
                app.select_post(post_id);
            }
        }
        _ => {}
    }
}

fn handle_composer_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.blur_composer(),
        KeyCode::Tab => app.dispatch(DashboardIntent::FocusNextField),
        KeyCode::BackTab => app.dispatch(DashboardIntent::FocusPrevField),
        KeyCode::Enter if key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
            app.insert_newline()
        }
        KeyCode::Enter => app.submit_comment(),
        KeyCode::Backspace => app.edit_draft(DraftEdit::Backspace),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.edit_draft(DraftEdit::Clear)
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.edit_draft(DraftEdit::Insert(ch))
        }
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
