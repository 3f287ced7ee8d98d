use crate::ui::app::App;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Key hints on the left, a status note on the right.
#[derive(Default)]
pub struct Footer;

impl Footer {
    pub fn new() -> Self {
        Self
    }

    pub fn hints(app: &App) -> &'static str {
        if app.show_popup() {
            " ↑/↓: Move │ Enter: Apply │ Esc: Close"
        } else if app.is_composing() {
            " Tab: Next field │ Enter: Submit │ Shift+Enter: New line │ Esc: Done │ Ctrl+U: Clear"
        } else if app.dashboard().detail().is_some() {
            " ↑/↓: Comments │ c: Comment │ d: Delete │ r: Reload │ Esc: Back │ q: Quit"
        } else {
            " ↑/↓: Move │ Enter: Read │ ←/→: Page │ a: Author │ r: Retry │ q: Quit"
        }
    }

    fn status(app: &App) -> (String, Style) {
        if let Some(err) = app.last_command_error() {
            return (format!("{err} "), Style::default().fg(STATUS_ERROR));
        }
        let dim = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let state = app.dashboard();
        let note = match state.detail() {
            Some(detail) => match detail.comments.comments() {
                Some(comments) => format!("{} comments ", comments.len()),
                None => String::new(),
            },
            None => {
                let shown = state.visible().posts.len();
                if shown == 0 {
                    String::new()
                } else {
                    format!("{}/{} ", state.cursor + 1, shown)
                }
            }
        };
        (note, dim)
    }

    pub fn widget(&self, app: &App, area: Rect) -> Paragraph<'static> {
        let hint_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let hints = Self::hints(app);
        let (status, status_style) = Self::status(app);

        // Width in chars; the hints contain multi-byte arrows.
        let inner = area.width.saturating_sub(2) as usize;
        let gap = inner
            .saturating_sub(hints.chars().count())
            .saturating_sub(status.chars().count());

        Paragraph::new(Line::from(vec![
            Span::styled(hints, hint_style),
            Span::raw(" ".repeat(gap)),
            Span::styled(status, status_style),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
