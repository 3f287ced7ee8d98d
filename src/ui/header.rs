use crate::feed::AuthorFilter;
use crate::ui::dashboard::DashboardState;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, MUTED_TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, state: &DashboardState) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);

        let author = match state.filter {
            AuthorFilter::All => "All Authors".to_string(),
            AuthorFilter::Author(id) => crate::feed::author_name(&state.users, id)
                .unwrap_or("Unknown")
                .to_string(),
        };

        let title = Line::from(vec![
            Span::styled(
                "  Blogify",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Discover, Read, and Share Insights.", Style::default().fg(MUTED_TEXT)),
        ]);
        let status = Line::from(vec![
            Span::styled("  Author: ", text_style),
            Span::styled(author, Style::default().fg(ACCENT)),
            Span::styled("  │  ", separator_style),
            Span::styled(
                format!("Page {} of {}", state.page, state.total_pages()),
                text_style,
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(format!("{} posts", state.visible().total_matches), text_style),
        ]);

        Paragraph::new(vec![title, status]).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
