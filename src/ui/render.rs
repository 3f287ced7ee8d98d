use crate::feed::{excerpt, AuthorFilter};
use crate::ui::app::{App, PopupKind};
use crate::ui::dashboard::{
    CommentsState, ComposerField, ComposerState, DashboardState, LoadState, PostDetail,
};
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{centered_rect_by_size, layout_regions};
use crate::ui::theme::{
    ACCENT, ACCENT_STRONG, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, POPUP_BORDER,
    STATUS_ERROR, STATUS_OK, STATUS_WARN,
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);
    let state = app.dashboard();

    frame.render_widget(Header::new().widget(state), header);
    frame.render_widget(Clear, body);

    match &state.load {
        LoadState::Loading => draw_message(frame, body, "Loading...", MUTED_TEXT),
        LoadState::Failed { message } => {
            let text = format!("{message}\n\nPress r to retry.");
            draw_message(frame, body, &text, STATUS_ERROR);
        }
        LoadState::Ready => match state.detail() {
            Some(detail) => draw_detail(frame, body, state, detail),
            None => draw_listing(frame, body, app),
        },
    }

    frame.render_widget(Footer::new().widget(app, footer), footer);

    if let Some(PopupKind::AuthorPicker) = app.popup_kind() {
        draw_author_picker(frame, body, app);
    }
}

fn draw_message(frame: &mut Frame<'_>, area: Rect, text: &str, color: ratatui::style::Color) {
    let widget = Paragraph::new(text.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::NONE));
    let inner = Rect {
        y: area.y + area.height / 3,
        height: area.height - area.height / 3,
        ..area
    };
    frame.render_widget(widget, inner);
}

fn draw_listing(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let state = app.dashboard();
    let visible = state.visible();

    let block = Block::default()
        .title(Span::styled(
            " Blogs for you ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));

    if visible.posts.is_empty() {
        let widget = Paragraph::new("No posts available for this user.")
            .style(Style::default().fg(MUTED_TEXT))
            .block(block);
        frame.render_widget(widget, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .posts
        .iter()
        .map(|post| {
            let author = state.author_name(post).unwrap_or_default().to_string();
            ListItem::new(vec![
                Line::from(Span::styled(
                    post.title.clone(),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    excerpt(&post.body.replace('\n', " "), app.excerpt_chars()),
                    Style::default().fg(HEADER_TEXT),
                )),
                Line::from(vec![
                    Span::styled("Author: ", Style::default().fg(MUTED_TEXT)),
                    Span::styled(author, Style::default().fg(ACCENT_STRONG)),
                ]),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(ACTIVE_HIGHLIGHT));
    let mut list_state = ListState::default().with_selected(Some(state.cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_detail(frame: &mut Frame<'_>, area: Rect, state: &DashboardState, detail: &PostDetail) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Min(4),
            Constraint::Length(6),
        ])
        .split(area);

    let (title, body, author) = match state.selected_post() {
        Some(post) => (
            post.title.clone(),
            post.body.clone(),
            state.author_name(post).unwrap_or_default().to_string(),
        ),
        None => (String::new(), String::new(), String::new()),
    };

    let post_widget = Paragraph::new(vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Author: ", Style::default().fg(MUTED_TEXT)),
            Span::styled(author, Style::default().fg(ACCENT_STRONG)),
        ]),
        Line::from(""),
        Line::from(Span::styled(body, Style::default().fg(HEADER_TEXT))),
    ])
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .title(" Back to Posts: Esc ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    );
    frame.render_widget(post_widget, sections[0]);

    draw_comments(frame, sections[1], detail);
    draw_composer(frame, sections[2], &detail.composer);
}

fn draw_comments(frame: &mut Frame<'_>, area: Rect, detail: &PostDetail) {
    let block = Block::default()
        .title(" Comments ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));

    let comments = match &detail.comments {
        CommentsState::Loading => {
            frame.render_widget(
                Paragraph::new("Loading comments...")
                    .style(Style::default().fg(MUTED_TEXT))
                    .block(block),
                area,
            );
            return;
        }
        CommentsState::Failed { message } => {
            frame.render_widget(
                Paragraph::new(format!("{message}. Press r to reload."))
                    .style(Style::default().fg(STATUS_ERROR))
                    .block(block),
                area,
            );
            return;
        }
        CommentsState::Loaded(comments) => comments,
    };

    if comments.is_empty() {
        frame.render_widget(
            Paragraph::new("No comments yet.")
                .style(Style::default().fg(MUTED_TEXT))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = comments
        .iter()
        .map(|comment| {
            let mut heading = vec![Span::styled(
                comment.name.clone(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )];
            if comment.is_unsaved() {
                heading.push(Span::styled("  [unsaved]", Style::default().fg(STATUS_WARN)));
            }
            ListItem::new(vec![
                Line::from(heading),
                Line::from(Span::styled(
                    comment.body.replace('\n', " "),
                    Style::default().fg(HEADER_TEXT),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(ACTIVE_HIGHLIGHT));
    let mut list_state = ListState::default().with_selected(Some(detail.comment_cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_composer(frame: &mut Frame<'_>, area: Rect, composer: &ComposerState) {
    let border = if composer.focused { ACCENT } else { GLOBAL_BORDER };
    let title = if composer.submitting {
        " Add a Comment (sending...) "
    } else {
        " Add a Comment "
    };

    let fields = [
        (ComposerField::Name, "Your Name   "),
        (ComposerField::Email, "Your Email  "),
        (ComposerField::Body, "Your Comment"),
    ];
    let mut lines: Vec<Line> = fields
        .iter()
        .map(|(field, label)| {
            let active = composer.focused && composer.field == *field;
            let label_style = if active {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED_TEXT)
            };
            let mut value = composer.field_value(*field).replace('\n', " ⏎ ");
            if active {
                value.push('▏');
            }
            Line::from(vec![
                Span::styled(format!("{label}: "), label_style),
                Span::styled(value, Style::default().fg(HEADER_TEXT)),
            ])
        })
        .collect();

    if let Some(notice) = &composer.notice {
        let color = if notice.starts_with("Saved locally") {
            STATUS_WARN
        } else {
            STATUS_ERROR
        };
        lines.push(Line::from(Span::styled(notice.clone(), Style::default().fg(color))));
    } else if !composer.focused {
        lines.push(Line::from(Span::styled(
            "Press c to write a comment",
            Style::default().fg(MUTED_TEXT).add_modifier(Modifier::DIM),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(widget, area);
}

fn draw_author_picker(frame: &mut Frame<'_>, body: Rect, app: &App) {
    let state = app.dashboard();
    let selected = app.author_selection();

    let names = std::iter::once("All Authors").chain(state.users.iter().map(|u| u.name.as_str()));
    let mut lines: Vec<Line> = names
        .enumerate()
        .map(|(idx, name)| {
            let active = match state.filter {
                AuthorFilter::All => idx == 0,
                AuthorFilter::Author(id) => state
                    .users
                    .get(idx.wrapping_sub(1))
                    .is_some_and(|user| user.id == id),
            };
            let marker = if active { "●" } else { " " };
            let mut line = Line::from(vec![
                Span::styled(format!(" {marker} "), Style::default().fg(STATUS_OK)),
                Span::styled(name.to_string(), Style::default().fg(HEADER_TEXT)),
            ]);
            if idx == selected {
                line = line.style(Style::default().bg(ACTIVE_HIGHLIGHT));
            }
            line
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from("Up/Down: Move  Enter: Select  Esc: Close"));

    let content_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let popup_width = content_width.saturating_add(4).max(32);
    let popup_height = lines.len().saturating_add(2) as u16;
    let area = centered_rect_by_size(body, popup_width, popup_height);

    frame.render_widget(Clear, area);
    let popup = Block::default()
        .title(Span::styled(" Filter by Author ", Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(Paragraph::new(lines).block(popup), area);
}
