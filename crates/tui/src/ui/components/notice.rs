use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    app::{Notice, NoticeLevel},
    ui::{components::centered_box, theme::Theme},
};

/// Modal drawn over everything else until it is dismissed.
pub fn render(frame: &mut Frame<'_>, area: Rect, notice: Option<&Notice>) {
    let Some(notice) = notice else {
        return;
    };
    let theme = Theme::default();

    let (title, color) = match notice.level {
        NoticeLevel::Info => ("Notice", theme.accent),
        NoticeLevel::Success => ("Done", theme.positive),
        NoticeLevel::Error => ("Transfer refused", theme.error),
    };

    let width = u16::try_from(notice.message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(6)
        .clamp(30, 70);
    let rect = centered_box(width, 7, area);

    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));

    let body = vec![
        Line::from(Span::styled(notice.message.as_str(), Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(Span::styled("Enter / Esc to close", Style::default().fg(theme.dim))),
    ];

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        rect,
    );
}
