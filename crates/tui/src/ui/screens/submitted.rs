use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{app::AppState, ui::{components::money, theme::Theme}};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let message = state.confirmation.as_deref().unwrap_or_default();
    let header = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default().fg(theme.positive).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.positive)),
    );
    frame.render_widget(header, layout[0]);

    let mut lines = Vec::new();
    for entry in state.transfers.roster().entries() {
        let player = &entry.player;
        lines.push(Line::from(vec![
            Span::styled(format!("{:>4} ", entry.slot.to_string()), Style::default().fg(theme.dim)),
            Span::raw(format!(
                "{:<22} {:<2}  {:<14} {:>6}",
                player.name,
                player.position.code(),
                player.team.to_string(),
                player.price.to_string()
            )),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Remaining budget ", Style::default().fg(theme.dim)),
        money::styled_budget(state.transfers.ledger().remaining(), &theme),
    ]));

    let block = Block::default()
        .title(Span::styled(" Submitted team ", Style::default().fg(theme.accent)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(lines).block(block), layout[1]);
}
