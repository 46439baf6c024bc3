use engine::{PlayerRef, evaluate};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, Pane},
    ui::{components::money, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_roster(frame, columns[0], state, &theme);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(columns[1]);
    render_filter(frame, right[0], state, &theme);
    render_candidates(frame, right[1], state, &theme);
}

fn pane_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused { theme.accent } else { theme.border };
    Block::default()
        .title(Span::styled(format!(" {title} "), Style::default().fg(theme.accent)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
}

fn player_line(player: &PlayerRef) -> String {
    format!(
        "{:<22} {:<2}  {:<14} {:>6}",
        player.name,
        player.position.code(),
        player.team.to_string(),
        player.price.to_string()
    )
}

fn render_roster(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let armed = state.transfers.selection().current();

    let items = state
        .transfers
        .roster()
        .entries()
        .iter()
        .map(|entry| {
            let is_armed = armed == Some(entry.slot);
            let marker = if is_armed { "* " } else { "  " };
            let style = if is_armed {
                Style::default().fg(theme.armed).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(player_line(&entry.player), style),
            ]))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(state.roster_cursor));
    }

    let list = List::new(items)
        .block(pane_block("Your team", state.focus == Pane::Roster, theme))
        .highlight_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_filter(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut line = vec![
        Span::styled("Filter", Style::default().fg(theme.dim)),
        Span::raw(": "),
        Span::styled(state.feed.input(), Style::default().fg(theme.text)),
    ];
    if state.editing_filter {
        line.push(Span::styled("_", Style::default().fg(theme.accent)));
    }
    if state.feed.in_flight() > 0 {
        line.push(Span::styled("  loading…", Style::default().fg(theme.dim)));
    }
    if let Some(err) = &state.feed.error {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.as_str(), Style::default().fg(theme.error)));
    }

    let block = pane_block("Search", state.editing_filter, theme);
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_candidates(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let roster = state.transfers.roster();
    let armed = state.transfers.selection().current();

    let items = state
        .feed
        .candidates()
        .iter()
        .map(|candidate| {
            // With a slot armed, dim what the validator would turn down.
            let allowed = armed.is_none_or(|slot| {
                evaluate(roster, state.transfers.ledger(), slot, candidate)
                    .is_ok_and(|decision| decision.is_accept())
            });
            let owned = roster.contains(&candidate.id);

            let style = if owned || !allowed {
                Style::default().fg(theme.dim)
            } else {
                Style::default().fg(theme.text)
            };
            let mut spans = vec![Span::styled(format!("  {}", player_line(candidate)), style)];
            if owned {
                spans.push(Span::styled("  owned", Style::default().fg(theme.dim)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(state.feed.cursor()));
    }

    let title = format!("Available ({})", state.feed.candidates().len());
    let list = List::new(items)
        .block(pane_block(&title, state.focus == Pane::Candidates, theme))
        .highlight_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);

    let swap = armed
        .and_then(|slot| roster.entry(slot).ok())
        .zip(state.feed.selected());
    if let Some((entry, candidate)) = swap {
        let delta = candidate.price - entry.player.price;
        let hint = Line::from(vec![
            Span::styled(" swap cost ", Style::default().fg(theme.dim)),
            money::styled_delta(delta, theme),
            Span::raw(" "),
        ]);
        let bottom = Rect {
            y: area.y + area.height.saturating_sub(1),
            height: 1,
            x: area.x + 2,
            width: area.width.saturating_sub(4),
        };
        if area.height > 2 {
            frame.render_widget(Paragraph::new(hint), bottom);
        }
    }
}
