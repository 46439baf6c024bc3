pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Pane, Screen};
use theme::Theme;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    match state.screen {
        Screen::Transfers => screens::transfers::render(frame, layout[1], state),
        Screen::Submitted => screens::submitted::render(frame, layout[1], state),
    }
    render_status(frame, layout[2], state, &theme);
    render_bottom_bar(frame, layout[3], state, &theme);

    components::notice::render(frame, area, state.notice.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let ledger = state.transfers.ledger();
    let armed = state
        .transfers
        .selection()
        .current()
        .map(|slot| slot.to_string())
        .unwrap_or_else(|| "-".to_string());
    let refresh = state
        .feed
        .last_update
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    let line = Line::from(vec![
        Span::styled("Budget", Style::default().fg(theme.dim)),
        Span::raw(": "),
        components::money::styled_budget(ledger.remaining(), theme),
        Span::raw(format!(" / {}  ", ledger.initial())),
        Span::styled("Armed", Style::default().fg(theme.dim)),
        Span::raw(format!(": {armed}  ")),
        Span::styled("Transfers", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.transfers.history().len())),
        Span::styled("Refresh", Style::default().fg(theme.dim)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(state.base_url.as_str(), Style::default().fg(theme.dim)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_status(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(status) = &state.status else {
        return;
    };
    let style = if state.submitting {
        Style::default().fg(theme.warning)
    } else {
        Style::default().fg(theme.text)
    };
    frame.render_widget(Paragraph::new(Line::from(Span::styled(status.as_str(), style))), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let context: &[(&str, &str)] = match state.screen {
        Screen::Submitted => &[("Enter", "new transfers")],
        Screen::Transfers if state.editing_filter => {
            &[("type", "filter"), ("Enter/Esc", "done")]
        }
        Screen::Transfers => match state.focus {
            Pane::Roster => &[
                ("↑↓", "move"),
                ("Enter", "select"),
                ("c", "clear"),
                ("Tab", "candidates"),
            ],
            Pane::Candidates => &[
                ("↑↓", "move"),
                ("Enter", "swap in"),
                ("/", "filter"),
                ("p", "position"),
                ("r", "refresh"),
                ("Tab", "roster"),
            ],
        },
    };

    let mut parts = components::hints::hints_to_spans(context, theme);
    if state.screen == Screen::Transfers && !state.editing_filter {
        parts.push(components::hints::separator(theme));
        parts.extend(components::hints::hints_to_spans(&[("s", "submit")], theme));
    }
    parts.push(components::hints::separator(theme));
    parts.extend(components::hints::hints_to_spans(&[("q", "quit")], theme));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
