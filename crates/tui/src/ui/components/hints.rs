use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Renders `(key, action)` pairs as a single hint line.
pub fn hints_to_spans(hints: &[(&str, &str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key.to_string(), Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {action}")));
    }

    spans
}

pub fn separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}
