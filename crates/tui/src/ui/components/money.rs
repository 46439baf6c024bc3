use engine::Money;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Remaining budget, bold, red once it is down to zero.
#[must_use]
pub fn styled_budget(amount: Money, theme: &Theme) -> Span<'static> {
    let color = if amount > Money::ZERO {
        theme.positive
    } else {
        theme.warning
    };
    Span::styled(
        amount.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Price difference of a swap as charged to the budget: a positive delta
/// costs money and is shown in the warning color.
#[must_use]
pub fn styled_delta(delta: Money, theme: &Theme) -> Span<'static> {
    let (color, prefix) = if delta > Money::ZERO {
        (theme.warning, "+")
    } else if delta.is_negative() {
        (theme.positive, "")
    } else {
        (theme.dim, "")
    };
    Span::styled(format!("{prefix}{delta}"), Style::default().fg(color))
}
