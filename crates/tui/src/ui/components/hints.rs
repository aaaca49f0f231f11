use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub const FORM_HINTS: [KeyHint; 5] = [
    KeyHint::new("Tab/↓", "další pole"),
    KeyHint::new("Shift+Tab/↑", "předchozí"),
    KeyHint::new("Ctrl+U", "smazat pole"),
    KeyHint::new("Ctrl+S", "uložit QR"),
    KeyHint::new("Esc", "konec"),
];

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(hint_separator(theme));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_alternate_key_and_action() {
        let theme = Theme::default();
        let spans = hints_to_spans(&FORM_HINTS[..2], &theme);
        assert_eq!(spans.len(), 5);
        assert_eq!(spans[0].content, "Tab/↓");
        assert_eq!(spans[1].content, " další pole");
        assert_eq!(spans[2].content, "  │  ");
    }
}
