use crate::themes::Theme;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// Pad `text` with trailing spaces to `width` display columns.
///
/// Width is measured in terminal cells, so wide glyphs count double. Text
/// already at or beyond `width` is returned unchanged.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    if current >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - current))
}

/// A headline metric: a dim label above a bold value.
pub struct KpiCard<'a> {
    pub label: &'a str,
    pub value: String,
    /// Optional secondary figure shown after the value, e.g. a rate.
    pub detail: Option<String>,
    pub theme: &'a Theme,
    value_style: Option<Style>,
}

impl<'a> KpiCard<'a> {
    pub fn new(label: &'a str, value: String, theme: &'a Theme) -> Self {
        Self {
            label,
            value,
            detail: None,
            theme,
            value_style: None,
        }
    }

    pub fn with_detail(mut self, detail: String) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Override the value style (the theme's `value` style by default).
    pub fn with_value_style(mut self, style: Style) -> Self {
        self.value_style = Some(style);
        self
    }

    /// Display width of the widest line.
    pub fn width(&self) -> usize {
        let value_width = UnicodeWidthStr::width(self.value.as_str())
            + self
                .detail
                .as_deref()
                .map(|d| UnicodeWidthStr::width(d) + 1)
                .unwrap_or(0);
        UnicodeWidthStr::width(self.label).max(value_width)
    }

    /// Two lines padded to `width` columns so cards placed side by side line
    /// up.
    pub fn to_lines(&self, width: usize) -> [Line<'a>; 2] {
        let value_style = self.value_style.unwrap_or(self.theme.value);
        let value_line = match &self.detail {
            Some(detail) => {
                let value_width = UnicodeWidthStr::width(self.value.as_str());
                Line::from(vec![
                    Span::styled(self.value.clone(), value_style),
                    Span::styled(
                        pad_to_width(&format!(" {detail}"), width.saturating_sub(value_width)),
                        self.theme.dim,
                    ),
                ])
            }
            None => Line::from(Span::styled(pad_to_width(&self.value, width), value_style)),
        };
        [
            Line::from(Span::styled(pad_to_width(self.label, width), self.theme.label)),
            value_line,
        ]
    }
}

/// Lay cards out side by side, each padded to the widest card plus `gap`.
pub fn card_row<'a>(cards: &[KpiCard<'a>], gap: usize) -> [Line<'a>; 2] {
    let width = cards.iter().map(KpiCard::width).max().unwrap_or(0) + gap;
    let mut labels: Vec<Span<'a>> = Vec::with_capacity(cards.len());
    let mut values: Vec<Span<'a>> = Vec::with_capacity(cards.len() * 2);
    for card in cards {
        let [label, value] = card.to_lines(width);
        labels.extend(label.spans);
        values.extend(value.spans);
    }
    [Line::from(labels), Line::from(values)]
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_pad_to_width_ascii() {
        assert_eq!(pad_to_width("abc", 5), "abc  ");
        assert_eq!(pad_to_width("abcdef", 3), "abcdef");
    }

    #[test]
    fn test_pad_to_width_counts_wide_glyphs_double() {
        // Each CJK glyph occupies two cells.
        let padded = pad_to_width("日本", 6);
        assert_eq!(UnicodeWidthStr::width(padded.as_str()), 6);
        assert_eq!(padded, "日本  ");
    }

    #[test]
    fn test_card_width_includes_detail() {
        let theme = Theme::dark();
        let card = KpiCard::new("Revenue", "$1,000.00".to_string(), &theme);
        assert_eq!(card.width(), 9);
        let card = card.with_detail("(10%)".to_string());
        assert_eq!(card.width(), 15);
    }

    #[test]
    fn test_card_lines_padded() {
        let theme = Theme::dark();
        let card = KpiCard::new("Transactions", "42".to_string(), &theme);
        let [label, value] = card.to_lines(14);
        assert_eq!(text(&label), "Transactions  ");
        assert_eq!(text(&value), "42            ");
        assert_eq!(value.spans[0].style, theme.value);
    }

    #[test]
    fn test_card_value_style_override() {
        let theme = Theme::dark();
        let card = KpiCard::new("Savings", "$5.00".to_string(), &theme)
            .with_value_style(theme.success);
        let [_, value] = card.to_lines(10);
        assert_eq!(value.spans[0].style, theme.success);
    }

    #[test]
    fn test_card_row_aligns_columns() {
        let theme = Theme::dark();
        let cards = [
            KpiCard::new("A", "1".to_string(), &theme),
            KpiCard::new("Average ticket", "$12.00".to_string(), &theme),
        ];
        let [labels, values] = card_row(&cards, 2);
        let labels = text(&labels);
        let values = text(&values);
        assert_eq!(labels.len(), values.len());
        assert_eq!(labels.find("Average"), values.find("$12.00"));
    }
}
