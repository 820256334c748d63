use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decoration placed either side of the application title.
pub const ACCENT: &str = "✦ ✧ ✦ ✧";

/// Width of the separator line under the title.
pub const SEPARATOR_WIDTH: usize = 60;

/// Dashboard header rendering four lines:
///
/// 1. Application title with accent decorations.
/// 2. A 60-column `=` separator.
/// 3. Data source and loaded row count in `[ source | rows ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Data-source banner text, e.g. `"Demo data (5000 rows, seed 42)"`.
    pub source: &'a str,
    /// Valid transactions loaded from the source.
    pub rows_loaded: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(source: &'a str, rows_loaded: usize, theme: &'a Theme) -> Self {
        Self {
            source,
            rows_loaded,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(vec![
                Span::styled(ACCENT, self.theme.header_accent),
                Span::styled(" RETAIL PULSE SALES DASHBOARD ", self.theme.header),
                Span::styled(ACCENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled(
                "=".repeat(SEPARATOR_WIDTH),
                self.theme.separator,
            )),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!(
                        "{} rows",
                        pulse_core::formatting::format_number(self.rows_loaded as f64, 0)
                    ),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_to_lines_count() {
        let theme = Theme::dark();
        let lines = Header::new("sales.csv", 10, &theme).to_lines();
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_header_title_line_content() {
        let theme = Theme::dark();
        let lines = Header::new("sales.csv", 10, &theme).to_lines();
        let title = text(&lines[0]);
        assert!(title.contains("RETAIL PULSE"), "got: {title}");
        assert!(title.contains(ACCENT), "got: {title}");
    }

    #[test]
    fn test_header_separator_line() {
        let theme = Theme::dark();
        let lines = Header::new("sales.csv", 10, &theme).to_lines();
        let sep = text(&lines[1]);
        assert_eq!(sep.chars().count(), SEPARATOR_WIDTH);
        assert!(sep.chars().all(|c| c == '='));
    }

    #[test]
    fn test_header_source_line() {
        let theme = Theme::dark();
        let lines = Header::new("Demo data (5000 rows, seed 42)", 4_875, &theme).to_lines();
        let info = text(&lines[2]);
        assert_eq!(info, "[ Demo data (5000 rows, seed 42) | 4,875 rows ]");
        assert!(text(&lines[3]).is_empty());
    }
}
