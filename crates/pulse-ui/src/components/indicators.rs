use crate::themes::Theme;
use pulse_core::models::{FilterSelection, PassWarning, Selection};
use pulse_core::trend::TrendMode;
use ratatui::text::{Line, Span};

// ── FilterIndicator ──────────────────────────────────────────────────────────

/// Active filters and trend mode on one line.
///
/// Format: `"Category: Shoes  Location: all  Trend: moving-average"`
pub struct FilterIndicator<'a> {
    pub filters: &'a FilterSelection,
    pub trend_mode: TrendMode,
    pub theme: &'a Theme,
}

impl<'a> FilterIndicator<'a> {
    pub fn new(filters: &'a FilterSelection, trend_mode: TrendMode, theme: &'a Theme) -> Self {
        Self {
            filters,
            trend_mode,
            theme,
        }
    }

    pub fn to_line(&self) -> Line<'a> {
        let selection_style = |active: bool| {
            if active {
                self.theme.info
            } else {
                self.theme.value
            }
        };
        let category = &self.filters.category;
        let location = &self.filters.location;

        Line::from(vec![
            Span::styled("Category: ", self.theme.label),
            Span::styled(
                category.label().to_string(),
                selection_style(*category != Selection::All),
            ),
            Span::styled("  Location: ", self.theme.label),
            Span::styled(
                location.label().to_string(),
                selection_style(*location != Selection::All),
            ),
            Span::styled("  Trend: ", self.theme.label),
            Span::styled(self.trend_mode.as_str(), self.theme.value),
        ])
    }
}

// ── WarningBanner ────────────────────────────────────────────────────────────

/// One line per pass warning; nothing when the pass was clean.
pub struct WarningBanner<'a> {
    pub warnings: &'a [PassWarning],
    /// Message of a failed reload, shown as an error.
    pub reload_error: Option<&'a str>,
    pub theme: &'a Theme,
}

impl<'a> WarningBanner<'a> {
    pub fn new(warnings: &'a [PassWarning], reload_error: Option<&'a str>, theme: &'a Theme) -> Self {
        Self {
            warnings,
            reload_error,
            theme,
        }
    }

    /// Number of lines [`WarningBanner::to_lines`] produces.
    pub fn height(&self) -> usize {
        self.warnings.len() + usize::from(self.reload_error.is_some())
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let mut lines: Vec<Line<'a>> = self
            .warnings
            .iter()
            .map(|w| {
                Line::from(vec![
                    Span::styled("⚠ ", self.theme.warning),
                    Span::styled(w.to_string(), self.theme.warning),
                ])
            })
            .collect();

        if let Some(err) = self.reload_error {
            lines.push(Line::from(vec![
                Span::styled("✖ Reload failed: ", self.theme.error),
                Span::styled(err, self.theme.error),
            ]));
        }
        lines
    }
}

// ── KeyHints ─────────────────────────────────────────────────────────────────

/// Footer listing the interactive key bindings.
pub struct KeyHints<'a> {
    pub theme: &'a Theme,
}

impl<'a> KeyHints<'a> {
    pub const BINDINGS: &'static [(&'static str, &'static str)] = &[
        ("c", "category"),
        ("l", "location"),
        ("t", "trend"),
        ("r", "reset"),
        ("u", "reload"),
        ("q", "quit"),
    ];

    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    pub fn to_line(&self) -> Line<'a> {
        let mut spans = Vec::with_capacity(Self::BINDINGS.len() * 2);
        for (i, (key, action)) in Self::BINDINGS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dim));
            }
            spans.push(Span::styled(format!("[{key}]"), self.theme.info));
            spans.push(Span::styled(format!(" {action}"), self.theme.dim));
        }
        Line::from(spans)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
