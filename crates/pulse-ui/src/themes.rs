use pulse_core::classification::{AbcTier, Priority};
use ratatui::style::{Color, Modifier, Style};

/// Whether the terminal draws on a dark or a light background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Read the background from `COLORFGBG` (`"fg;bg"`, or `"fg;default;bg"`).
///
/// ANSI background indices up to 6 are dark, 7 and above light. Anything
/// missing or unparseable counts as dark.
pub fn detect_background() -> BackgroundType {
    background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_from_colorfgbg(value: Option<&str>) -> BackgroundType {
    match value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
    {
        Some(bg) if bg >= 7 => BackgroundType::Light,
        _ => BackgroundType::Dark,
    }
}

/// Complete theme definition carrying all UI styles used by the dashboard.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Trend chart ──────────────────────────────────────────────────────────
    /// Historical monthly revenue.
    pub chart_actual: Style,
    /// Moving average or projection.
    pub chart_forecast: Style,
    pub chart_axis: Style,

    // ── Classification ───────────────────────────────────────────────────────
    pub tier_a: Style,
    pub tier_b: Style,
    pub tier_c: Style,
    pub priority_high: Style,
    pub priority_medium: Style,
    pub priority_low: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            chart_actual: Style::default().fg(Color::Cyan),
            chart_forecast: Style::default().fg(Color::Magenta),
            chart_axis: Style::default().fg(Color::Gray),

            tier_a: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            tier_b: Style::default().fg(Color::Yellow),
            tier_c: Style::default().fg(Color::Gray),
            priority_high: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            priority_medium: Style::default().fg(Color::Yellow),
            priority_low: Style::default().fg(Color::Green),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            chart_actual: Style::default().fg(Color::Blue),
            chart_forecast: Style::default().fg(Color::Magenta),
            chart_axis: Style::default().fg(Color::DarkGray),

            tier_a: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            tier_b: Style::default().fg(Color::Yellow),
            tier_c: Style::default().fg(Color::DarkGray),
            priority_high: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            priority_medium: Style::default().fg(Color::Yellow),
            priority_low: Style::default().fg(Color::Green),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
        }
    }

    /// Basic 8-colour ANSI palette without bold modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            chart_actual: Style::default().fg(Color::Cyan),
            chart_forecast: Style::default().fg(Color::Yellow),
            chart_axis: Style::default().fg(Color::White),

            tier_a: Style::default().fg(Color::Green),
            tier_b: Style::default().fg(Color::Yellow),
            tier_c: Style::default().fg(Color::White),
            priority_high: Style::default().fg(Color::Red),
            priority_medium: Style::default().fg(Color::Yellow),
            priority_low: Style::default().fg(Color::Green),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name. Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    pub fn tier_style(&self, tier: AbcTier) -> Style {
        match tier {
            AbcTier::A => self.tier_a,
            AbcTier::B => self.tier_b,
            AbcTier::C => self.tier_c,
        }
    }

    pub fn priority_style(&self, priority: Priority) -> Style {
        match priority {
            Priority::High => self.priority_high,
            Priority::Medium => self.priority_medium,
            Priority::Low => self.priority_low,
        }
    }

    /// Alternating row style for table row `index`.
    pub fn row_style(&self, index: usize) -> Style {
        if index % 2 == 0 {
            self.table_row
        } else {
            self.table_row_alt
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.warning.fg, Some(Color::Yellow));
        assert_eq!(t.chart_actual.fg, Some(Color::Cyan));
        assert_eq!(t.chart_forecast.fg, Some(Color::Magenta));
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.header.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.table_row.fg, Some(Color::Black));
    }

    #[test]
    fn test_classic_theme_has_no_bold() {
        let t = Theme::classic();
        assert!(!t.header.add_modifier.contains(Modifier::BOLD));
        assert!(!t.tier_a.add_modifier.contains(Modifier::BOLD));
        assert!(!t.priority_high.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark").header.fg, Some(Color::Cyan));
        assert_eq!(Theme::from_name("light").header.fg, Some(Color::Blue));
        assert!(!Theme::from_name("classic")
            .header
            .add_modifier
            .contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        let t = Theme::from_name("does-not-exist");
        assert!(t.header.fg.is_some());
    }

    #[test]
    fn test_background_from_colorfgbg() {
        assert_eq!(background_from_colorfgbg(Some("15;0")), BackgroundType::Dark);
        assert_eq!(background_from_colorfgbg(Some("0;15")), BackgroundType::Light);
        assert_eq!(background_from_colorfgbg(Some("0;default;7")), BackgroundType::Light);
        assert_eq!(background_from_colorfgbg(Some("garbage")), BackgroundType::Dark);
        assert_eq!(background_from_colorfgbg(None), BackgroundType::Dark);
    }

    #[test]
    fn test_tier_style() {
        let t = Theme::dark();
        assert_eq!(t.tier_style(AbcTier::A).fg, Some(Color::Green));
        assert_eq!(t.tier_style(AbcTier::B).fg, Some(Color::Yellow));
        assert_eq!(t.tier_style(AbcTier::C).fg, Some(Color::Gray));
    }

    #[test]
    fn test_priority_style() {
        let t = Theme::dark();
        assert_eq!(t.priority_style(Priority::High).fg, Some(Color::Red));
        assert_eq!(t.priority_style(Priority::Medium).fg, Some(Color::Yellow));
        assert_eq!(t.priority_style(Priority::Low).fg, Some(Color::Green));
    }

    #[test]
    fn test_row_style_alternates() {
        let t = Theme::dark();
        assert_eq!(t.row_style(0), t.table_row);
        assert_eq!(t.row_style(1), t.table_row_alt);
        assert_eq!(t.row_style(2), t.table_row);
    }
}
