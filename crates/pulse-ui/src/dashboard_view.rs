//! Full-screen dashboard for one [`DashboardReport`].
//!
//! Top to bottom: header, active filters, warnings, KPI cards, the monthly
//! trend chart, the category table beside the impact panel, and the key
//! hints footer.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use pulse_core::assumptions::{BusinessAssumptions, ImpactEstimate};
use pulse_core::formatting::{format_compact_currency, format_currency, format_number};
use pulse_core::models::KpiSummary;
use pulse_data::analysis::DashboardReport;

use crate::components::header::Header;
use crate::components::indicators::{FilterIndicator, KeyHints, WarningBanner};
use crate::components::kpi_card::{card_row, KpiCard};
use crate::table_view;
use crate::themes::Theme;
use crate::trend_view;

/// Everything the dashboard shows besides the report itself.
pub struct DashboardViewData<'a> {
    pub report: &'a DashboardReport,
    /// Data-source banner text.
    pub source: &'a str,
    /// Valid transactions in the loaded dataset.
    pub rows_loaded: usize,
    /// Moving-average window, for the chart legend.
    pub window: usize,
    /// Rates shown beside the savings cards.
    pub assumptions: &'a BusinessAssumptions,
    pub reload_error: Option<&'a str>,
}

const CARD_GAP: usize = 4;
const IMPACT_PANEL_WIDTH: u16 = 30;

/// `0.10` as `(10%)`.
fn rate_label(rate: f64) -> String {
    format!("({}%)", format_number(rate * 100.0, 0))
}

/// Two rows of KPI cards: volume figures first, then the savings estimates
/// with the rate each one assumes.
pub fn kpi_lines<'a>(
    kpis: &KpiSummary,
    assumptions: &BusinessAssumptions,
    theme: &'a Theme,
) -> Vec<Line<'a>> {
    let volume = [
        KpiCard::new("Total revenue", format_currency(kpis.total_revenue), theme),
        KpiCard::new(
            "Transactions",
            format_number(kpis.transaction_count as f64, 0),
            theme,
        ),
        KpiCard::new("Average ticket", format_currency(kpis.average_ticket), theme),
        KpiCard::new("Units sold", format_number(kpis.total_units as f64, 0), theme),
    ];
    let savings = [
        KpiCard::new(
            "Potential savings",
            format_compact_currency(kpis.potential_savings),
            theme,
        )
        .with_detail(rate_label(assumptions.savings_rate))
        .with_value_style(theme.success),
        KpiCard::new(
            "Recoverable sales",
            format_compact_currency(kpis.recoverable_sales),
            theme,
        )
        .with_detail(rate_label(assumptions.recovery_rate))
        .with_value_style(theme.success),
    ];

    let mut lines = Vec::with_capacity(5);
    lines.extend(card_row(&volume, CARD_GAP));
    lines.push(Line::from(""));
    lines.extend(card_row(&savings, CARD_GAP));
    lines
}

/// Year-one impact figures, one label/value pair per line.
pub fn impact_lines<'a>(impact: &ImpactEstimate, theme: &'a Theme) -> Vec<Line<'a>> {
    let entry = |label: &'a str, value: String| {
        [
            Line::from(Span::styled(label, theme.label)),
            Line::from(Span::styled(value, theme.success)),
        ]
    };
    let mut lines = Vec::with_capacity(8);
    lines.extend(entry(
        "Capital released",
        format_compact_currency(impact.capital_released),
    ));
    lines.push(Line::from(""));
    lines.extend(entry(
        "Recovered sales",
        format_compact_currency(impact.recovered_sales),
    ));
    lines.push(Line::from(""));
    lines.extend(entry("ROI", format!("{:.1}x", impact.roi_multiple)));
    lines
}

/// Render the whole dashboard into `area`.
pub fn render_dashboard(frame: &mut Frame, area: Rect, data: &DashboardViewData<'_>, theme: &Theme) {
    let report = data.report;

    let header = Header::new(data.source, data.rows_loaded, theme).to_lines();
    let filters = FilterIndicator::new(&report.filters, report.trend.mode, theme).to_line();
    let banner = WarningBanner::new(&report.warnings, data.reload_error, theme);
    let kpis = kpi_lines(&report.kpis, data.assumptions, theme);
    let table_height = report.categories.len().max(2) as u16 + 3;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header.len() as u16),
            Constraint::Length(1),
            Constraint::Length(banner.height() as u16),
            Constraint::Length(kpis.len() as u16 + 1),
            Constraint::Min(10),
            Constraint::Length(table_height.max(8)),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(Text::from(header)), chunks[0]);
    frame.render_widget(Paragraph::new(filters), chunks[1]);
    frame.render_widget(Paragraph::new(Text::from(banner.to_lines())), chunks[2]);
    frame.render_widget(Paragraph::new(Text::from(kpis)), chunks[3]);

    trend_view::render_trend_chart(frame, chunks[4], &report.trend, data.window, theme);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(IMPACT_PANEL_WIDTH)])
        .split(chunks[5]);
    table_view::render_category_table(frame, bottom[0], &report.categories, theme);
    frame.render_widget(
        Paragraph::new(Text::from(impact_lines(&report.impact, theme))).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Year-one impact "),
        ),
        bottom[1],
    );

    frame.render_widget(Paragraph::new(KeyHints::new(theme).to_line()), chunks[6]);
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::config::PassConfig;
    use pulse_core::models::{FilterSelection, PassWarning, Selection};
    use pulse_data::analysis::run_pass;
    use pulse_data::demo::DemoGenerator;
    use pulse_data::normalizer::RecordNormalizer;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn demo_report(config: &PassConfig) -> DashboardReport {
        let raw = DemoGenerator::new(42, 400).generate();
        let set = RecordNormalizer::normalize(&raw).unwrap();
        run_pass(&set, config)
    }

    fn render(data: &DashboardViewData<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 50)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_dashboard(frame, area, data, &theme);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_kpi_lines_show_every_card() {
        let theme = Theme::dark();
        let kpis = KpiSummary {
            total_revenue: 3_000.0,
            transaction_count: 2,
            average_ticket: 1_500.0,
            total_units: 7,
            potential_savings: 300.0,
            recoverable_sales: 60.0,
        };
        let lines = kpi_lines(&kpis, &BusinessAssumptions::default(), &theme);
        assert_eq!(lines.len(), 5);
        let volume = line_text(&lines[1]);
        assert!(volume.contains("$3,000.00"));
        assert!(volume.contains("$1,500.00"));
        let savings = line_text(&lines[4]);
        assert!(savings.contains("$300.00"));
        assert!(savings.contains("$60.00"));
        assert!(savings.contains("$300.00 (10%)"));
        assert!(savings.contains("$60.00 (2%)"));
    }

    #[test]
    fn test_kpi_lines_follow_configured_rates() {
        let theme = Theme::dark();
        let assumptions = BusinessAssumptions {
            savings_rate: 0.25,
            recovery_rate: 0.05,
            ..Default::default()
        };
        let lines = kpi_lines(&KpiSummary::default(), &assumptions, &theme);
        let savings = line_text(&lines[4]);
        assert!(savings.contains("(25%)"));
        assert!(savings.contains("(5%)"));
    }

    #[test]
    fn test_impact_lines_default_figures() {
        let theme = Theme::dark();
        let text: Vec<String> = impact_lines(&ImpactEstimate::default(), &theme)
            .iter()
            .map(line_text)
            .collect();
        assert!(text.contains(&"$12.5M".to_string()));
        assert!(text.contains(&"$10.0M".to_string()));
        assert!(text.contains(&"6.5x".to_string()));
    }

    #[test]
    fn test_render_dashboard_full_screen() {
        let report = demo_report(&PassConfig::default());
        let data = DashboardViewData {
            report: &report,
            source: "Demo data (400 rows, seed 42)",
            rows_loaded: 400,
            window: 3,
            assumptions: &BusinessAssumptions::default(),
            reload_error: None,
        };
        let text = render(&data);
        assert!(text.contains("RETAIL PULSE SALES DASHBOARD"));
        assert!(text.contains("Demo data (400 rows, seed 42)"));
        assert!(text.contains("Total revenue"));
        assert!(text.contains("Monthly revenue"));
        assert!(text.contains("Categories"));
        assert!(text.contains("Year-one impact"));
        assert!(text.contains("[q] quit"));
    }

    #[test]
    fn test_render_dashboard_with_empty_result() {
        let config = PassConfig {
            filters: FilterSelection::new(
                Selection::Only("Garden".to_string()),
                Selection::All,
            ),
            ..Default::default()
        };
        let report = demo_report(&config);
        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, PassWarning::EmptyResult { .. })));

        let data = DashboardViewData {
            report: &report,
            source: "sales.csv",
            rows_loaded: 400,
            window: 3,
            assumptions: &BusinessAssumptions::default(),
            reload_error: Some("file vanished"),
        };
        let text = render(&data);
        assert!(text.contains("No monthly data"));
        assert!(text.contains("No transactions match"));
        assert!(text.contains("Reload failed: file vanished"));
    }
}
