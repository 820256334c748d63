//! Category breakdown table.
//!
//! One row per category in descending revenue order, with its Pareto tier
//! and replenishment priority coloured by the theme.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use pulse_core::formatting::{format_currency, format_number, format_percent};
use pulse_core::models::CategorySummary;

use crate::themes::Theme;

pub const HEADERS: [&str; 8] = [
    "Category",
    "Revenue",
    "Share",
    "Cumulative",
    "Units",
    "Transactions",
    "Tier",
    "Priority",
];

fn category_row<'a>(index: usize, summary: &CategorySummary, theme: &Theme) -> Row<'a> {
    Row::new(vec![
        Cell::from(summary.category.clone()),
        Cell::from(format_currency(summary.total_revenue)),
        Cell::from(format_percent(summary.revenue_share_pct)),
        Cell::from(format_percent(summary.cumulative_share_pct)),
        Cell::from(format_number(summary.total_quantity as f64, 0)),
        Cell::from(format_number(summary.transaction_count as f64, 0)),
        Cell::from(summary.tier.as_str()).style(theme.tier_style(summary.tier)),
        Cell::from(summary.priority.as_str()).style(theme.priority_style(summary.priority)),
    ])
    .style(theme.row_style(index))
}

/// Render the category table into `area`, or [`render_no_data`] when there
/// are no categories.
pub fn render_category_table(
    frame: &mut Frame,
    area: Rect,
    categories: &[CategorySummary],
    theme: &Theme,
) {
    if categories.is_empty() {
        render_no_data(frame, area, theme);
        return;
    }

    let header = Row::new(
        HEADERS
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = categories
        .iter()
        .enumerate()
        .map(|(i, summary)| category_row(i, summary, theme))
        .collect();

    let widths = [
        Constraint::Min(12),
        Constraint::Length(16),
        Constraint::Length(8),
        Constraint::Length(11),
        Constraint::Length(9),
        Constraint::Length(13),
        Constraint::Length(7),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Categories "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Placeholder shown when the current filters leave no transactions.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No transactions match the current filters", theme.warning)),
        Line::from(""),
        Line::from(Span::styled("Press 'r' to reset the filters.", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Categories "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::classification::{AbcTier, Priority};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_categories() -> Vec<CategorySummary> {
        vec![
            CategorySummary {
                category: "Electronics".to_string(),
                total_revenue: 80_000.0,
                total_quantity: 120,
                transaction_count: 40,
                revenue_share_pct: 80.0,
                cumulative_share_pct: 80.0,
                tier: AbcTier::A,
                priority: Priority::High,
            },
            CategorySummary {
                category: "Shoes".to_string(),
                total_revenue: 20_000.0,
                total_quantity: 1_500,
                transaction_count: 300,
                revenue_share_pct: 20.0,
                cumulative_share_pct: 100.0,
                tier: AbcTier::C,
                priority: Priority::Low,
            },
        ]
    }

    fn render(categories: &[CategorySummary]) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 10)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_category_table(frame, area, categories, &theme);
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
    fn test_render_category_table_shows_rows() {
        let text = render(&make_categories());
        for header in HEADERS {
            assert!(text.contains(header), "missing header {header}");
        }
        assert!(text.contains("Electronics"));
        assert!(text.contains("$80,000.00"));
        assert!(text.contains("80.0%"));
        assert!(text.contains("1,500"));
        assert!(text.contains("Tier A"));
        assert!(text.contains("HIGH"));
        assert!(text.contains("LOW"));
    }

    #[test]
    fn test_render_empty_table_shows_placeholder() {
        let text = render(&[]);
        assert!(text.contains("No transactions match"));
    }

    #[test]
    fn test_row_cells_use_tier_and_priority_styles() {
        let theme = Theme::dark();
        let categories = make_categories();
        let mut terminal = Terminal::new(TestBackend::new(110, 10)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_category_table(frame, area, &categories, &theme);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let cells = buffer.content();
        // Row 0 is the border, row 1 the header, row 2 the first category.
        let row: Vec<&str> = cells[2 * width..3 * width].iter().map(|c| c.symbol()).collect();
        let col = row.windows(4).position(|w| w == ["H", "I", "G", "H"]).unwrap();
        assert_eq!(cells[2 * width + col].fg, theme.priority_high.fg.unwrap());
    }
}
