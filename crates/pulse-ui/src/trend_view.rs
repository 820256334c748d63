//! Monthly revenue chart with its forecast series.

use pulse_core::formatting::format_compact_currency;
use pulse_core::trend::{TrendMode, TrendSeries};
use ratatui::{
    layout::{Alignment, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::themes::Theme;

/// Headroom above the largest value so the top of the line stays visible.
const Y_HEADROOM: f64 = 1.1;

/// Legend text for the derived series.
pub fn forecast_label(mode: TrendMode, window: usize) -> String {
    match mode {
        TrendMode::MovingAverage => format!("{window}-month moving average"),
        TrendMode::FlatIncrement => "Projected (+annual impact / 12)".to_string(),
    }
}

/// `(actual, forecast)` chart points; x is months since the first point.
pub fn chart_points(series: &TrendSeries) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let Some(first) = series.points.first() else {
        return (Vec::new(), Vec::new());
    };
    let origin = first.month_index;
    series
        .points
        .iter()
        .map(|p| {
            let x = (p.month_index - origin) as f64;
            ((x, p.total_revenue), (x, p.forecast))
        })
        .unzip()
}

/// Render the trend chart into `area`, or a placeholder when `series` is
/// empty.
pub fn render_trend_chart(
    frame: &mut Frame,
    area: Rect,
    series: &TrendSeries,
    window: usize,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(" Monthly revenue ");

    let (Some(first), Some(last)) = (series.points.first(), series.points.last()) else {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No monthly data for the current filters",
                theme.dim,
            )))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    };

    let (actual, forecast) = chart_points(series);
    let x_max = ((last.month_index - first.month_index) as f64).max(1.0);
    let y_max = (series.max_value() * Y_HEADROOM).max(1.0);

    let datasets = vec![
        Dataset::default()
            .name("Revenue")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.chart_actual)
            .data(&actual),
        Dataset::default()
            .name(forecast_label(series.mode, window))
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.chart_forecast)
            .data(&forecast),
    ];

    let x_axis = Axis::default()
        .style(theme.chart_axis)
        .bounds([0.0, x_max])
        .labels(vec![
            Span::styled(first.month_label.clone(), theme.label),
            Span::styled(last.month_label.clone(), theme.label),
        ]);
    let y_axis = Axis::default()
        .style(theme.chart_axis)
        .bounds([0.0, y_max])
        .labels(vec![
            Span::styled("$0", theme.label),
            Span::styled(format_compact_currency(y_max / 2.0), theme.label),
            Span::styled(format_compact_currency(y_max), theme.label),
        ]);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);
    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
