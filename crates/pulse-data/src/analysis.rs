//! One full dashboard pass.
//!
//! Filters a normalized set, aggregates it, builds the trend series and the
//! category table, and collects every warning, returning a
//! [`DashboardReport`] ready for the UI layer or the JSON report.

use std::time::Instant;

use chrono::Utc;
use pulse_core::assumptions::ImpactEstimate;
use pulse_core::config::PassConfig;
use pulse_core::models::{CategorySummary, FilterSelection, KpiSummary, PassWarning};
use pulse_core::trend::{TrendEngine, TrendSeries};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregator::SalesAggregator;
use crate::filter::apply_filters;
use crate::normalizer::NormalizedSet;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassMetadata {
    /// RFC 3339 timestamp when this report was generated.
    pub generated_at: String,
    /// Rows in the raw input.
    pub total_rows: usize,
    /// Rows dropped during normalization.
    pub dropped_rows: usize,
    /// Transactions that survived normalization.
    pub valid_rows: usize,
    /// Transactions left after filtering.
    pub filtered_rows: usize,
    /// Wall-clock seconds spent on the pass.
    pub elapsed_seconds: f64,
}

/// Everything the dashboard shows for one filter/config combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub filters: FilterSelection,
    pub kpis: KpiSummary,
    pub trend: TrendSeries,
    /// Revenue descending.
    pub categories: Vec<CategorySummary>,
    pub impact: ImpactEstimate,
    pub warnings: Vec<PassWarning>,
    pub metadata: PassMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pass over `set` with `config`.
///
/// 1. Raise the drop-ratio warning from the normalization report.
/// 2. Apply the filters; an empty result raises its own warning and every
///    aggregate comes back zero or empty.
/// 3. Compute KPIs, the category table and the monthly trend series.
pub fn run_pass(set: &NormalizedSet, config: &PassConfig) -> DashboardReport {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if let Some(warning) = set.report.drop_warning(config.drop_warning_ratio) {
        warn!("{}", warning);
        warnings.push(warning);
    }

    let filtered = apply_filters(&set.transactions, &config.filters);
    if filtered.is_empty() {
        let warning = PassWarning::EmptyResult {
            category: config.filters.category.label().to_string(),
            location: config.filters.location.label().to_string(),
        };
        warn!("{}", warning);
        warnings.push(warning);
    }

    let kpis = SalesAggregator::kpis(&filtered, &config.assumptions);
    let categories = SalesAggregator::category_summaries(&filtered, &config.thresholds);
    let monthly = SalesAggregator::monthly_revenue(&filtered);
    let trend = TrendEngine::build(
        &monthly,
        config.trend_mode,
        config.window,
        &config.assumptions,
    );

    let metadata = PassMetadata {
        generated_at: Utc::now().to_rfc3339(),
        total_rows: set.report.total_rows,
        dropped_rows: set.report.dropped_rows,
        valid_rows: set.len(),
        filtered_rows: filtered.len(),
        elapsed_seconds: start.elapsed().as_secs_f64(),
    };
    debug!(
        filtered = metadata.filtered_rows,
        months = trend.points.len(),
        categories = categories.len(),
        "pass finished in {:.3}s",
        metadata.elapsed_seconds
    );

    DashboardReport {
        filters: config.filters.clone(),
        kpis,
        trend,
        categories,
        impact: ImpactEstimate::from_assumptions(&config.assumptions),
        warnings,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
