//! Interactive dashboard session.
//!
//! A [`DashboardSession`] owns everything one viewer has chosen: the data
//! source, the active filters and the pass configuration. Every interaction
//! updates that state and re-runs the full pass, so the current
//! [`DashboardReport`] always reflects the current selections.

use std::sync::Arc;

use pulse_core::config::PassConfig;
use pulse_core::error::Result;
use pulse_core::models::{Dimension, Selection};
use pulse_core::trend::TrendMode;
use pulse_data::analysis::{run_pass, DashboardReport};
use pulse_data::filter::{filter_options, next_option, validate_filters};
use pulse_data::normalizer::NormalizedSet;
use pulse_data::reader::DataSource;
use tracing::{debug, info};

use crate::dataset_cache::DatasetCache;

/// Selectable values per filter dimension, `all` first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub category: Vec<Selection>,
    pub location: Vec<Selection>,
}

impl FilterOptions {
    fn from_set(set: &NormalizedSet) -> Self {
        Self {
            category: filter_options(&set.transactions, Dimension::Category),
            location: filter_options(&set.transactions, Dimension::Location),
        }
    }

    pub fn get(&self, dimension: Dimension) -> &[Selection] {
        match dimension {
            Dimension::Category => &self.category,
            Dimension::Location => &self.location,
        }
    }
}

/// State and latest result of one dashboard viewer.
pub struct DashboardSession {
    source: DataSource,
    cache: DatasetCache,
    data: Arc<NormalizedSet>,
    config: PassConfig,
    options: FilterOptions,
    report: DashboardReport,
}

impl DashboardSession {
    /// Load `source` and run the first pass with `config`.
    ///
    /// Fails when the source cannot be loaded, the configuration is invalid,
    /// or a filter names a value absent from the data.
    pub fn open(source: DataSource, config: PassConfig) -> Result<Self> {
        Self::open_with_cache(source, config, DatasetCache::new())
    }

    /// Same as [`DashboardSession::open`], reusing an existing cache.
    pub fn open_with_cache(
        source: DataSource,
        config: PassConfig,
        mut cache: DatasetCache,
    ) -> Result<Self> {
        config.validate()?;
        let data = cache.get(&source, false)?;
        validate_filters(&data.transactions, &config.filters)?;

        info!(
            source = %source,
            rows = data.report.total_rows,
            valid = data.len(),
            "dataset loaded"
        );

        let options = FilterOptions::from_set(&data);
        let report = run_pass(&data, &config);
        Ok(Self {
            source,
            cache,
            data,
            config,
            options,
            report,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn report(&self) -> &DashboardReport {
        &self.report
    }

    pub fn config(&self) -> &PassConfig {
        &self.config
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn data(&self) -> &NormalizedSet {
        &self.data
    }

    /// Message of the last failed reload, if the session is showing an older
    /// copy of the data.
    pub fn reload_error(&self) -> Option<&str> {
        self.cache.last_error()
    }

    // ── Interactions ──────────────────────────────────────────────────────

    /// Advance the filter on `dimension` to its next option, wrapping back to
    /// `all` after the last value.
    pub fn cycle_filter(&mut self, dimension: Dimension) {
        let next = next_option(self.options.get(dimension), self.config.filters.get(dimension));
        debug!(%dimension, selection = next.label(), "filter changed");
        self.config.filters.set(dimension, next);
        self.recompute();
    }

    /// Select a specific value on `dimension`.
    pub fn set_filter(&mut self, dimension: Dimension, selection: Selection) -> Result<()> {
        let mut filters = self.config.filters.clone();
        filters.set(dimension, selection);
        validate_filters(&self.data.transactions, &filters)?;
        self.config.filters = filters;
        self.recompute();
        Ok(())
    }

    /// Clear every filter back to `all`.
    pub fn reset_filters(&mut self) {
        self.config.filters = Default::default();
        self.recompute();
    }

    /// Switch between the moving-average and flat-increment series.
    pub fn toggle_trend_mode(&mut self) -> TrendMode {
        self.config.trend_mode = self.config.trend_mode.toggled();
        self.recompute();
        self.config.trend_mode
    }

    /// Load the source again and re-run the pass.
    ///
    /// Filters naming values that disappeared from the data fall back to
    /// `all`.
    pub fn reload(&mut self) -> Result<()> {
        self.data = self.cache.get(&self.source, true)?;
        self.options = FilterOptions::from_set(&self.data);
        for dimension in [Dimension::Category, Dimension::Location] {
            if !self
                .options
                .get(dimension)
                .contains(self.config.filters.get(dimension))
            {
                self.config.filters.set(dimension, Selection::All);
            }
        }
        self.recompute();
        Ok(())
    }

    /// Re-run the pass with the current state.
    pub fn recompute(&mut self) {
        self.report = run_pass(&self.data, &self.config);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::error::PulseError;
    use pulse_core::models::FilterSelection;

    fn demo() -> DataSource {
        DataSource::Demo {
            seed: 42,
            rows: 300,
        }
    }

    fn only(v: &str) -> Selection {
        Selection::Only(v.to_string())
    }

    #[test]
    fn test_open_runs_first_pass() {
        let session = DashboardSession::open(demo(), PassConfig::default()).unwrap();
        assert_eq!(session.report().kpis.transaction_count, 300);
        assert_eq!(session.options().category.len(), 5);
        assert_eq!(session.options().category[0], Selection::All);
        assert!(session.source().is_demo());
        assert!(session.reload_error().is_none());
    }

    #[test]
    fn test_open_rejects_unknown_filter_value() {
        let config = PassConfig {
            filters: FilterSelection::new(only("Garden"), Selection::All),
            ..Default::default()
        };
        let err = DashboardSession::open(demo(), config).err().unwrap();
        assert!(matches!(err, PulseError::InvalidFilter { .. }));
    }

    #[test]
    fn test_open_rejects_invalid_config() {
        let config = PassConfig {
            window: 0,
            ..Default::default()
        };
        assert!(DashboardSession::open(demo(), config).is_err());
    }

    #[test]
    fn test_cycle_filter_walks_options_and_wraps() {
        let mut session = DashboardSession::open(demo(), PassConfig::default()).unwrap();
        let options = session.options().location.clone();

        for expected in options.iter().skip(1) {
            session.cycle_filter(Dimension::Location);
            assert_eq!(&session.config().filters.location, expected);
            assert_eq!(&session.report().filters.location, expected);
        }
        session.cycle_filter(Dimension::Location);
        assert_eq!(session.config().filters.location, Selection::All);
        assert_eq!(session.report().kpis.transaction_count, 300);
    }

    #[test]
    fn test_set_filter_recomputes() {
        let mut session = DashboardSession::open(demo(), PassConfig::default()).unwrap();
        session.set_filter(Dimension::Category, only("Shoes")).unwrap();

        let expected = session
            .data()
            .transactions
            .iter()
            .filter(|t| t.category == "Shoes")
            .count();
        assert_eq!(session.report().kpis.transaction_count, expected);
        assert_eq!(session.report().categories.len(), 1);

        assert!(session.set_filter(Dimension::Category, only("Garden")).is_err());
        assert_eq!(session.config().filters.category, only("Shoes"));
    }

    #[test]
    fn test_reset_filters() {
        let mut session = DashboardSession::open(demo(), PassConfig::default()).unwrap();
        session.cycle_filter(Dimension::Category);
        session.cycle_filter(Dimension::Location);
        session.reset_filters();
        assert!(session.config().filters.is_identity());
        assert_eq!(session.report().kpis.transaction_count, 300);
    }

    #[test]
    fn test_toggle_trend_mode() {
        let mut session = DashboardSession::open(demo(), PassConfig::default()).unwrap();
        assert_eq!(session.toggle_trend_mode(), TrendMode::FlatIncrement);
        assert_eq!(session.report().trend.mode, TrendMode::FlatIncrement);
        assert_eq!(session.toggle_trend_mode(), TrendMode::MovingAverage);
        assert_eq!(session.report().trend.mode, TrendMode::MovingAverage);
    }

    #[test]
    fn test_reload_keeps_valid_filters() {
        let mut session = DashboardSession::open(demo(), PassConfig::default()).unwrap();
        session.set_filter(Dimension::Category, only("Home")).unwrap();
        let before = session.report().kpis.clone();

        session.reload().unwrap();
        assert_eq!(session.config().filters.category, only("Home"));
        assert_eq!(session.report().kpis, before);
    }
}
