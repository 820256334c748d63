use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assumptions::BusinessAssumptions;
use crate::error::{PulseError, Result};
use crate::models::MonthKey;

// ── TrendMode ─────────────────────────────────────────────────────────────────

/// Which derived series accompanies monthly revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendMode {
    /// Trailing simple moving average.
    MovingAverage,
    /// Monthly revenue plus a fixed monthly increment.
    FlatIncrement,
}

impl TrendMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendMode::MovingAverage => "moving-average",
            TrendMode::FlatIncrement => "flat-increment",
        }
    }

    /// The other mode; used by the dashboard toggle.
    pub fn toggled(&self) -> Self {
        match self {
            TrendMode::MovingAverage => TrendMode::FlatIncrement,
            TrendMode::FlatIncrement => TrendMode::MovingAverage,
        }
    }
}

impl FromStr for TrendMode {
    type Err = PulseError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "moving-average" | "moving_average" | "ma" => Ok(TrendMode::MovingAverage),
            "flat-increment" | "flat_increment" | "flat" => Ok(TrendMode::FlatIncrement),
            other => Err(PulseError::Config(format!("unknown trend mode: {other}"))),
        }
    }
}

impl fmt::Display for TrendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TrendSeries ───────────────────────────────────────────────────────────────

/// Revenue of one calendar month with its derived value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: MonthKey,
    /// Chronological index; consecutive months differ by 1.
    pub month_index: i64,
    /// `"YYYY-MM"`.
    pub month_label: String,
    pub total_revenue: f64,
    /// Moving average or projected value depending on the series mode.
    pub forecast: f64,
}

/// Monthly revenue series plus the derived forecast column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub mode: TrendMode,
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest value across both columns; `0.0` when empty.
    pub fn max_value(&self) -> f64 {
        self.points
            .iter()
            .flat_map(|p| [p.total_revenue, p.forecast])
            .fold(0.0, f64::max)
    }
}

// ── TrendEngine ───────────────────────────────────────────────────────────────

/// Stateless helpers turning monthly revenue into a forecast series.
pub struct TrendEngine;

impl TrendEngine {
    /// Build the series for `monthly`, which must already be sorted by month.
    pub fn build(
        monthly: &[(MonthKey, f64)],
        mode: TrendMode,
        window: usize,
        assumptions: &BusinessAssumptions,
    ) -> TrendSeries {
        let revenues: Vec<f64> = monthly.iter().map(|(_, r)| *r).collect();
        let forecast = match mode {
            TrendMode::MovingAverage => Self::moving_average(&revenues, window),
            TrendMode::FlatIncrement => {
                Self::flat_increment(&revenues, assumptions.monthly_increment())
            }
        };

        let points = monthly
            .iter()
            .zip(forecast)
            .map(|((month, revenue), forecast)| TrendPoint {
                month: *month,
                month_index: month.index(),
                month_label: month.label(),
                total_revenue: *revenue,
                forecast,
            })
            .collect();

        TrendSeries { mode, points }
    }

    /// Trailing simple moving average over `window` periods.
    ///
    /// Periods before the window fills take the mean of all periods instead
    /// of a partial average. A `window` of 0 is treated as 1.
    pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
        if values.is_empty() {
            return Vec::new();
        }
        let window = window.max(1);
        let overall_mean = values.iter().sum::<f64>() / values.len() as f64;

        (0..values.len())
            .map(|i| {
                if i + 1 < window {
                    overall_mean
                } else {
                    let slice = &values[i + 1 - window..=i];
                    slice.iter().sum::<f64>() / window as f64
                }
            })
            .collect()
    }

    /// Each value plus a constant monthly increment.
    pub fn flat_increment(values: &[f64], increment: f64) -> Vec<f64> {
        values.iter().map(|v| v + increment).collect()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn months(values: &[(i32, u32, f64)]) -> Vec<(MonthKey, f64)> {
        values
            .iter()
            .map(|(y, m, r)| (MonthKey::new(*y, *m), *r))
            .collect()
    }

    // ── moving_average ───────────────────────────────────────────────────────

    #[test]
    fn test_moving_average_fills_head_with_overall_mean() {
        let out = TrendEngine::moving_average(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);
        // overall mean = 30
        assert_eq!(out.len(), 5);
        assert!((out[0] - 30.0).abs() < 1e-9);
        assert!((out[1] - 30.0).abs() < 1e-9);
        assert!((out[2] - 20.0).abs() < 1e-9);
        assert!((out[3] - 30.0).abs() < 1e-9);
        assert!((out[4] - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_moving_average_shorter_than_window_is_all_mean() {
        let out = TrendEngine::moving_average(&[100.0, 300.0], 3);
        assert_eq!(out, vec![200.0, 200.0]);
    }

    #[test]
    fn test_moving_average_empty() {
        assert!(TrendEngine::moving_average(&[], 3).is_empty());
    }

    #[test]
    fn test_moving_average_window_one_is_identity() {
        let values = [5.0, 7.0, 9.0];
        assert_eq!(TrendEngine::moving_average(&values, 1), values.to_vec());
        assert_eq!(TrendEngine::moving_average(&values, 0), values.to_vec());
    }

    // ── flat_increment ───────────────────────────────────────────────────────

    #[test]
    fn test_flat_increment_adds_constant() {
        let out = TrendEngine::flat_increment(&[100.0, 200.0], 50.0);
        assert_eq!(out, vec![150.0, 250.0]);
    }

    // ── build ────────────────────────────────────────────────────────────────

    #[test]
    fn test_build_flat_increment_uses_one_twelfth_of_annual_impact() {
        let assumptions = BusinessAssumptions {
            annual_impact: 12_000.0,
            ..Default::default()
        };
        let series = TrendEngine::build(
            &months(&[(2024, 1, 100.0), (2024, 2, 200.0)]),
            TrendMode::FlatIncrement,
            3,
            &assumptions,
        );
        assert_eq!(series.mode, TrendMode::FlatIncrement);
        assert!((series.points[0].forecast - 1_100.0).abs() < 1e-9);
        assert!((series.points[1].forecast - 1_200.0).abs() < 1e-9);
    }

    #[test]
    fn test_build_labels_and_indices() {
        let series = TrendEngine::build(
            &months(&[(2024, 9, 1.0), (2024, 10, 2.0), (2025, 1, 3.0)]),
            TrendMode::MovingAverage,
            3,
            &BusinessAssumptions::default(),
        );
        let labels: Vec<&str> = series
            .points
            .iter()
            .map(|p| p.month_label.as_str())
            .collect();
        assert_eq!(labels, vec!["2024-09", "2024-10", "2025-01"]);
        assert_eq!(series.points[1].month_index - series.points[0].month_index, 1);
        assert_eq!(series.points[2].month_index - series.points[1].month_index, 3);
    }

    #[test]
    fn test_build_empty() {
        let series = TrendEngine::build(
            &[],
            TrendMode::MovingAverage,
            3,
            &BusinessAssumptions::default(),
        );
        assert!(series.is_empty());
        assert_eq!(series.max_value(), 0.0);
    }

    #[test]
    fn test_max_value_covers_forecast() {
        let assumptions = BusinessAssumptions {
            annual_impact: 1_200.0,
            ..Default::default()
        };
        let series = TrendEngine::build(
            &months(&[(2024, 1, 10.0)]),
            TrendMode::FlatIncrement,
            3,
            &assumptions,
        );
        assert!((series.max_value() - 110.0).abs() < 1e-9);
    }

    // ── TrendMode ────────────────────────────────────────────────────────────

    #[test]
    fn test_trend_mode_from_str() {
        assert_eq!(
            "moving-average".parse::<TrendMode>().unwrap(),
            TrendMode::MovingAverage
        );
        assert_eq!(
            "FLAT-INCREMENT".parse::<TrendMode>().unwrap(),
            TrendMode::FlatIncrement
        );
        assert!("arima".parse::<TrendMode>().is_err());
    }

    #[test]
    fn test_trend_mode_toggle_round_trip() {
        let mode = TrendMode::MovingAverage;
        assert_eq!(mode.toggled(), TrendMode::FlatIncrement);
        assert_eq!(mode.toggled().toggled(), mode);
    }
}
