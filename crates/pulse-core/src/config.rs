use serde::{Deserialize, Serialize};

use crate::assumptions::{BusinessAssumptions, DEFAULT_MOVING_AVERAGE_WINDOW, DROP_WARNING_RATIO};
use crate::classification::AbcThresholds;
use crate::error::{PulseError, Result};
use crate::models::FilterSelection;
use crate::trend::TrendMode;

/// Everything one analysis pass needs besides the data itself.
///
/// Built fresh from settings or from the dashboard session and passed down
/// the pipeline by reference; nothing here is global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassConfig {
    pub filters: FilterSelection,
    pub trend_mode: TrendMode,
    /// Moving-average window in months.
    pub window: usize,
    pub assumptions: BusinessAssumptions,
    pub thresholds: AbcThresholds,
    /// Dropped-row ratio above which a warning is raised.
    pub drop_warning_ratio: f64,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            filters: FilterSelection::default(),
            trend_mode: TrendMode::MovingAverage,
            window: DEFAULT_MOVING_AVERAGE_WINDOW,
            assumptions: BusinessAssumptions::default(),
            thresholds: AbcThresholds::default(),
            drop_warning_ratio: DROP_WARNING_RATIO,
        }
    }
}

impl PassConfig {
    /// Reject configurations no pass could honour.
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(PulseError::Config(
                "moving-average window must be at least 1".to_string(),
            ));
        }
        if self.thresholds.tier_a_max > self.thresholds.tier_b_max {
            return Err(PulseError::Config(format!(
                "tier A cut-off ({}) exceeds tier B cut-off ({})",
                self.thresholds.tier_a_max, self.thresholds.tier_b_max
            )));
        }
        self.assumptions.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PassConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window, 3);
        assert!(config.filters.is_identity());
        assert_eq!(config.trend_mode, TrendMode::MovingAverage);
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = PassConfig {
            window: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let config = PassConfig {
            thresholds: AbcThresholds {
                tier_a_max: 96.0,
                tier_b_max: 95.0,
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tier A cut-off"));
    }

    #[test]
    fn test_invalid_assumptions_propagate() {
        let mut config = PassConfig::default();
        config.assumptions.recovery_rate = -1.0;
        assert!(config.validate().is_err());
    }
}
