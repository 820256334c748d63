use serde::{Deserialize, Serialize};

use crate::error::{PulseError, Result};

// ── Shared constants ──────────────────────────────────────────────────────────

/// Share of revenue freed by a 10% improvement in inventory turnover.
pub const DEFAULT_SAVINGS_RATE: f64 = 0.10;

/// Share of revenue recovered by avoiding 2% of stock-outs.
pub const DEFAULT_RECOVERY_RATE: f64 = 0.02;

/// Recovered sales expected over the first year, spread evenly over months
/// by the flat-increment projection.
pub const DEFAULT_ANNUAL_IMPACT: f64 = 10_000_000.0;

/// Capital released in the first year by the turnover improvement.
pub const DEFAULT_CAPITAL_RELEASED: f64 = 12_500_000.0;

/// Projected return per unit of currency invested.
pub const DEFAULT_ROI_MULTIPLE: f64 = 6.5;

/// Fraction of dropped rows above which the caller is warned.
pub const DROP_WARNING_RATIO: f64 = 0.10;

/// Number of trailing months in the moving-average forecast.
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 3;

/// Months per year, used to spread the annual impact.
pub const MONTHS_PER_YEAR: f64 = 12.0;

// ── BusinessAssumptions ───────────────────────────────────────────────────────

/// Fixed-ratio projections standing in for a real forecasting model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessAssumptions {
    /// Multiplier producing `potential_savings` from total revenue.
    pub savings_rate: f64,
    /// Multiplier producing `recoverable_sales` from total revenue.
    pub recovery_rate: f64,
    /// Annual impact figure; one twelfth is added to each month in
    /// flat-increment mode.
    pub annual_impact: f64,
}

impl Default for BusinessAssumptions {
    fn default() -> Self {
        Self {
            savings_rate: DEFAULT_SAVINGS_RATE,
            recovery_rate: DEFAULT_RECOVERY_RATE,
            annual_impact: DEFAULT_ANNUAL_IMPACT,
        }
    }
}

impl BusinessAssumptions {
    /// Per-month increment used by the flat-increment projection.
    pub fn monthly_increment(&self) -> f64 {
        self.annual_impact / MONTHS_PER_YEAR
    }

    /// Reject negative or non-finite rates.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("savings_rate", self.savings_rate),
            ("recovery_rate", self.recovery_rate),
            ("annual_impact", self.annual_impact),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PulseError::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

// ── ImpactEstimate ────────────────────────────────────────────────────────────

/// Year-one economic impact panel. Static business figures, not derived from
/// the loaded data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    /// Capital released by the turnover improvement.
    pub capital_released: f64,
    /// Sales recovered from avoided stock-outs.
    pub recovered_sales: f64,
    /// Return per unit invested.
    pub roi_multiple: f64,
}

impl Default for ImpactEstimate {
    fn default() -> Self {
        Self {
            capital_released: DEFAULT_CAPITAL_RELEASED,
            recovered_sales: DEFAULT_ANNUAL_IMPACT,
            roi_multiple: DEFAULT_ROI_MULTIPLE,
        }
    }
}

impl ImpactEstimate {
    /// Build the panel from the active assumptions so the recovered-sales
    /// figure tracks `--annual-impact`.
    pub fn from_assumptions(assumptions: &BusinessAssumptions) -> Self {
        Self {
            recovered_sales: assumptions.annual_impact,
            ..Self::default()
        }
    }
}
