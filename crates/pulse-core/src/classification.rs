//! Category classifiers.
//!
//! Two independent policies:
//!
//! * [`classify_abc`]: Pareto ranking on cumulative revenue share.
//! * [`priorities`]: replenishment priority relative to the median revenue.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::formatting::percentage_raw;

// ── ABC / Pareto ──────────────────────────────────────────────────────────────

/// Pareto tier of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbcTier {
    /// Top categories covering the first 80% of revenue.
    A,
    /// Categories covering revenue between 80% and 95%.
    B,
    /// The long tail above 95%.
    C,
}

impl AbcTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbcTier::A => "Tier A",
            AbcTier::B => "Tier B",
            AbcTier::C => "Tier C",
        }
    }
}

impl fmt::Display for AbcTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cumulative-share cut-offs, in percent. Both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcThresholds {
    pub tier_a_max: f64,
    pub tier_b_max: f64,
}

impl Default for AbcThresholds {
    fn default() -> Self {
        Self {
            tier_a_max: 80.0,
            tier_b_max: 95.0,
        }
    }
}

impl AbcThresholds {
    /// Tier for a cumulative share.
    ///
    /// * `cumulative <= tier_a_max` → [`AbcTier::A`]
    /// * `cumulative <= tier_b_max` → [`AbcTier::B`]
    /// * otherwise → [`AbcTier::C`]
    pub fn tier_for(&self, cumulative_pct: f64) -> AbcTier {
        if cumulative_pct <= self.tier_a_max {
            AbcTier::A
        } else if cumulative_pct <= self.tier_b_max {
            AbcTier::B
        } else {
            AbcTier::C
        }
    }
}

/// One ranked category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcEntry {
    pub category: String,
    pub revenue: f64,
    pub share_pct: f64,
    pub cumulative_pct: f64,
    pub tier: AbcTier,
}

/// Rank categories by revenue and assign Pareto tiers.
///
/// `revenues` is `(category, total revenue)` in grouping order. The output is
/// sorted by revenue descending; ties keep their input order. Shares and
/// cumulative shares are percentages of the input total; the cumulative
/// share is taken from the running revenue sum rather than by adding rounded
/// shares, so the last entry lands on 100.
///
/// A zero total yields shares of `0.0` for every category.
pub fn classify_abc(revenues: &[(String, f64)], thresholds: &AbcThresholds) -> Vec<AbcEntry> {
    let total: f64 = revenues.iter().map(|(_, r)| r).sum();

    let mut ranked: Vec<&(String, f64)> = revenues.iter().collect();
    // `sort_by` is stable.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut running = 0.0;
    ranked
        .into_iter()
        .map(|(category, revenue)| {
            running += revenue;
            let cumulative_pct = percentage_raw(running, total);
            AbcEntry {
                category: category.clone(),
                revenue: *revenue,
                share_pct: percentage_raw(*revenue, total),
                cumulative_pct,
                tier: thresholds.tier_for(cumulative_pct),
            }
        })
        .collect()
}

// ── Median priority ───────────────────────────────────────────────────────────

/// Multiple of the median above which a category is high priority.
pub const HIGH_PRIORITY_MEDIAN_FACTOR: f64 = 1.5;

/// Replenishment priority relative to the median category revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Median of `values`; the mean of the two middle values for an even count.
///
/// Returns `0.0` for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Priority of a single value against a precomputed median.
///
/// * `value > 1.5 × median` → [`Priority::High`]
/// * `value > median` → [`Priority::Medium`]
/// * otherwise → [`Priority::Low`]
pub fn classify_priority(value: f64, median: f64) -> Priority {
    if value > median * HIGH_PRIORITY_MEDIAN_FACTOR {
        Priority::High
    } else if value > median {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Priority for every value, in input order.
pub fn priorities(values: &[f64]) -> Vec<Priority> {
    let m = median(values);
    values.iter().map(|&v| classify_priority(v, m)).collect()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
