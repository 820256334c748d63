//! Sales aggregation: headline KPIs, per-category totals and monthly revenue.

use std::collections::BTreeMap;

use pulse_core::assumptions::BusinessAssumptions;
use pulse_core::classification::{classify_abc, priorities, AbcThresholds};
use pulse_core::models::{CategorySummary, KpiSummary, MonthKey, Transaction};

// ── CategoryStats ─────────────────────────────────────────────────────────────

/// Running totals for one category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryStats {
    pub revenue: f64,
    pub quantity: u64,
    pub count: usize,
}

impl CategoryStats {
    fn add(&mut self, tx: &Transaction) {
        self.revenue += tx.line_total;
        self.quantity += u64::from(tx.quantity);
        self.count += 1;
    }
}

// ── SalesAggregator ───────────────────────────────────────────────────────────

/// Stateless helper grouping transactions into dashboard summaries.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Headline indicators for `transactions`.
    ///
    /// The average ticket of an empty set is `0.0`.
    pub fn kpis(transactions: &[Transaction], assumptions: &BusinessAssumptions) -> KpiSummary {
        let total_revenue: f64 = transactions.iter().map(|t| t.line_total).sum();
        let transaction_count = transactions.len();
        let average_ticket = if transaction_count == 0 {
            0.0
        } else {
            total_revenue / transaction_count as f64
        };

        KpiSummary {
            total_revenue,
            transaction_count,
            average_ticket,
            total_units: transactions.iter().map(|t| u64::from(t.quantity)).sum(),
            potential_savings: total_revenue * assumptions.savings_rate,
            recoverable_sales: total_revenue * assumptions.recovery_rate,
        }
    }

    /// Totals per category, keyed and ordered by category name.
    pub fn category_stats(transactions: &[Transaction]) -> BTreeMap<String, CategoryStats> {
        let mut map: BTreeMap<String, CategoryStats> = BTreeMap::new();
        for tx in transactions {
            map.entry(tx.category.clone()).or_default().add(tx);
        }
        map
    }

    /// The category table: revenue descending, with Pareto tier and median
    /// priority attached to each row.
    pub fn category_summaries(
        transactions: &[Transaction],
        thresholds: &AbcThresholds,
    ) -> Vec<CategorySummary> {
        let stats = Self::category_stats(transactions);
        let revenues: Vec<(String, f64)> = stats
            .iter()
            .map(|(category, s)| (category.clone(), s.revenue))
            .collect();

        let ranked = classify_abc(&revenues, thresholds);
        let ranked_revenues: Vec<f64> = ranked.iter().map(|e| e.revenue).collect();
        let ranked_priorities = priorities(&ranked_revenues);

        ranked
            .into_iter()
            .zip(ranked_priorities)
            .filter_map(|(entry, priority)| {
                let s = stats.get(&entry.category)?;
                Some(CategorySummary {
                    category: entry.category,
                    total_revenue: entry.revenue,
                    total_quantity: s.quantity,
                    transaction_count: s.count,
                    revenue_share_pct: entry.share_pct,
                    cumulative_share_pct: entry.cumulative_pct,
                    tier: entry.tier,
                    priority,
                })
            })
            .collect()
    }

    /// Revenue per calendar month, in chronological order.
    pub fn monthly_revenue(transactions: &[Transaction]) -> Vec<(MonthKey, f64)> {
        let mut map: BTreeMap<MonthKey, f64> = BTreeMap::new();
        for tx in transactions {
            *map.entry(tx.month()).or_insert(0.0) += tx.line_total;
        }
        map.into_iter().collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
