//! Seeded synthetic transaction generator.
//!
//! Emits a [`RawTable`] with day-first date strings so that demo data goes
//! through the same normalizer as uploaded files.

use chrono::{Duration, NaiveDate};
use pulse_core::dates::format_day_first;
use pulse_core::models::{
    RawTable, COL_AGE, COL_CATEGORY, COL_CUSTOMER_ID, COL_GENDER, COL_INVOICE_DATE,
    COL_INVOICE_NO, COL_PAYMENT_METHOD, COL_PRICE, COL_QUANTITY, COL_SHOPPING_MALL,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Default generator seed.
pub const DEFAULT_SEED: u64 = 42;

/// Default number of generated rows.
pub const DEFAULT_ROWS: usize = 5_000;

const GENDERS: &[&str] = &["Female", "Male"];
const CATEGORIES: &[&str] = &["Clothing", "Shoes", "Electronics", "Home"];
const PAYMENT_METHODS: &[&str] = &["Credit Card", "Debit Card", "Cash"];
const MALLS: &[&str] = &["North", "South", "East", "West"];

/// Column order of generated tables.
const DEMO_COLUMNS: &[&str] = &[
    COL_INVOICE_NO,
    COL_CUSTOMER_ID,
    COL_GENDER,
    COL_AGE,
    COL_CATEGORY,
    COL_QUANTITY,
    COL_PRICE,
    COL_PAYMENT_METHOD,
    COL_INVOICE_DATE,
    COL_SHOPPING_MALL,
];

/// Deterministic demo data: the same seed and row count always yield the
/// same table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoGenerator {
    pub seed: u64,
    pub rows: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

impl Default for DemoGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, DEFAULT_ROWS)
    }
}

impl DemoGenerator {
    /// Generator covering 2024-01-01 through 2025-12-31.
    pub fn new(seed: u64, rows: usize) -> Self {
        Self {
            seed,
            rows,
            first_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            last_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or_default(),
        }
    }

    pub fn generate(&self) -> RawTable {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let span_days = (self.last_date - self.first_date).num_days().max(0);

        let mut table = RawTable::new(DEMO_COLUMNS.iter().map(|c| c.to_string()).collect());
        table.rows.reserve(self.rows);

        for i in 1..=self.rows {
            let date = self.first_date + Duration::days(rng.gen_range(0..=span_days));
            table.rows.push(vec![
                format!("I{i:06}"),
                format!("C{:06}", rng.gen_range(100_000..999_999)),
                pick(&mut rng, GENDERS),
                rng.gen_range(18..65).to_string(),
                pick(&mut rng, CATEGORIES),
                rng.gen_range(1..10).to_string(),
                rng.gen_range(500..5_000).to_string(),
                pick(&mut rng, PAYMENT_METHODS),
                format_day_first(date),
                pick(&mut rng, MALLS),
            ]);
        }

        debug!(seed = self.seed, rows = self.rows, "generated demo data");
        table
    }
}

fn pick(rng: &mut StdRng, values: &[&str]) -> String {
    values.choose(rng).map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::RecordNormalizer;

    #[test]
    fn test_same_seed_same_table() {
        let a = DemoGenerator::new(42, 200).generate();
        let b = DemoGenerator::new(42, 200).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_table() {
        let a = DemoGenerator::new(1, 50).generate();
        let b = DemoGenerator::new(2, 50).generate();
        assert_ne!(a.rows, b.rows);
    }

    #[test]
    fn test_demo_table_normalizes_without_drops() {
        let table = DemoGenerator::default().generate();
        assert_eq!(table.len(), DEFAULT_ROWS);

        let set = RecordNormalizer::normalize(&table).unwrap();
        assert_eq!(set.len(), DEFAULT_ROWS);
        assert_eq!(set.report.dropped_rows, 0);
        assert!(set.transactions.iter().all(|t| t.gender.is_some()
            && t.age.is_some()
            && t.payment_method.is_some()));
    }

    #[test]
    fn test_demo_values_within_ranges() {
        let table = DemoGenerator::new(7, 500).generate();
        let set = RecordNormalizer::normalize(&table).unwrap();
        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();

        for tx in &set.transactions {
            assert!((1..10).contains(&tx.quantity));
            assert!((500.0..5_000.0).contains(&tx.unit_price));
            assert!(CATEGORIES.contains(&tx.category.as_str()));
            assert!(MALLS.contains(&tx.location.as_str()));
            let date = tx.timestamp.date();
            assert!(date >= first && date <= last);
            assert!(tx.customer_id.starts_with('C') && tx.customer_id.len() == 7);
        }
        assert_eq!(set.transactions[0].invoice_no, "I000001");
    }
}
