//! Record normalization: schema check, typed parsing and derived revenue.
//!
//! The normalizer borrows a [`RawTable`] and builds a fresh
//! [`NormalizedSet`]; the raw table is never modified, so the same input can
//! be normalized again after a reload or filter change.

use pulse_core::dates::parse_day_first;
use pulse_core::error::{PulseError, Result};
use pulse_core::formatting::percentage_raw;
use pulse_core::models::{
    IssueKind, ParseIssue, PassWarning, RawTable, Transaction, COL_AGE, COL_CATEGORY,
    COL_CUSTOMER_ID, COL_GENDER, COL_INVOICE_DATE, COL_INVOICE_NO, COL_PAYMENT_METHOD, COL_PRICE,
    COL_QUANTITY, COL_SHOPPING_MALL, REQUIRED_COLUMNS,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// ── Column resolution ─────────────────────────────────────────────────────────

/// Positions of the known columns within a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    invoice_no: usize,
    customer_id: usize,
    category: usize,
    quantity: usize,
    price: usize,
    invoice_date: usize,
    shopping_mall: usize,
    gender: Option<usize>,
    age: Option<usize>,
    payment_method: Option<usize>,
}

impl ColumnMap {
    /// Match `headers` case-insensitively after trimming.
    ///
    /// Fails with [`PulseError::Schema`] naming every required column that is
    /// absent, in canonical column order.
    pub fn resolve(headers: &[String]) -> Result<Self> {
        let keys: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &str| keys.iter().position(|k| k == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| find(col).is_none())
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PulseError::Schema { missing });
        }

        let required = |name: &str| {
            find(name).ok_or_else(|| PulseError::Schema {
                missing: vec![name.to_string()],
            })
        };

        Ok(Self {
            invoice_no: required(COL_INVOICE_NO)?,
            customer_id: required(COL_CUSTOMER_ID)?,
            category: required(COL_CATEGORY)?,
            quantity: required(COL_QUANTITY)?,
            price: required(COL_PRICE)?,
            invoice_date: required(COL_INVOICE_DATE)?,
            shopping_mall: required(COL_SHOPPING_MALL)?,
            gender: find(COL_GENDER),
            age: find(COL_AGE),
            payment_method: find(COL_PAYMENT_METHOD),
        })
    }
}

// ── Output types ──────────────────────────────────────────────────────────────

/// Row accounting for one normalization run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizeReport {
    /// Data rows in the input.
    pub total_rows: usize,
    /// Rows that could not be turned into a transaction.
    pub dropped_rows: usize,
    /// One entry per dropped row.
    pub issues: Vec<ParseIssue>,
}

impl NormalizeReport {
    /// Warning to surface when more than `ratio` of the rows were dropped.
    pub fn drop_warning(&self, ratio: f64) -> Option<PassWarning> {
        if self.total_rows == 0 || self.dropped_rows as f64 <= self.total_rows as f64 * ratio {
            return None;
        }
        Some(PassWarning::RowsDropped {
            dropped: self.dropped_rows,
            total: self.total_rows,
            pct: percentage_raw(self.dropped_rows as f64, self.total_rows as f64),
        })
    }

    /// Number of dropped rows of the given kind.
    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }
}

/// Validated transactions plus the accounting that produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSet {
    /// Transactions in input order.
    pub transactions: Vec<Transaction>,
    pub report: NormalizeReport,
}

impl NormalizedSet {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

// ── RecordNormalizer ──────────────────────────────────────────────────────────

/// Stateless converter from raw rows to [`Transaction`]s.
pub struct RecordNormalizer;

impl RecordNormalizer {
    /// Normalize every row of `table`.
    ///
    /// The schema is checked before any row is touched. Rows whose invoice
    /// date is not a day-first date, whose quantity is not a positive integer,
    /// or whose price is not a positive number are dropped and recorded in
    /// the report; everything else becomes a transaction with
    /// `line_total = quantity * unit_price`.
    pub fn normalize(table: &RawTable) -> Result<NormalizedSet> {
        let columns = ColumnMap::resolve(&table.headers)?;

        let mut transactions = Vec::with_capacity(table.len());
        let mut issues = Vec::new();

        for (idx, row) in table.rows.iter().enumerate() {
            match Self::parse_row(row, &columns) {
                Ok(tx) => transactions.push(tx),
                Err((kind, value)) => {
                    let issue = ParseIssue {
                        row: idx + 1,
                        kind,
                        value,
                    };
                    debug!(row = issue.row, kind = ?issue.kind, value = %issue.value, "dropping row");
                    issues.push(issue);
                }
            }
        }

        let report = NormalizeReport {
            total_rows: table.len(),
            dropped_rows: issues.len(),
            issues,
        };
        if report.dropped_rows > 0 {
            warn!(
                "Dropped {} of {} rows during normalization",
                report.dropped_rows, report.total_rows
            );
        }

        Ok(NormalizedSet {
            transactions,
            report,
        })
    }

    fn parse_row(
        row: &[String],
        columns: &ColumnMap,
    ) -> std::result::Result<Transaction, (IssueKind, String)> {
        let date_cell = cell(row, columns.invoice_date);
        let timestamp = parse_day_first(date_cell)
            .ok_or_else(|| (IssueKind::InvalidDate, date_cell.to_string()))?;

        let quantity_cell = cell(row, columns.quantity);
        let quantity = parse_quantity(quantity_cell)
            .ok_or_else(|| (IssueKind::InvalidQuantity, quantity_cell.to_string()))?;

        let price_cell = cell(row, columns.price);
        let unit_price = parse_price(price_cell)
            .ok_or_else(|| (IssueKind::InvalidPrice, price_cell.to_string()))?;

        Ok(Transaction {
            invoice_no: cell(row, columns.invoice_no).to_string(),
            customer_id: cell(row, columns.customer_id).to_string(),
            category: cell(row, columns.category).to_string(),
            quantity,
            unit_price,
            timestamp,
            location: cell(row, columns.shopping_mall).to_string(),
            line_total: f64::from(quantity) * unit_price,
            gender: optional_text(row, columns.gender),
            age: columns.age.and_then(|i| cell(row, i).parse().ok()),
            payment_method: optional_text(row, columns.payment_method),
        })
    }
}

// ── Cell helpers ──────────────────────────────────────────────────────────────

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.trim()).unwrap_or("")
}

fn optional_text(row: &[String], idx: Option<usize>) -> Option<String> {
    idx.map(|i| cell(row, i))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Positive whole number; `"3.0"` is accepted as 3.
fn parse_quantity(value: &str) -> Option<u32> {
    if let Ok(q) = value.parse::<u32>() {
        return (q > 0).then_some(q);
    }
    let f: f64 = value.parse().ok()?;
    (f.is_finite() && f >= 1.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX)).then_some(f as u32)
}

/// Positive finite number.
fn parse_price(value: &str) -> Option<f64> {
    let p: f64 = value.parse().ok()?;
    (p.is_finite() && p > 0.0).then_some(p)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
