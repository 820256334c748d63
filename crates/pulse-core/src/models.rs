use std::fmt;

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::classification::{AbcTier, Priority};

// ── Column names ──────────────────────────────────────────────────────────────

pub const COL_INVOICE_NO: &str = "invoice_no";
pub const COL_CUSTOMER_ID: &str = "customer_id";
pub const COL_GENDER: &str = "gender";
pub const COL_AGE: &str = "age";
pub const COL_CATEGORY: &str = "category";
pub const COL_QUANTITY: &str = "quantity";
pub const COL_PRICE: &str = "price";
pub const COL_PAYMENT_METHOD: &str = "payment_method";
pub const COL_INVOICE_DATE: &str = "invoice_date";
pub const COL_SHOPPING_MALL: &str = "shopping_mall";

/// Columns every input table must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_INVOICE_NO,
    COL_CUSTOMER_ID,
    COL_CATEGORY,
    COL_QUANTITY,
    COL_PRICE,
    COL_INVOICE_DATE,
    COL_SHOPPING_MALL,
];

// ── RawTable ──────────────────────────────────────────────────────────────────

/// Untyped tabular record set, exactly as read from a CSV file or emitted by
/// the demo generator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Header cells in file order.
    pub headers: Vec<String>,
    /// Data rows; each row has one cell per header.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append the rows of `other`. Headers must already agree.
    pub fn extend_rows(&mut self, other: RawTable) {
        self.rows.extend(other.rows);
    }
}

// ── Transaction ───────────────────────────────────────────────────────────────

/// A validated retail transaction with its derived line total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Invoice identifier, e.g. `"I138884"`.
    pub invoice_no: String,
    /// Customer identifier, e.g. `"C241288"`.
    pub customer_id: String,
    /// Product category.
    pub category: String,
    /// Units sold; always at least 1.
    pub quantity: u32,
    /// Price per unit; always positive.
    pub unit_price: f64,
    /// Invoice timestamp (midnight when the source only carries a date).
    pub timestamp: NaiveDateTime,
    /// Store / shopping mall where the sale happened.
    pub location: String,
    /// `quantity * unit_price`.
    pub line_total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl Transaction {
    /// Value of the given filterable dimension.
    pub fn dimension_value(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Category => &self.category,
            Dimension::Location => &self.location,
        }
    }

    /// Calendar month the transaction falls in.
    pub fn month(&self) -> MonthKey {
        MonthKey::new(self.timestamp.year(), self.timestamp.month())
    }
}

// ── Dimension ─────────────────────────────────────────────────────────────────

/// Categorical dimensions the dashboard can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Category,
    Location,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Category => "category",
            Dimension::Location => "location",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Filter selection ──────────────────────────────────────────────────────────

/// A single filter choice: every value, or exactly one.
///
/// Serialized as `"all"` or `{"only": "<value>"}` so a data value spelled
/// `All` never collapses into the catch-all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

/// Text that selects every value of a dimension.
pub const ALL_LABEL: &str = "all";

impl Selection {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Selection::All => ALL_LABEL,
            Selection::Only(v) => v,
        }
    }
}

/// Active selection for every filterable dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    pub category: Selection,
    pub location: Selection,
}

impl FilterSelection {
    pub fn new(category: Selection, location: Selection) -> Self {
        Self { category, location }
    }

    pub fn get(&self, dimension: Dimension) -> &Selection {
        match dimension {
            Dimension::Category => &self.category,
            Dimension::Location => &self.location,
        }
    }

    pub fn set(&mut self, dimension: Dimension, selection: Selection) {
        match dimension {
            Dimension::Category => self.category = selection,
            Dimension::Location => self.location = selection,
        }
    }

    /// `true` when every dimension is [`Selection::All`].
    pub fn is_identity(&self) -> bool {
        self.category == Selection::All && self.location == Selection::All
    }

    /// Whether `tx` satisfies every selection.
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.category.matches(&tx.category) && self.location.matches(&tx.location)
    }
}

// ── MonthKey ──────────────────────────────────────────────────────────────────

/// A calendar month. Ordering is chronological (year, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based month number.
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Months elapsed since January of year 0; consecutive months differ by 1.
    pub fn index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// `"YYYY-MM"` label.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ── Parse issues and pass warnings ────────────────────────────────────────────

/// Why a row was dropped during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    InvalidDate,
    InvalidQuantity,
    InvalidPrice,
}

/// A single dropped row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseIssue {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub kind: IssueKind,
    /// Offending cell content.
    pub value: String,
}

/// Non-fatal conditions surfaced to the caller once per pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PassWarning {
    /// More than the configured share of rows could not be parsed.
    RowsDropped {
        dropped: usize,
        total: usize,
        /// Dropped share in percent.
        pct: f64,
    },
    /// The active filter combination matched no rows.
    EmptyResult { category: String, location: String },
}

impl fmt::Display for PassWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassWarning::RowsDropped {
                dropped,
                total,
                pct,
            } => write!(
                f,
                "Dropped {} of {} rows with invalid dates or values ({:.1}%)",
                crate::formatting::format_number(*dropped as f64, 0),
                crate::formatting::format_number(*total as f64, 0),
                pct
            ),
            PassWarning::EmptyResult { category, location } => write!(
                f,
                "No transactions match category '{}' and location '{}'",
                category, location
            ),
        }
    }
}

// ── Summaries ─────────────────────────────────────────────────────────────────

/// Headline indicators for one filtered record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Sum of line totals.
    pub total_revenue: f64,
    /// Number of transactions.
    pub transaction_count: usize,
    /// Mean line total; `0.0` on an empty set.
    pub average_ticket: f64,
    /// Sum of quantities.
    pub total_units: u64,
    /// `total_revenue * savings_rate`.
    pub potential_savings: f64,
    /// `total_revenue * recovery_rate`.
    pub recoverable_sales: f64,
}

/// One row of the category table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total_revenue: f64,
    pub total_quantity: u64,
    pub transaction_count: usize,
    /// Share of the filtered revenue, in percent.
    pub revenue_share_pct: f64,
    /// Running share in descending-revenue order, in percent.
    pub cumulative_share_pct: f64,
    /// Pareto tier derived from `cumulative_share_pct`.
    pub tier: AbcTier,
    /// Median-based replenishment priority.
    pub priority: Priority,
}
