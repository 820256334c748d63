//! Categorical filter stage.

use std::collections::BTreeSet;

use pulse_core::error::{PulseError, Result};
use pulse_core::models::{Dimension, FilterSelection, Selection, Transaction};

/// Keep the transactions matching every selection in `filters`, in input
/// order. An all-`All` selection returns the input unchanged, and applying
/// the same filters to the output changes nothing.
pub fn apply_filters(transactions: &[Transaction], filters: &FilterSelection) -> Vec<Transaction> {
    if filters.is_identity() {
        return transactions.to_vec();
    }
    transactions
        .iter()
        .filter(|tx| filters.matches(tx))
        .cloned()
        .collect()
}

/// Sorted distinct values of `dimension`.
pub fn distinct_values(transactions: &[Transaction], dimension: Dimension) -> Vec<String> {
    transactions
        .iter()
        .map(|tx| tx.dimension_value(dimension))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Selectable options for `dimension`: [`Selection::All`] first, then every
/// distinct value in sorted order.
pub fn filter_options(transactions: &[Transaction], dimension: Dimension) -> Vec<Selection> {
    std::iter::once(Selection::All)
        .chain(
            distinct_values(transactions, dimension)
                .into_iter()
                .map(Selection::Only),
        )
        .collect()
}

/// Reject selections naming a value that never occurs in `transactions`.
pub fn validate_filters(transactions: &[Transaction], filters: &FilterSelection) -> Result<()> {
    for dimension in [Dimension::Category, Dimension::Location] {
        if let Selection::Only(value) = filters.get(dimension) {
            let known = transactions
                .iter()
                .any(|tx| tx.dimension_value(dimension) == value);
            if !known {
                return Err(PulseError::InvalidFilter {
                    dimension: dimension.to_string(),
                    value: value.clone(),
                });
            }
        }
    }
    Ok(())
}

/// The option after `current` in `options`, wrapping around. Unknown
/// selections restart at the first option.
pub fn next_option(options: &[Selection], current: &Selection) -> Selection {
    match options.iter().position(|o| o == current) {
        Some(i) => options[(i + 1) % options.len()].clone(),
        None => options.first().cloned().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(category: &str, location: &str) -> Transaction {
        Transaction {
            invoice_no: "I000001".to_string(),
            customer_id: "C100000".to_string(),
            category: category.to_string(),
            quantity: 1,
            unit_price: 10.0,
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            location: location.to_string(),
            line_total: 10.0,
            gender: None,
            age: None,
            payment_method: None,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("Shoes", "North"),
            tx("Home", "South"),
            tx("Shoes", "South"),
            tx("Clothing", "North"),
        ]
    }

    fn only(v: &str) -> Selection {
        Selection::Only(v.to_string())
    }

    #[test]
    fn test_all_selection_is_identity() {
        let data = sample();
        assert_eq!(apply_filters(&data, &FilterSelection::default()), data);
    }

    #[test]
    fn test_filters_combine() {
        let data = sample();
        let out = apply_filters(&data, &FilterSelection::new(only("Shoes"), only("South")));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category, "Shoes");
        assert_eq!(out[0].location, "South");
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let data = sample();
        let filters = FilterSelection::new(only("Shoes"), Selection::All);
        let once = apply_filters(&data, &filters);
        let twice = apply_filters(&once, &filters);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_category_named_all_is_a_concrete_value() {
        let data = vec![tx("All", "North"), tx("Shoes", "North")];
        let filters = FilterSelection::new(only("All"), Selection::All);
        validate_filters(&data, &filters).unwrap();

        let out = apply_filters(&data, &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category, "All");
        assert_eq!(
            filter_options(&data, Dimension::Category),
            vec![Selection::All, only("All"), only("Shoes")]
        );
    }

    #[test]
    fn test_unmatched_filter_yields_empty() {
        let data = sample();
        let out = apply_filters(&data, &FilterSelection::new(only("Home"), only("North")));
        assert!(out.is_empty());
    }

    #[test]
    fn test_distinct_values_sorted() {
        let data = sample();
        assert_eq!(
            distinct_values(&data, Dimension::Category),
            vec!["Clothing", "Home", "Shoes"]
        );
        assert_eq!(
            distinct_values(&data, Dimension::Location),
            vec!["North", "South"]
        );
    }

    #[test]
    fn test_filter_options_all_first() {
        let options = filter_options(&sample(), Dimension::Location);
        assert_eq!(options, vec![Selection::All, only("North"), only("South")]);
    }

    #[test]
    fn test_validate_filters() {
        let data = sample();
        assert!(validate_filters(&data, &FilterSelection::new(only("Home"), Selection::All)).is_ok());
        let err = validate_filters(&data, &FilterSelection::new(Selection::All, only("Moon")))
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown location filter value: Moon");
    }

    #[test]
    fn test_next_option_wraps() {
        let options = vec![Selection::All, only("A"), only("B")];
        assert_eq!(next_option(&options, &Selection::All), only("A"));
        assert_eq!(next_option(&options, &only("B")), Selection::All);
        assert_eq!(next_option(&options, &only("Z")), Selection::All);
        assert_eq!(next_option(&[], &only("Z")), Selection::All);
    }
}
