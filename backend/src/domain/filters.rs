//! Transaction filtering: a conjunction of optional clauses.
//!
//! Every clause is vacuously true when its filter is unset or empty, so a
//! default filter returns the input unchanged. Amount bounds arrive as raw
//! strings; anything that does not parse as a number is treated as "no
//! constraint" rather than an error. The output preserves input order.

use shared::{Transaction, TransactionFilter};

/// Apply the filter to a transaction snapshot, returning the matching
/// subset in input order.
pub fn filter_transactions(transactions: &[Transaction], filter: &TransactionFilter) -> Vec<Transaction> {
    let search = filter
        .search_text
        .as_deref()
        .unwrap_or("")
        .to_lowercase();
    let min_amount = filter.min_amount.as_deref().and_then(parse_amount);
    let max_amount = filter.max_amount.as_deref().and_then(parse_amount);

    transactions
        .iter()
        .filter(|transaction| {
            let matches_search = transaction.description.to_lowercase().contains(&search)
                || transaction.category.to_lowercase().contains(&search);
            let matches_kind = filter.kind.map_or(true, |kind| transaction.kind == kind);
            let matches_category = filter.categories.is_empty()
                || filter.categories.contains(&transaction.category);
            let matches_payment = filter.payment_methods.is_empty()
                || filter.payment_methods.contains(&transaction.payment_method);
            let matches_start = filter
                .start_date
                .map_or(true, |start| transaction.occurred_at >= start);
            let matches_end = filter
                .end_date
                .map_or(true, |end| transaction.occurred_at <= end);
            let matches_min = min_amount.map_or(true, |min| transaction.amount >= min);
            let matches_max = max_amount.map_or(true, |max| transaction.amount <= max);

            matches_search
                && matches_kind
                && matches_category
                && matches_payment
                && matches_start
                && matches_end
                && matches_min
                && matches_max
        })
        .cloned()
        .collect()
}

/// Parse a user-supplied amount bound. None means no constraint.
fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}
