//! Date-based grouping of transaction lists for display.
//!
//! Transactions are bucketed by their local calendar date: a "Today" group,
//! a "Yesterday" group (each present only when non-empty), then one group
//! per remaining distinct date labeled `dd/mm/yyyy`. Remaining groups are
//! ordered by date descending so the bucket order is deterministic; inside
//! each group the relative order of the input is preserved.

use chrono::{Duration, Local, NaiveDate};
use shared::{Transaction, TransactionGroup};

/// Format used for group labels older than yesterday.
const DATE_LABEL_FORMAT: &str = "%d/%m/%Y";

/// Group a transaction snapshot by local calendar date relative to `today`.
/// Every input transaction lands in exactly one group.
pub fn group_transactions_by_date(transactions: &[Transaction], today: NaiveDate) -> Vec<TransactionGroup> {
    let yesterday = today - Duration::days(1);

    let mut today_bucket: Vec<Transaction> = Vec::new();
    let mut yesterday_bucket: Vec<Transaction> = Vec::new();
    let mut older: Vec<(NaiveDate, Vec<Transaction>)> = Vec::new();

    for transaction in transactions {
        let date = local_date(transaction);
        if date == today {
            today_bucket.push(transaction.clone());
        } else if date == yesterday {
            yesterday_bucket.push(transaction.clone());
        } else {
            match older.iter_mut().find(|(bucket_date, _)| *bucket_date == date) {
                Some((_, bucket)) => bucket.push(transaction.clone()),
                None => older.push((date, vec![transaction.clone()])),
            }
        }
    }

    // Deterministic bucket order: most recent date first
    older.sort_by(|a, b| b.0.cmp(&a.0));

    let mut groups = Vec::new();
    if !today_bucket.is_empty() {
        groups.push(TransactionGroup {
            label: "Today".to_string(),
            transactions: today_bucket,
        });
    }
    if !yesterday_bucket.is_empty() {
        groups.push(TransactionGroup {
            label: "Yesterday".to_string(),
            transactions: yesterday_bucket,
        });
    }
    for (date, bucket) in older {
        groups.push(TransactionGroup {
            label: date.format(DATE_LABEL_FORMAT).to_string(),
            transactions: bucket,
        });
    }

    groups
}

/// The calendar date of a transaction in the caller's local timezone.
pub fn local_date(transaction: &Transaction) -> NaiveDate {
    transaction.occurred_at.with_timezone(&Local).date_naive()
}
