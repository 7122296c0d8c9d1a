//! Report aggregation logic: category breakdowns and budget comparisons.
//!
//! All functions here are pure: they take a snapshot of records, return a
//! freshly computed result, and never error. Division by zero and other
//! non-finite intermediate values are normalized to 0 rather than
//! propagated.
//!
//! Category matching is deliberately asymmetric: breakdown grouping is
//! case-sensitive (labels appear exactly as stored), while the
//! budget-to-expense join is case-insensitive. Both sides of the asymmetry
//! are pinned by tests below.

use chrono::{Datelike, Local};
use shared::{Budget, BudgetComparison, CategoryBreakdown, Transaction};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Group expenses by exact category label and compute each group's total
/// and share of all expenses, largest total first. An empty input yields
/// an empty breakdown.
pub fn category_breakdown(expenses: &[Transaction]) -> Vec<CategoryBreakdown> {
    if expenses.is_empty() {
        return Vec::new();
    }

    let total: f64 = expenses.iter().map(|t| t.amount).sum();

    let mut by_category: HashMap<&str, f64> = HashMap::new();
    for transaction in expenses {
        *by_category.entry(transaction.category.as_str()).or_insert(0.0) += transaction.amount;
    }

    let mut breakdown: Vec<CategoryBreakdown> = by_category
        .into_iter()
        .map(|(category, amount)| CategoryBreakdown {
            category: category.to_string(),
            total_amount: amount,
            percentage: if total > 0.0 { amount / total * 100.0 } else { 0.0 },
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.total_amount
            .partial_cmp(&a.total_amount)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });

    breakdown
}

/// Expense totals keyed by exact category label. This is the breakdown
/// without percentages, in the shape the alert generator consumes.
pub fn expense_totals_by_category(expenses: &[Transaction]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for transaction in expenses {
        *totals.entry(transaction.category.clone()).or_insert(0.0) += transaction.amount;
    }
    totals
}

/// Join each budget against the actual spend of its category
/// (case-insensitive match), highest usage first. Every input budget
/// produces exactly one comparison; a budget with no matching expenses
/// compares against an actual of 0.
pub fn compare_budgets(budgets: &[Budget], expenses: &[Transaction]) -> Vec<BudgetComparison> {
    let mut comparisons: Vec<BudgetComparison> = budgets
        .iter()
        .map(|budget| {
            let budget_category = budget.category.to_lowercase();
            let actual: f64 = expenses
                .iter()
                .filter(|t| t.category.to_lowercase() == budget_category)
                .map(|t| t.amount)
                .sum();

            let usage = if budget.amount > 0.0 {
                actual / budget.amount * 100.0
            } else {
                0.0
            };

            BudgetComparison {
                category: budget.category.clone(),
                budget_amount: budget.amount,
                actual_amount: actual,
                usage_percentage: if usage.is_finite() { usage } else { 0.0 },
                over_budget: actual > budget.amount,
            }
        })
        .collect();

    comparisons.sort_by(|a, b| {
        b.usage_percentage
            .partial_cmp(&a.usage_percentage)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });

    comparisons
}

/// Percentage of comparisons whose spend stayed within the budget.
/// 0 when there are no comparisons.
pub fn compliance_ratio(comparisons: &[BudgetComparison]) -> f64 {
    if comparisons.is_empty() {
        return 0.0;
    }

    let within = comparisons
        .iter()
        .filter(|c| c.actual_amount <= c.budget_amount)
        .count();

    within as f64 / comparisons.len() as f64 * 100.0
}

/// Whether a transaction falls in the given calendar month, judged by the
/// caller's local timezone.
pub fn is_in_month(transaction: &Transaction, month: u32, year: i32) -> bool {
    let local = transaction.occurred_at.with_timezone(&Local);
    local.month() == month && local.year() == year
}
