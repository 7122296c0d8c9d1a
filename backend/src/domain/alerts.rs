//! Budget alert generation for the home screen.
//!
//! A budget alerts once its spend reaches 50% of the cap. The message
//! distinguishes a budget with money left from one that is exhausted, each
//! with a formatted currency amount. Alerts are emitted in the order the
//! budgets are supplied; the supplying query orders budgets by creation, so
//! the alert order is stable across recomputations.

use shared::{Budget, BudgetAlert};
use std::collections::HashMap;

/// Usage percentage at which a budget starts alerting.
const ALERT_THRESHOLD_PERCENT: f64 = 50.0;

/// Scan budgets against the period's expense totals (keyed by exact
/// category label) and emit one alert per budget at or past the threshold.
pub fn generate_budget_alerts(
    budgets: &[Budget],
    spent_by_category: &HashMap<String, f64>,
) -> Vec<BudgetAlert> {
    budgets
        .iter()
        .filter_map(|budget| {
            let spent = spent_by_category.get(&budget.category).copied().unwrap_or(0.0);
            let usage = if budget.amount > 0.0 {
                spent / budget.amount * 100.0
            } else {
                0.0
            };
            let usage = if usage.is_finite() { usage } else { 0.0 };

            if usage < ALERT_THRESHOLD_PERCENT {
                return None;
            }

            let remaining = budget.amount - spent;
            let message = if remaining > 0.0 {
                format!(
                    "You have ${:.2} of budget remaining ({}% spent)",
                    remaining, usage as i64
                )
            } else {
                format!(
                    "You have exhausted your {} budget (${:.2} spent)",
                    budget.category, spent
                )
            };

            Some(BudgetAlert {
                id: budget.id.to_string(),
                icon: "⚠️".to_string(),
                title: format!("Budget Alert - {}", budget.category),
                message,
            })
        })
        .collect()
}
