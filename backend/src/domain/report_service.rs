//! Report service: assembles the month-scoped spending report.

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local};
use shared::{MonthlyReport, Transaction, TransactionKind};
use std::cmp::Ordering;
use tracing::info;

use crate::domain::reports::{category_breakdown, compare_budgets, compliance_ratio, is_in_month};
use crate::domain::session::Session;
use crate::storage::{BudgetRepository, DbConnection, TransactionRepository};

/// How many of the month's largest expenses the report highlights.
const TOP_EXPENSE_COUNT: usize = 5;

#[derive(Clone)]
pub struct ReportService {
    transaction_repository: TransactionRepository,
    budget_repository: BudgetRepository,
}

impl ReportService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            transaction_repository: TransactionRepository::new(db.clone()),
            budget_repository: BudgetRepository::new(db),
        }
    }

    /// Build the report for one calendar month; defaults to the current
    /// local month. Every figure is recomputed from the current snapshot.
    pub async fn monthly_report(
        &self,
        session: &Session,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<MonthlyReport> {
        let now = Local::now();
        let month = month.unwrap_or_else(|| now.month());
        let year = year.unwrap_or_else(|| now.year());
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Month must be between 1 and 12"));
        }

        let transactions = self
            .transaction_repository
            .list_transactions(session.user_id())
            .await?;
        let budgets = self
            .budget_repository
            .list_budgets_for_month(session.user_id(), month, year)
            .await?;

        let monthly: Vec<Transaction> = transactions
            .into_iter()
            .filter(|t| is_in_month(t, month, year))
            .collect();

        let total_income: f64 = monthly
            .iter()
            .filter(|t| t.kind == TransactionKind::Income)
            .map(|t| t.amount)
            .sum();

        let expenses: Vec<Transaction> = monthly
            .into_iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .collect();
        let total_expenses: f64 = expenses.iter().map(|t| t.amount).sum();

        let mut top_expenses = expenses.clone();
        top_expenses.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(Ordering::Equal)
        });
        top_expenses.truncate(TOP_EXPENSE_COUNT);

        let budget_comparisons = compare_budgets(&budgets, &expenses);
        let compliance = compliance_ratio(&budget_comparisons);

        info!(
            "Built report for user {} ({}/{}): {} expenses, {} budgets",
            session.user_id(),
            month,
            year,
            expenses.len(),
            budget_comparisons.len()
        );

        Ok(MonthlyReport {
            month,
            year,
            total_income,
            total_expenses,
            category_breakdown: category_breakdown(&expenses),
            top_expenses,
            budget_comparisons,
            compliance_ratio: compliance,
        })
    }
}
