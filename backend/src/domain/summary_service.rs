//! Summary service: all-time balance figures plus budget alerts for the
//! home screen.

use anyhow::Result;
use chrono::{Datelike, Local};
use shared::{FinancialSummary, SummaryResponse, Transaction, TransactionKind};
use tracing::info;

use crate::domain::alerts::generate_budget_alerts;
use crate::domain::reports::{expense_totals_by_category, is_in_month};
use crate::domain::session::Session;
use crate::storage::{BudgetRepository, DbConnection, TransactionRepository};

#[derive(Clone)]
pub struct SummaryService {
    transaction_repository: TransactionRepository,
    budget_repository: BudgetRepository,
}

impl SummaryService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            transaction_repository: TransactionRepository::new(db.clone()),
            budget_repository: BudgetRepository::new(db),
        }
    }

    /// Compute the caller's financial summary and the alerts for the
    /// current month's budgets.
    pub async fn financial_summary(&self, session: &Session) -> Result<SummaryResponse> {
        let total_income = self
            .transaction_repository
            .total_by_kind(session.user_id(), TransactionKind::Income)
            .await?;
        let total_expenses = self
            .transaction_repository
            .total_by_kind(session.user_id(), TransactionKind::Expense)
            .await?;

        let summary = FinancialSummary {
            available_balance: total_income - total_expenses,
            total_income,
            total_expenses,
        };

        let now = Local::now();
        let budgets = self
            .budget_repository
            .list_budgets_for_month(session.user_id(), now.month(), now.year())
            .await?;

        let transactions = self
            .transaction_repository
            .list_transactions(session.user_id())
            .await?;
        let month_expenses: Vec<Transaction> = transactions
            .into_iter()
            .filter(|t| t.kind == TransactionKind::Expense && is_in_month(t, now.month(), now.year()))
            .collect();

        let spent_by_category = expense_totals_by_category(&month_expenses);
        let alerts = generate_budget_alerts(&budgets, &spent_by_category);

        info!(
            "Summary for user {}: balance {:.2}, {} alerts",
            session.user_id(),
            summary.available_balance,
            alerts.len()
        );

        Ok(SummaryResponse { summary, alerts })
    }
}
