//! Budget service: set, list, and delete monthly category budgets.
//!
//! Setting a budget for a (category, month, year) that already has one
//! replaces the prior definition instead of erroring.

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, Utc};
use shared::{Budget, BudgetListResponse, SetBudgetRequest, DEFAULT_BUDGET_ICON};
use tracing::info;

use crate::domain::session::Session;
use crate::storage::{BudgetRepository, DbConnection};

#[derive(Clone)]
pub struct BudgetService {
    budget_repository: BudgetRepository,
}

impl BudgetService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            budget_repository: BudgetRepository::new(db),
        }
    }

    /// Create or replace the caller's budget for a category and month.
    /// Month and year default to the current local date.
    pub async fn set_budget(&self, session: &Session, request: SetBudgetRequest) -> Result<Budget> {
        let category = request.category.trim();
        if category.is_empty() {
            return Err(anyhow!("Category must not be empty"));
        }
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(anyhow!("Budget amount must be greater than zero"));
        }

        let now = Local::now();
        let month = request.month.unwrap_or_else(|| now.month());
        let year = request.year.unwrap_or_else(|| now.year());
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Month must be between 1 and 12"));
        }

        let icon = request
            .icon
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .unwrap_or_else(|| DEFAULT_BUDGET_ICON.to_string());

        let budget = Budget {
            id: 0,
            user_id: session.user_id().to_string(),
            category: category.to_string(),
            amount: request.amount,
            month,
            year,
            icon,
            description: request.description.unwrap_or_default(),
            created_at: Utc::now(),
        };

        let stored = self.budget_repository.upsert_budget(&budget).await?;
        info!(
            "Set budget {} for user {} ({} {}/{})",
            stored.id,
            session.user_id(),
            stored.category,
            stored.month,
            stored.year
        );

        Ok(stored)
    }

    /// List the caller's budgets. With a month and/or year given, only that
    /// period is returned (the other component defaults to the current
    /// date); with neither, every budget is returned.
    pub async fn list_budgets(
        &self,
        session: &Session,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<BudgetListResponse> {
        let budgets = match (month, year) {
            (None, None) => {
                self.budget_repository
                    .list_all_budgets(session.user_id())
                    .await?
            }
            (month, year) => {
                let now = Local::now();
                let month = month.unwrap_or_else(|| now.month());
                let year = year.unwrap_or_else(|| now.year());
                if !(1..=12).contains(&month) {
                    return Err(anyhow!("Month must be between 1 and 12"));
                }
                self.budget_repository
                    .list_budgets_for_month(session.user_id(), month, year)
                    .await?
            }
        };

        Ok(BudgetListResponse { budgets })
    }

    /// Delete one of the caller's budgets.
    /// Returns false when the budget does not exist.
    pub async fn delete_budget(&self, session: &Session, budget_id: i64) -> Result<bool> {
        let deleted = self
            .budget_repository
            .delete_budget(session.user_id(), budget_id)
            .await?;

        if deleted {
            info!("Deleted budget {} for user {}", budget_id, session.user_id());
        }

        Ok(deleted)
    }
}
