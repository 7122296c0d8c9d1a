use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use shared::Budget;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::connection::DbConnection;

/// Repository for budget operations
#[derive(Clone)]
pub struct BudgetRepository {
    db: DbConnection,
}

impl BudgetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a budget, replacing any existing budget for the same
    /// (user, category, month, year). Returns the stored row.
    pub async fn upsert_budget(&self, budget: &Budget) -> Result<Budget> {
        sqlx::query(
            r#"
            INSERT INTO budgets (user_id, category, amount, month, year, icon, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, category, month, year) DO UPDATE SET
                amount = excluded.amount,
                icon = excluded.icon,
                description = excluded.description,
                created_at = excluded.created_at
            "#,
        )
        .bind(&budget.user_id)
        .bind(&budget.category)
        .bind(budget.amount)
        .bind(budget.month)
        .bind(budget.year)
        .bind(&budget.icon)
        .bind(&budget.description)
        .bind(budget.created_at)
        .execute(self.db.pool())
        .await?;

        // The row id is preserved on conflict, so read the row back instead
        // of trusting last_insert_rowid
        self.get_budget(&budget.user_id, &budget.category, budget.month, budget.year)
            .await?
            .ok_or_else(|| anyhow!("Budget missing immediately after upsert"))
    }

    /// Fetch one budget by its logical key
    pub async fn get_budget(
        &self,
        user_id: &str,
        category: &str,
        month: u32,
        year: i32,
    ) -> Result<Option<Budget>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, category, amount, month, year, icon, description, created_at
            FROM budgets
            WHERE user_id = ? AND category = ? AND month = ? AND year = ?
            "#,
        )
        .bind(user_id)
        .bind(category)
        .bind(month)
        .bind(year)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(map_row))
    }

    /// List the budgets for one month, in creation order
    pub async fn list_budgets_for_month(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<Budget>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, category, amount, month, year, icon, description, created_at
            FROM budgets
            WHERE user_id = ? AND month = ? AND year = ?
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .bind(month)
        .bind(year)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(map_row).collect())
    }

    /// List every budget a user has defined, most recent period first
    pub async fn list_all_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, category, amount, month, year, icon, description, created_at
            FROM budgets
            WHERE user_id = ?
            ORDER BY year DESC, month DESC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(map_row).collect())
    }

    /// Delete a budget by id for a specific user.
    /// Returns true if the budget was found and deleted.
    pub async fn delete_budget(&self, user_id: &str, budget_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM budgets WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(budget_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_row(row: &SqliteRow) -> Budget {
    Budget {
        id: row.get("id"),
        user_id: row.get("user_id"),
        category: row.get("category"),
        amount: row.get("amount"),
        month: row.get("month"),
        year: row.get("year"),
        icon: row.get("icon"),
        description: row.get("description"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    async fn setup_repo() -> BudgetRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        BudgetRepository::new(db)
    }

    fn test_budget(user_id: &str, category: &str, amount: f64, month: u32, year: i32) -> Budget {
        Budget {
            id: 0,
            user_id: user_id.to_string(),
            category: category.to_string(),
            amount,
            month,
            year,
            icon: "💰".to_string(),
            description: String::new(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_budget() {
        let repo = setup_repo().await;

        let stored = repo
            .upsert_budget(&test_budget("u1", "Comida", 100.0, 6, 2025))
            .await
            .expect("Failed to upsert");

        assert!(stored.id > 0);
        assert_eq!(stored.category, "Comida");
        assert_eq!(stored.amount, 100.0);
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_budget() {
        let repo = setup_repo().await;

        let first = repo
            .upsert_budget(&test_budget("u1", "Comida", 100.0, 6, 2025))
            .await
            .unwrap();
        let second = repo
            .upsert_budget(&test_budget("u1", "Comida", 250.0, 6, 2025))
            .await
            .unwrap();

        // Same logical budget: the row is replaced, not duplicated
        assert_eq!(first.id, second.id);
        assert_eq!(second.amount, 250.0);

        let listed = repo.list_budgets_for_month("u1", 6, 2025).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].amount, 250.0);
    }

    #[tokio::test]
    async fn test_same_category_different_month_is_distinct() {
        let repo = setup_repo().await;

        repo.upsert_budget(&test_budget("u1", "Comida", 100.0, 6, 2025)).await.unwrap();
        repo.upsert_budget(&test_budget("u1", "Comida", 120.0, 7, 2025)).await.unwrap();

        assert_eq!(repo.list_budgets_for_month("u1", 6, 2025).await.unwrap().len(), 1);
        assert_eq!(repo.list_budgets_for_month("u1", 7, 2025).await.unwrap().len(), 1);
        assert_eq!(repo.list_all_budgets("u1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_all_orders_recent_period_first() {
        let repo = setup_repo().await;

        repo.upsert_budget(&test_budget("u1", "Comida", 100.0, 12, 2024)).await.unwrap();
        repo.upsert_budget(&test_budget("u1", "Transporte", 80.0, 6, 2025)).await.unwrap();
        repo.upsert_budget(&test_budget("u1", "Comida", 110.0, 1, 2025)).await.unwrap();

        let listed = repo.list_all_budgets("u1").await.unwrap();
        let periods: Vec<(i32, u32)> = listed.iter().map(|b| (b.year, b.month)).collect();
        assert_eq!(periods, vec![(2025, 6), (2025, 1), (2024, 12)]);
    }

    #[tokio::test]
    async fn test_delete_budget() {
        let repo = setup_repo().await;

        let stored = repo
            .upsert_budget(&test_budget("u1", "Comida", 100.0, 6, 2025))
            .await
            .unwrap();

        assert!(repo.delete_budget("u1", stored.id).await.unwrap());
        assert!(!repo.delete_budget("u1", stored.id).await.unwrap());
        assert!(repo.list_budgets_for_month("u1", 6, 2025).await.unwrap().is_empty());
    }
}
