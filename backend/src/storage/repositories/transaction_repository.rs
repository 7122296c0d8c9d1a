use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use shared::{Transaction, TransactionKind};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::connection::DbConnection;

/// Repository for transaction operations
#[derive(Clone)]
pub struct TransactionRepository {
    db: DbConnection,
}

impl TransactionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a transaction and return its assigned row id
    pub async fn store_transaction(&self, transaction: &Transaction) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO transactions
                (user_id, amount, description, kind, category, payment_method, occurred_at, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&transaction.user_id)
        .bind(transaction.amount)
        .bind(&transaction.description)
        .bind(transaction.kind.as_str())
        .bind(&transaction.category)
        .bind(&transaction.payment_method)
        .bind(transaction.occurred_at)
        .bind(transaction.created_at)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// List all transactions for a user, newest first
    pub async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, amount, description, kind, category, payment_method, occurred_at, created_at
            FROM transactions
            WHERE user_id = ?
            ORDER BY occurred_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(map_row).collect()
    }

    /// Retrieve a specific transaction by id
    pub async fn get_transaction(&self, user_id: &str, transaction_id: i64) -> Result<Option<Transaction>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, amount, description, kind, category, payment_method, occurred_at, created_at
            FROM transactions
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(transaction_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(map_row).transpose()
    }

    /// Update an existing transaction in place.
    /// Returns true if a row for this user and id was found.
    pub async fn update_transaction(&self, transaction: &Transaction) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET amount = ?,
                description = ?,
                kind = ?,
                category = ?,
                payment_method = ?,
                occurred_at = ?
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(transaction.amount)
        .bind(&transaction.description)
        .bind(transaction.kind.as_str())
        .bind(&transaction.category)
        .bind(&transaction.payment_method)
        .bind(transaction.occurred_at)
        .bind(&transaction.user_id)
        .bind(transaction.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a single transaction by id for a specific user.
    /// Returns true if the transaction was found and deleted.
    pub async fn delete_transaction(&self, user_id: &str, transaction_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(transaction_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sum of all transaction amounts of one kind for a user, 0 when there are none
    pub async fn total_by_kind(&self, user_id: &str, kind: TransactionKind) -> Result<f64> {
        let total: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0.0) FROM transactions WHERE user_id = ? AND kind = ?",
        )
        .bind(user_id)
        .bind(kind.as_str())
        .fetch_one(self.db.pool())
        .await?;

        Ok(total)
    }
}

fn map_row(row: &SqliteRow) -> Result<Transaction> {
    let kind_str: String = row.get("kind");
    let kind = TransactionKind::parse(&kind_str)
        .ok_or_else(|| anyhow!("Unknown transaction kind in storage: {}", kind_str))?;

    Ok(Transaction {
        id: row.get("id"),
        user_id: row.get("user_id"),
        amount: row.get("amount"),
        description: row.get("description"),
        kind,
        category: row.get("category"),
        payment_method: row.get("payment_method"),
        occurred_at: row.get::<DateTime<Utc>, _>("occurred_at"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    })
}
