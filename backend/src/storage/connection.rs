use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

/// DbConnection manages the SQLite pool shared by all repositories
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;

        Self::setup_schema(&pool).await?;
        Self::apply_migrations(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name so tests don't share state
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Create users table (profiles keyed by the identity provider's uid)
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                photo_url TEXT,
                university TEXT,
                major TEXT,
                semester TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create transactions table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                amount REAL NOT NULL,
                description TEXT NOT NULL,
                kind TEXT NOT NULL,
                category TEXT NOT NULL,
                payment_method TEXT NOT NULL DEFAULT 'Efectivo',
                occurred_at TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for user_id filtering
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_transactions_user_id
            ON transactions(user_id);
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for ordering by occurred_at (newest-first listing)
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_transactions_occurred_at
            ON transactions(occurred_at DESC);
            "#,
        )
        .execute(pool)
        .await?;

        // Create budgets table. The UNIQUE constraint backs the
        // replace-on-conflict semantics of setting a budget: one logical
        // budget per (user, category, month, year).
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS budgets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                category TEXT NOT NULL,
                amount REAL NOT NULL,
                month INTEGER NOT NULL,
                year INTEGER NOT NULL,
                icon TEXT NOT NULL DEFAULT '💰',
                description TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                UNIQUE(user_id, category, month, year)
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for per-month budget lookup
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_budgets_user_month
            ON budgets(user_id, year, month);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Apply column additions for databases created by older builds.
    /// SQLite has no ADD COLUMN IF NOT EXISTS, so the duplicate-column
    /// error is treated as "already migrated".
    async fn apply_migrations(pool: &SqlitePool) -> Result<()> {
        let statements = [
            "ALTER TABLE budgets ADD COLUMN icon TEXT NOT NULL DEFAULT '💰'",
            "ALTER TABLE budgets ADD COLUMN description TEXT NOT NULL DEFAULT ''",
        ];

        for statement in statements {
            if let Err(e) = sqlx::query(statement).execute(pool).await {
                if !e.to_string().contains("duplicate column name") {
                    return Err(e.into());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_setup_is_idempotent() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        // Running setup again against the same pool must not error
        DbConnection::setup_schema(db.pool()).await.expect("Second setup failed");
        DbConnection::apply_migrations(db.pool()).await.expect("Second migration pass failed");
    }

    #[tokio::test]
    async fn test_budget_uniqueness_constraint_exists() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        sqlx::query(
            "INSERT INTO budgets (user_id, category, amount, month, year, created_at)
             VALUES ('u1', 'Comida', 100.0, 6, 2025, '2025-06-01T00:00:00Z')",
        )
        .execute(db.pool())
        .await
        .expect("First insert failed");

        // A plain second insert for the same (user, category, month, year) must conflict
        let duplicate = sqlx::query(
            "INSERT INTO budgets (user_id, category, amount, month, year, created_at)
             VALUES ('u1', 'Comida', 200.0, 6, 2025, '2025-06-02T00:00:00Z')",
        )
        .execute(db.pool())
        .await;

        assert!(duplicate.is_err());
    }
}
