use anyhow::Result;
use chrono::{DateTime, Utc};
use shared::User;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::connection::DbConnection;

/// Repository for user profile operations
#[derive(Clone)]
pub struct UserRepository {
    db: DbConnection,
}

impl UserRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a user profile, overwriting any existing row for the same uid
    pub async fn upsert_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO users
                (id, name, email, photo_url, university, major, semester, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.photo_url)
        .bind(&user.university)
        .bind(&user.major)
        .bind(&user.semester)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    /// Retrieve a user profile by uid
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, photo_url, university, major, semester, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(map_row))
    }

    /// Update the editable profile fields for a user.
    /// Returns true if the user existed.
    pub async fn update_profile(
        &self,
        user_id: &str,
        name: &str,
        photo_url: Option<&str>,
        university: Option<&str>,
        major: Option<&str>,
        semester: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = ?,
                photo_url = ?,
                university = ?,
                major = ?,
                semester = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(photo_url)
        .bind(university)
        .bind(major)
        .bind(semester)
        .bind(updated_at)
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a user profile by uid
    pub async fn delete_user(&self, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_row(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        photo_url: row.get("photo_url"),
        university: row.get("university"),
        major: row.get("major"),
        semester: row.get("semester"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    }
}
