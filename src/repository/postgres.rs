//! PostgreSQL todo repository.
//!
//! Queries are runtime-bound (`sqlx::query` with explicit binds and row
//! mapping) so the crate builds without a live database. Row timestamps
//! (`created_at`, `updated_at`) are assigned by the database, keeping
//! clock ownership with the store.

use crate::error::StoreError;
use crate::model::{Todo, TodoFields};
use crate::repository::TodoRepository;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

/// PostgreSQL-backed todo repository.
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    /// Connection pool.
    pool: PgPool,
}

const TODO_COLUMNS: &str =
    "id, title, description, expiry_at, percent_complete, is_done, created_at, updated_at";

impl PostgresTodoRepository {
    /// Create a repository over the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a migration fails to apply.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("migration failed: {e}")))?;
        Ok(())
    }
}

fn row_to_todo(row: &PgRow) -> Result<Todo, StoreError> {
    Ok(Todo {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        expiry_at: row.try_get("expiry_at")?,
        percent_complete: row.try_get("percent_complete")?,
        is_done: row.try_get("is_done")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl TodoRepository for PostgresTodoRepository {
    async fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {TODO_COLUMNS} FROM todos ORDER BY expiry_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_todo).collect()
    }

    async fn get(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        let row = sqlx::query(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_todo).transpose()
    }

    async fn list_in_expiry_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Todo>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {TODO_COLUMNS} FROM todos \
             WHERE expiry_at >= $1 AND expiry_at <= $2 \
             ORDER BY expiry_at ASC, id ASC"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_todo).collect()
    }

    async fn create(&self, fields: TodoFields) -> Result<Todo, StoreError> {
        let row = sqlx::query(&format!(
            "INSERT INTO todos (title, description, expiry_at, percent_complete, is_done, created_at) \
             VALUES ($1, $2, $3, $4, $5, NOW()) \
             RETURNING {TODO_COLUMNS}"
        ))
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.expiry_at)
        .bind(fields.percent_complete)
        .bind(fields.is_done)
        .fetch_one(&self.pool)
        .await?;

        row_to_todo(&row)
    }

    async fn replace(&self, id: i64, fields: TodoFields) -> Result<Option<Todo>, StoreError> {
        let row = sqlx::query(&format!(
            "UPDATE todos \
             SET title = $2, description = $3, expiry_at = $4, \
                 percent_complete = $5, is_done = $6, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {TODO_COLUMNS}"
        ))
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.expiry_at)
        .bind(fields.percent_complete)
        .bind(fields.is_done)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_todo).transpose()
    }

    async fn update_percent(&self, id: i64, percent: i32) -> Result<Option<Todo>, StoreError> {
        // is_done ratchets: set when the percent hits 100, never cleared here.
        let row = sqlx::query(&format!(
            "UPDATE todos \
             SET percent_complete = $2, is_done = is_done OR ($2 = 100), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {TODO_COLUMNS}"
        ))
        .bind(id)
        .bind(percent)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_todo).transpose()
    }

    async fn mark_done(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        let row = sqlx::query(&format!(
            "UPDATE todos \
             SET percent_complete = 100, is_done = TRUE, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {TODO_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_todo).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
