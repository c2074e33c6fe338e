//! `SQLite`-backed durable store for production deployments.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{NewStoredRequest, StoredRequest};
use crate::{AppError, Result};

use super::store::RequestStore;

/// Store implementation over a `SQLite` connection pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct RequestRow {
    id: i64,
    title: String,
    details: String,
    category: String,
    priority: String,
    status: String,
    user_id: Option<i64>,
    user_name: Option<String>,
    created_at: String,
    updated_at: String,
}

impl RequestRow {
    /// Convert a database row into the domain model.
    fn into_stored(self) -> Result<StoredRequest> {
        let created_at = chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| AppError::Db(format!("invalid created_at: {e}")))?
            .with_timezone(&Utc);
        let updated_at = chrono::DateTime::parse_from_rfc3339(&self.updated_at)
            .map_err(|e| AppError::Db(format!("invalid updated_at: {e}")))?
            .with_timezone(&Utc);

        Ok(StoredRequest {
            id: self.id,
            title: self.title,
            details: self.details,
            category: self.category,
            priority: self.priority,
            status: self.status,
            user_id: self.user_id,
            user_name: self.user_name,
            created_at,
            updated_at,
        })
    }
}

impl SqliteStore {
    /// Wrap a connected pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for SqliteStore {
    async fn create(&self, request: NewStoredRequest) -> Result<StoredRequest> {
        let now = Utc::now();
        let now_s = now.to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO requests (title, details, category, priority, status,
             user_id, user_name, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&request.title)
        .bind(&request.details)
        .bind(&request.category)
        .bind(&request.priority)
        .bind(&request.status)
        .bind(request.user_id)
        .bind(&request.user_name)
        .bind(&now_s)
        .bind(&now_s)
        .execute(&self.pool)
        .await?;

        Ok(StoredRequest {
            id: result.last_insert_rowid(),
            title: request.title,
            details: request.details,
            category: request.category,
            priority: request.priority,
            status: request.status,
            user_id: request.user_id,
            user_name: request.user_name,
            created_at: now,
            updated_at: now,
        })
    }

    async fn list(&self) -> Result<Vec<StoredRequest>> {
        let rows: Vec<RequestRow> =
            sqlx::query_as("SELECT * FROM requests ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(RequestRow::into_stored).collect()
    }

    async fn list_by_status(&self, status: &str) -> Result<Vec<StoredRequest>> {
        let rows: Vec<RequestRow> =
            sqlx::query_as("SELECT * FROM requests WHERE status = ?1 ORDER BY created_at, id")
                .bind(status)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(RequestRow::into_stored).collect()
    }

    async fn update_status(&self, id: i64, status: &str) -> Result<Option<StoredRequest>> {
        let now_s = Utc::now().to_rfc3339();

        let result = sqlx::query("UPDATE requests SET status = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(status)
            .bind(&now_s)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let row: Option<RequestRow> = sqlx::query_as("SELECT * FROM requests WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(RequestRow::into_stored).transpose()
    }
}
