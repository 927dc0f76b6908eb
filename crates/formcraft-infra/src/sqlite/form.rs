//! SQLite form repository implementation.
//!
//! Implements `FormRepository` from `formcraft-core`. The schema is stored as
//! JSON text and deserialized back through the shape-checked `FormSchema`.

use chrono::{DateTime, Utc};
use formcraft_core::repository::SortOrder;
use formcraft_core::repository::form::{FormFilter, FormRepository};
use formcraft_types::error::RepositoryError;
use formcraft_types::form::{Form, FormId, FormStats};
use formcraft_types::schema::FormSchema;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, pagination_clause, parse_datetime};

/// SQLite-backed implementation of `FormRepository`.
#[derive(Clone)]
pub struct SqliteFormRepository {
    pool: DatabasePool,
}

impl SqliteFormRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Form.
struct FormRow {
    id: String,
    owner_id: String,
    published: bool,
    content: String,
    submission_count: i64,
    share_id: String,
    created_at: String,
    updated_at: String,
}

impl FormRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            published: row.try_get("published")?,
            content: row.try_get("content")?,
            submission_count: row.try_get("submission_count")?,
            share_id: row.try_get("share_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_form(self) -> Result<Form, RepositoryError> {
        let id = self
            .id
            .parse::<FormId>()
            .map_err(|e| RepositoryError::Query(format!("invalid form id: {e}")))?;

        let share_id = Uuid::parse_str(&self.share_id)
            .map_err(|e| RepositoryError::Query(format!("invalid share id: {e}")))?;

        let content: FormSchema = serde_json::from_str(&self.content)
            .map_err(|e| RepositoryError::Query(format!("invalid form content: {e}")))?;

        Ok(Form {
            id,
            owner_id: self.owner_id,
            published: self.published,
            content,
            submission_count: self.submission_count,
            share_id,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn map_row(row: &sqlx::sqlite::SqliteRow) -> Result<Form, RepositoryError> {
    FormRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_form()
}

fn serialize_content(content: &FormSchema) -> Result<String, RepositoryError> {
    serde_json::to_string(content).map_err(|e| RepositoryError::Query(e.to_string()))
}

impl FormRepository for SqliteFormRepository {
    async fn create(&self, form: &Form) -> Result<Form, RepositoryError> {
        let content = serialize_content(&form.content)?;

        let result = sqlx::query(
            "INSERT INTO forms (id, owner_id, published, content, submission_count, share_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(form.id.to_string())
        .bind(&form.owner_id)
        .bind(form.published)
        .bind(&content)
        .bind(form.submission_count)
        .bind(form.share_id.to_string())
        .bind(format_datetime(&form.created_at))
        .bind(format_datetime(&form.updated_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(form.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict(format!("form '{}' already exists", form.id)),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: &FormId) -> Result<Option<Form>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM forms WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(map_row).transpose()
    }

    async fn get_by_share_id(&self, share_id: &Uuid) -> Result<Option<Form>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM forms WHERE share_id = ?")
            .bind(share_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(map_row).transpose()
    }

    async fn list_by_owner(
        &self,
        owner_id: &str,
        filter: Option<FormFilter>,
    ) -> Result<Vec<Form>, RepositoryError> {
        let filter = filter.unwrap_or_default();

        let mut sql = String::from("SELECT * FROM forms WHERE owner_id = ?");
        if let Some(published) = filter.published {
            sql.push_str(if published {
                " AND published = 1"
            } else {
                " AND published = 0"
            });
        }

        let order = match filter.sort_order.unwrap_or_default() {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        sql.push_str(&format!(" ORDER BY created_at {order}, id {order}"));
        sql.push_str(&pagination_clause(filter.limit, filter.offset));

        let rows = sqlx::query(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(map_row).collect()
    }

    async fn update_content(
        &self,
        id: &FormId,
        content: &FormSchema,
        updated_at: DateTime<Utc>,
    ) -> Result<Form, RepositoryError> {
        let content = serialize_content(content)?;

        let row =
            sqlx::query("UPDATE forms SET content = ?, updated_at = ? WHERE id = ? RETURNING *")
                .bind(&content)
                .bind(format_datetime(&updated_at))
                .bind(id.to_string())
                .fetch_optional(&self.pool.writer)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref()
            .map(map_row)
            .transpose()?
            .ok_or(RepositoryError::NotFound)
    }

    async fn set_published(
        &self,
        id: &FormId,
        published: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<Form, RepositoryError> {
        let row =
            sqlx::query("UPDATE forms SET published = ?, updated_at = ? WHERE id = ? RETURNING *")
                .bind(published)
                .bind(format_datetime(&updated_at))
                .bind(id.to_string())
                .fetch_optional(&self.pool.writer)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref()
            .map(map_row)
            .transpose()?
            .ok_or(RepositoryError::NotFound)
    }

    async fn stats_for_owner(&self, owner_id: &str) -> Result<FormStats, RepositoryError> {
        let (total_forms, published_forms, total_submissions): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(published), 0), COALESCE(SUM(submission_count), 0)
             FROM forms WHERE owner_id = ?",
        )
        .bind(owner_id)
        .fetch_one(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(FormStats {
            total_forms,
            published_forms,
            total_submissions,
        })
    }
}
