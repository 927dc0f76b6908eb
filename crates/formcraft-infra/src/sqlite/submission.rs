//! SQLite submission repository implementation.

use formcraft_core::repository::submission::SubmissionRepository;
use formcraft_types::error::RepositoryError;
use formcraft_types::form::FormId;
use formcraft_types::submission::{Submission, SubmissionId};
use serde_json::{Map, Value};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, pagination_clause, parse_datetime};

/// SQLite-backed implementation of `SubmissionRepository`.
#[derive(Clone)]
pub struct SqliteSubmissionRepository {
    pool: DatabasePool,
}

impl SqliteSubmissionRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn row_to_submission(row: &sqlx::sqlite::SqliteRow) -> Result<Submission, RepositoryError> {
    let id_str: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let form_id_str: String = row
        .try_get("form_id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let content_str: String = row
        .try_get("content")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let created_at_str: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    let id = id_str
        .parse::<SubmissionId>()
        .map_err(|e| RepositoryError::Query(format!("invalid submission id: {e}")))?;
    let form_id = form_id_str
        .parse::<FormId>()
        .map_err(|e| RepositoryError::Query(format!("invalid form id: {e}")))?;
    let content: Map<String, Value> = serde_json::from_str(&content_str)
        .map_err(|e| RepositoryError::Query(format!("invalid submission content: {e}")))?;

    Ok(Submission {
        id,
        form_id,
        content,
        created_at: parse_datetime(&created_at_str)?,
    })
}

impl SubmissionRepository for SqliteSubmissionRepository {
    async fn create(&self, submission: &Submission) -> Result<Submission, RepositoryError> {
        let content = serde_json::to_string(&submission.content)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        // Bump the counter first so a vanished form aborts before the insert.
        let updated = sqlx::query(
            "UPDATE forms SET submission_count = submission_count + 1 WHERE id = ?",
        )
        .bind(submission.form_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query(
            "INSERT INTO submissions (id, form_id, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(submission.id.to_string())
        .bind(submission.form_id.to_string())
        .bind(&content)
        .bind(format_datetime(&submission.created_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.message().contains("UNIQUE") {
                    return RepositoryError::Conflict(format!(
                        "submission '{}' already exists",
                        submission.id
                    ));
                }
            }
            RepositoryError::Query(e.to_string())
        })?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(submission.clone())
    }

    async fn list_by_form(
        &self,
        form_id: &FormId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Submission>, RepositoryError> {
        let sql = format!(
            "SELECT * FROM submissions WHERE form_id = ? ORDER BY created_at DESC, id DESC{}",
            pagination_clause(limit, offset)
        );

        let rows = sqlx::query(&sql)
            .bind(form_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(row_to_submission).collect()
    }
}
