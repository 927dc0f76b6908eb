//! Form repository trait definition.

use chrono::{DateTime, Utc};
use formcraft_types::error::RepositoryError;
use formcraft_types::form::{Form, FormId, FormStats};
use formcraft_types::schema::FormSchema;
use uuid::Uuid;

use super::SortOrder;

/// Filter criteria for listing an owner's forms.
#[derive(Debug, Clone, Default)]
pub struct FormFilter {
    /// Only published (`Some(true)`) or unpublished (`Some(false)`) forms.
    pub published: Option<bool>,
    /// Sort direction on `created_at`.
    pub sort_order: Option<SortOrder>,
    /// Maximum number of results.
    pub limit: Option<i64>,
    /// Number of results to skip (offset pagination).
    pub offset: Option<i64>,
}

/// Repository trait for form persistence.
///
/// Implementations live in formcraft-infra (e.g., SqliteFormRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait FormRepository: Send + Sync {
    /// Insert a new form. A single atomic insert.
    fn create(
        &self,
        form: &Form,
    ) -> impl std::future::Future<Output = Result<Form, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &FormId,
    ) -> impl std::future::Future<Output = Result<Option<Form>, RepositoryError>> + Send;

    /// Look a form up by its public share identifier.
    fn get_by_share_id(
        &self,
        share_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Form>, RepositoryError>> + Send;

    /// List forms owned by `owner_id` with optional filtering and pagination.
    fn list_by_owner(
        &self,
        owner_id: &str,
        filter: Option<FormFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Form>, RepositoryError>> + Send;

    /// Replace the schema of an existing form, leaving `published` untouched.
    /// Returns the stored row after the write.
    fn update_content(
        &self,
        id: &FormId,
        content: &FormSchema,
        updated_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Form, RepositoryError>> + Send;

    /// Flip visibility of an existing form, leaving `content` untouched.
    /// Returns the stored row after the write.
    fn set_published(
        &self,
        id: &FormId,
        published: bool,
        updated_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Form, RepositoryError>> + Send;

    /// Aggregate counters for an owner's forms.
    fn stats_for_owner(
        &self,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<FormStats, RepositoryError>> + Send;
}
