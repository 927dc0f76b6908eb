use thiserror::Error;

/// Errors related to form operations.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("form not found")]
    NotFound,

    #[error("form belongs to another owner")]
    Forbidden,

    #[error("form is not published")]
    NotPublished,

    #[error("invalid form schema: {0}")]
    InvalidSchema(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to form submissions.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("form not found")]
    FormNotFound,

    #[error("form is not accepting submissions")]
    FormNotPublished,

    #[error("invalid submission: {0}")]
    InvalidAnswers(String),

    #[error("missing required fields: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in formcraft-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}
