//! Submission repository trait definition.

use formcraft_types::error::RepositoryError;
use formcraft_types::form::FormId;
use formcraft_types::submission::Submission;

/// Repository trait for form submissions.
pub trait SubmissionRepository: Send + Sync {
    /// Store a submission and bump the form's `submission_count` in the
    /// same transaction.
    fn create(
        &self,
        submission: &Submission,
    ) -> impl std::future::Future<Output = Result<Submission, RepositoryError>> + Send;

    /// Submissions for a form, newest first.
    fn list_by_form(
        &self,
        form_id: &FormId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> impl std::future::Future<Output = Result<Vec<Submission>, RepositoryError>> + Send;
}
