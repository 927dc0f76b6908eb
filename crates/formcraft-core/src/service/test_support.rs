//! In-memory doubles for service tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use formcraft_types::error::RepositoryError;
use formcraft_types::form::{Form, FormId, FormStats};
use formcraft_types::generation::ModelError;
use formcraft_types::schema::FormSchema;
use formcraft_types::submission::Submission;

use crate::generation::client::TextGenerator;
use crate::repository::SortOrder;
use crate::repository::form::{FormFilter, FormRepository};
use crate::repository::submission::SubmissionRepository;

/// Generator returning the same text for every prompt.
pub struct StubGenerator {
    output: String,
    calls: AtomicUsize,
}

impl StubGenerator {
    pub fn new(output: &str) -> Self {
        Self {
            output: output.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextGenerator for StubGenerator {
    fn name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.output.clone())
    }
}

#[derive(Clone, Default)]
pub struct MemoryFormRepository {
    forms: Arc<Mutex<Vec<Form>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryFormRepository {
    /// Make every subsequent write fail with a query error.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Query("database is locked".to_string()));
        }
        Ok(())
    }

    fn increment_submissions(&self, id: &FormId) -> Result<(), RepositoryError> {
        let mut forms = self.forms.lock().unwrap();
        let form = forms
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or(RepositoryError::NotFound)?;
        form.submission_count += 1;
        Ok(())
    }
}

impl FormRepository for MemoryFormRepository {
    async fn create(&self, form: &Form) -> Result<Form, RepositoryError> {
        self.check_writable()?;
        self.forms.lock().unwrap().push(form.clone());
        Ok(form.clone())
    }

    async fn get_by_id(&self, id: &FormId) -> Result<Option<Form>, RepositoryError> {
        Ok(self.forms.lock().unwrap().iter().find(|f| &f.id == id).cloned())
    }

    async fn get_by_share_id(&self, share_id: &Uuid) -> Result<Option<Form>, RepositoryError> {
        Ok(self
            .forms
            .lock()
            .unwrap()
            .iter()
            .find(|f| &f.share_id == share_id)
            .cloned())
    }

    async fn list_by_owner(
        &self,
        owner_id: &str,
        filter: Option<FormFilter>,
    ) -> Result<Vec<Form>, RepositoryError> {
        let filter = filter.unwrap_or_default();
        let mut forms: Vec<Form> = self
            .forms
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.owner_id == owner_id)
            .filter(|f| filter.published.is_none_or(|p| f.published == p))
            .cloned()
            .collect();
        if filter.sort_order.unwrap_or_default() == SortOrder::Desc {
            forms.reverse();
        }
        Ok(forms)
    }

    async fn update_content(
        &self,
        id: &FormId,
        content: &FormSchema,
        updated_at: DateTime<Utc>,
    ) -> Result<Form, RepositoryError> {
        self.check_writable()?;
        let mut forms = self.forms.lock().unwrap();
        let existing = forms
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or(RepositoryError::NotFound)?;
        existing.content = content.clone();
        existing.updated_at = updated_at;
        Ok(existing.clone())
    }

    async fn set_published(
        &self,
        id: &FormId,
        published: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<Form, RepositoryError> {
        self.check_writable()?;
        let mut forms = self.forms.lock().unwrap();
        let existing = forms
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or(RepositoryError::NotFound)?;
        existing.published = published;
        existing.updated_at = updated_at;
        Ok(existing.clone())
    }

    async fn stats_for_owner(&self, owner_id: &str) -> Result<FormStats, RepositoryError> {
        let forms = self.forms.lock().unwrap();
        let owned = forms.iter().filter(|f| f.owner_id == owner_id);
        let mut stats = FormStats::default();
        for form in owned {
            stats.total_forms += 1;
            if form.published {
                stats.published_forms += 1;
            }
            stats.total_submissions += form.submission_count;
        }
        Ok(stats)
    }
}

pub struct MemorySubmissionRepository {
    forms: MemoryFormRepository,
    submissions: Mutex<Vec<Submission>>,
}

impl MemorySubmissionRepository {
    pub fn new(forms: MemoryFormRepository) -> Self {
        Self {
            forms,
            submissions: Mutex::new(Vec::new()),
        }
    }
}

impl SubmissionRepository for MemorySubmissionRepository {
    async fn create(&self, submission: &Submission) -> Result<Submission, RepositoryError> {
        self.forms.increment_submissions(&submission.form_id)?;
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(submission.clone())
    }

    async fn list_by_form(
        &self,
        form_id: &FormId,
        _limit: Option<i64>,
        _offset: Option<i64>,
    ) -> Result<Vec<Submission>, RepositoryError> {
        Ok(self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|s| &s.form_id == form_id)
            .cloned()
            .collect())
    }
}
