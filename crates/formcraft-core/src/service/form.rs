//! Form management service.
//!
//! Wraps the generation pipeline and the form repository: generated schemas
//! are persisted for their owner, and every later read or mutation is
//! checked against that owner.

use chrono::Utc;
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use formcraft_types::error::{FormError, RepositoryError};
use formcraft_types::form::{Form, FormId, FormStats};
use formcraft_types::generation::{ErrorKind, GenerationError, PipelineStage};

use crate::generation::client::TextGenerator;
use crate::generation::pipeline::FormGenerator;
use crate::generation::validator::validate_value;
use crate::repository::form::{FormFilter, FormRepository};

/// Service orchestrating form generation and the form lifecycle.
///
/// Generic over repository and generator traits to maintain clean
/// architecture -- formcraft-core never depends on formcraft-infra.
pub struct FormService<F: FormRepository, G: TextGenerator> {
    form_repo: F,
    generator: FormGenerator<G>,
}

impl<F: FormRepository, G: TextGenerator> FormService<F, G> {
    pub fn new(form_repo: F, generator: G) -> Self {
        Self {
            form_repo,
            generator: FormGenerator::new(generator),
        }
    }

    pub fn generator(&self) -> &FormGenerator<G> {
        &self.generator
    }

    /// Generate a form from a description and persist it for `owner_id`.
    ///
    /// Generation failures keep their pipeline kind; a failed insert becomes
    /// `PERSISTENCE_FAILURE` with the validated schema in `raw_text` so the
    /// caller can recover it.
    pub async fn generate_form(
        &self,
        owner_id: &str,
        description: Option<&str>,
    ) -> Result<Form, GenerationError> {
        if owner_id.trim().is_empty() {
            return Err(GenerationError::new(
                ErrorKind::InputInvalid,
                PipelineStage::Idle,
                "owner id is missing",
            ));
        }

        let schema = self.generator.generate(description).await?;
        let form = Form::new(owner_id, schema);

        match self.form_repo.create(&form).await {
            Ok(form) => {
                info!(form_id = %form.id, owner_id = %form.owner_id, "form created");
                Ok(form)
            }
            Err(e) => {
                error!(owner_id = %owner_id, "failed to persist generated form: {e}");
                let content = serde_json::to_string(&form.content).unwrap_or_default();
                Err(GenerationError::new(
                    ErrorKind::PersistenceFailure,
                    PipelineStage::Persisting,
                    format!("failed to save generated form: {e}"),
                )
                .with_raw_text(content))
            }
        }
    }

    /// Fetch a form, enforcing ownership.
    pub async fn get_form(&self, owner_id: &str, id: &FormId) -> Result<Form, FormError> {
        let form = self
            .form_repo
            .get_by_id(id)
            .await
            .map_err(storage_error)?
            .ok_or(FormError::NotFound)?;

        if !form.is_owned_by(owner_id) {
            return Err(FormError::Forbidden);
        }
        Ok(form)
    }

    pub async fn list_forms(
        &self,
        owner_id: &str,
        filter: Option<FormFilter>,
    ) -> Result<Vec<Form>, FormError> {
        self.form_repo
            .list_by_owner(owner_id, filter)
            .await
            .map_err(storage_error)
    }

    /// Make a form reachable through its share link.
    pub async fn publish_form(&self, owner_id: &str, id: &FormId) -> Result<Form, FormError> {
        self.set_published(owner_id, id, true).await
    }

    pub async fn unpublish_form(&self, owner_id: &str, id: &FormId) -> Result<Form, FormError> {
        self.set_published(owner_id, id, false).await
    }

    async fn set_published(
        &self,
        owner_id: &str,
        id: &FormId,
        published: bool,
    ) -> Result<Form, FormError> {
        let form = self.get_form(owner_id, id).await?;
        if form.published == published {
            return Ok(form);
        }

        let form = self
            .form_repo
            .set_published(id, published, Utc::now())
            .await
            .map_err(storage_error)?;
        info!(form_id = %form.id, published, "form visibility changed");
        Ok(form)
    }

    /// Replace a form's schema with an edited document.
    ///
    /// The document goes through the same shape validation as model output.
    pub async fn update_form_content(
        &self,
        owner_id: &str,
        id: &FormId,
        document: Value,
    ) -> Result<Form, FormError> {
        self.get_form(owner_id, id).await?;

        let schema = validate_value(document).map_err(|e| {
            let mut reason = e.message;
            if !e.validation_errors.is_empty() {
                reason = format!("{reason} ({})", e.validation_errors.join("; "));
            }
            FormError::InvalidSchema(reason)
        })?;

        self.form_repo
            .update_content(id, &schema, Utc::now())
            .await
            .map_err(storage_error)
    }

    /// Public read through a share link. Only published forms are visible.
    pub async fn get_shared_form(&self, share_id: &Uuid) -> Result<Form, FormError> {
        let form = self
            .form_repo
            .get_by_share_id(share_id)
            .await
            .map_err(storage_error)?
            .ok_or(FormError::NotFound)?;

        if !form.published {
            return Err(FormError::NotPublished);
        }
        Ok(form)
    }

    pub async fn stats(&self, owner_id: &str) -> Result<FormStats, FormError> {
        self.form_repo
            .stats_for_owner(owner_id)
            .await
            .map_err(storage_error)
    }
}

fn storage_error(e: RepositoryError) -> FormError {
    FormError::StorageError(e.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::service::test_support::{MemoryFormRepository, StubGenerator};

    const STANDARD_OUTPUT: &str =
        r#"{"title":"Contact","fields":[{"label":"Email","type":"email","required":true}],"button":{"label":"Send"}}"#;

    fn service(output: &str) -> FormService<MemoryFormRepository, StubGenerator> {
        FormService::new(MemoryFormRepository::default(), StubGenerator::new(output))
    }

    #[tokio::test]
    async fn test_generate_form_persists_for_owner() {
        let service = service(STANDARD_OUTPUT);
        let form = service
            .generate_form("user_1", Some("contact form"))
            .await
            .unwrap();
        assert_eq!(form.owner_id, "user_1");
        assert!(!form.published);
        assert_eq!(form.content.title(), "Contact");

        let listed = service.list_forms("user_1", None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(service.list_forms("user_2", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_form_rejects_blank_owner() {
        let service = service(STANDARD_OUTPUT);
        let err = service.generate_form(" ", Some("x")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InputInvalid);
        assert_eq!(service.generator().generator().calls(), 0);
    }

    #[tokio::test]
    async fn test_generation_failure_is_not_persisted() {
        let service = service("no json here");
        let err = service.generate_form("user_1", Some("x")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NoJsonFound);
        assert!(service.list_forms("user_1", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_is_distinguished() {
        let repo = MemoryFormRepository::default();
        repo.fail_writes();
        let service = FormService::new(repo, StubGenerator::new(STANDARD_OUTPUT));
        let err = service.generate_form("user_1", Some("x")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::PersistenceFailure);
        assert_eq!(err.stage, PipelineStage::Persisting);
        assert!(err.raw_text.unwrap().contains("\"Contact\""));
    }

    #[tokio::test]
    async fn test_get_form_enforces_owner() {
        let service = service(STANDARD_OUTPUT);
        let form = service.generate_form("user_1", Some("x")).await.unwrap();

        assert!(service.get_form("user_1", &form.id).await.is_ok());
        assert!(matches!(
            service.get_form("user_2", &form.id).await,
            Err(FormError::Forbidden)
        ));
        assert!(matches!(
            service.get_form("user_1", &FormId::new()).await,
            Err(FormError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_publish_controls_share_visibility() {
        let service = service(STANDARD_OUTPUT);
        let form = service.generate_form("user_1", Some("x")).await.unwrap();

        assert!(matches!(
            service.get_shared_form(&form.share_id).await,
            Err(FormError::NotPublished)
        ));

        let published = service.publish_form("user_1", &form.id).await.unwrap();
        assert!(published.published);
        let shared = service.get_shared_form(&form.share_id).await.unwrap();
        assert_eq!(shared.id, form.id);

        service.unpublish_form("user_1", &form.id).await.unwrap();
        assert!(service.get_shared_form(&form.share_id).await.is_err());

        assert!(matches!(
            service.publish_form("user_2", &form.id).await,
            Err(FormError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn test_update_form_content_validates() {
        let service = service(STANDARD_OUTPUT);
        let form = service.generate_form("user_1", Some("x")).await.unwrap();

        let updated = service
            .update_form_content(
                "user_1",
                &form.id,
                json!({ "formTitle": "Edited", "formFields": [{ "label": "Name" }] }),
            )
            .await
            .unwrap();
        assert_eq!(updated.content.title(), "Edited");

        let err = service
            .update_form_content("user_1", &form.id, json!({ "title": "No fields" }))
            .await
            .unwrap_err();
        match err {
            FormError::InvalidSchema(reason) => assert!(reason.contains("fields")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_edit_and_publish_touch_separate_columns() {
        let service = service(STANDARD_OUTPUT);
        let form = service.generate_form("user_1", Some("x")).await.unwrap();

        service
            .update_form_content(
                "user_1",
                &form.id,
                json!({ "formTitle": "Edited", "formFields": [{ "label": "Name" }] }),
            )
            .await
            .unwrap();
        let published = service.publish_form("user_1", &form.id).await.unwrap();
        assert!(published.published);
        assert_eq!(published.content.title(), "Edited");

        let edited = service
            .update_form_content(
                "user_1",
                &form.id,
                json!({ "formTitle": "Again", "formFields": [{ "label": "Name" }] }),
            )
            .await
            .unwrap();
        assert!(edited.published);
        assert_eq!(edited.content.title(), "Again");
    }

    #[tokio::test]
    async fn test_stats_counts_published() {
        let service = service(STANDARD_OUTPUT);
        let a = service.generate_form("user_1", Some("a")).await.unwrap();
        service.generate_form("user_1", Some("b")).await.unwrap();
        service.publish_form("user_1", &a.id).await.unwrap();

        let stats = service.stats("user_1").await.unwrap();
        assert_eq!(stats.total_forms, 2);
        assert_eq!(stats.published_forms, 1);
        assert_eq!(stats.total_submissions, 0);
    }
}
