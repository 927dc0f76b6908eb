//! Submission intake and listing.

use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use formcraft_types::error::{FormError, SubmissionError};
use formcraft_types::form::FormId;
use formcraft_types::schema::FormSchema;
use formcraft_types::submission::Submission;

use crate::repository::form::FormRepository;
use crate::repository::submission::SubmissionRepository;

/// Service accepting answers for published forms.
pub struct SubmissionService<F: FormRepository, S: SubmissionRepository> {
    form_repo: F,
    submission_repo: S,
}

impl<F: FormRepository, S: SubmissionRepository> SubmissionService<F, S> {
    pub fn new(form_repo: F, submission_repo: S) -> Self {
        Self {
            form_repo,
            submission_repo,
        }
    }

    /// Record answers for the form behind `share_id`.
    ///
    /// The form must be published, `answers` must be a JSON object, and every
    /// required field must have a non-empty answer.
    pub async fn submit(
        &self,
        share_id: &Uuid,
        answers: Value,
    ) -> Result<Submission, SubmissionError> {
        let form = self
            .form_repo
            .get_by_share_id(share_id)
            .await
            .map_err(|e| SubmissionError::StorageError(e.to_string()))?
            .ok_or(SubmissionError::FormNotFound)?;

        if !form.published {
            return Err(SubmissionError::FormNotPublished);
        }

        let Value::Object(answers) = answers else {
            return Err(SubmissionError::InvalidAnswers(
                "answers must be a JSON object".to_string(),
            ));
        };

        let missing = missing_required(&form.content, &answers);
        if !missing.is_empty() {
            return Err(SubmissionError::MissingRequired(missing));
        }

        let submission = Submission::new(form.id.clone(), answers);
        let submission = self
            .submission_repo
            .create(&submission)
            .await
            .map_err(|e| SubmissionError::StorageError(e.to_string()))?;

        info!(form_id = %form.id, submission_id = %submission.id, "submission recorded");
        Ok(submission)
    }

    /// Submissions for a form owned by `owner_id`, newest first.
    pub async fn list_submissions(
        &self,
        owner_id: &str,
        form_id: &FormId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Submission>, FormError> {
        let form = self
            .form_repo
            .get_by_id(form_id)
            .await
            .map_err(|e| FormError::StorageError(e.to_string()))?
            .ok_or(FormError::NotFound)?;

        if !form.is_owned_by(owner_id) {
            return Err(FormError::Forbidden);
        }

        self.submission_repo
            .list_by_form(form_id, limit, offset)
            .await
            .map_err(|e| FormError::StorageError(e.to_string()))
    }
}

/// Labels of required fields without a usable answer.
///
/// Answers are looked up by [`FieldSpec::key`]. `null`, blank strings and
/// empty arrays count as missing.
///
/// [`FieldSpec::key`]: formcraft_types::schema::FieldSpec::key
pub fn missing_required(schema: &FormSchema, answers: &Map<String, Value>) -> Vec<String> {
    schema
        .required_fields()
        .filter(|field| match answers.get(field.key()) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(Value::Array(items)) => items.is_empty(),
            Some(_) => false,
        })
        .map(|field| field.label.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::service::test_support::{MemoryFormRepository, MemorySubmissionRepository};
    use formcraft_types::form::Form;

    fn schema() -> FormSchema {
        serde_json::from_value(json!({
            "title": "Signup",
            "fields": [
                { "label": "Email", "type": "email", "required": true },
                { "label": "Full name", "name": "full_name", "required": true },
                { "label": "Nickname" }
            ],
            "button": { "label": "Join" }
        }))
        .unwrap()
    }

    async fn setup(
        published: bool,
    ) -> (
        SubmissionService<MemoryFormRepository, MemorySubmissionRepository>,
        Form,
    ) {
        let forms = MemoryFormRepository::default();
        let mut form = Form::new("owner", schema());
        form.published = published;
        forms.create(&form).await.unwrap();

        let submissions = MemorySubmissionRepository::new(forms.clone());
        (SubmissionService::new(forms, submissions), form)
    }

    #[tokio::test]
    async fn test_submit_and_list() {
        let (service, form) = setup(true).await;
        let submission = service
            .submit(
                &form.share_id,
                json!({ "Email": "a@b.c", "full_name": "Ada Lovelace" }),
            )
            .await
            .unwrap();
        assert_eq!(submission.form_id, form.id);

        let listed = service
            .list_submissions("owner", &form.id, None, None)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].content["full_name"], "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_submit_rejects_unpublished_and_unknown() {
        let (service, form) = setup(false).await;
        assert!(matches!(
            service.submit(&form.share_id, json!({})).await,
            Err(SubmissionError::FormNotPublished)
        ));
        assert!(matches!(
            service.submit(&Uuid::new_v4(), json!({})).await,
            Err(SubmissionError::FormNotFound)
        ));
    }

    #[tokio::test]
    async fn test_submit_requires_object() {
        let (service, form) = setup(true).await;
        assert!(matches!(
            service.submit(&form.share_id, json!(["a"])).await,
            Err(SubmissionError::InvalidAnswers(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_reports_missing_required_labels() {
        let (service, form) = setup(true).await;
        let err = service
            .submit(&form.share_id, json!({ "Email": "  ", "Nickname": "ada" }))
            .await
            .unwrap_err();
        match err {
            SubmissionError::MissingRequired(labels) => {
                assert_eq!(labels, vec!["Email".to_string(), "Full name".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_list_submissions_enforces_owner() {
        let (service, form) = setup(true).await;
        assert!(matches!(
            service.list_submissions("intruder", &form.id, None, None).await,
            Err(FormError::Forbidden)
        ));
    }

    #[test]
    fn test_missing_required_treats_empty_values_as_missing() {
        let schema = schema();
        let answers = json!({ "Email": null, "full_name": [] });
        let missing = missing_required(&schema, answers.as_object().unwrap());
        assert_eq!(missing.len(), 2);

        let answers = json!({ "Email": "x@y.z", "full_name": "Z" });
        assert!(missing_required(&schema, answers.as_object().unwrap()).is_empty());
    }
}
