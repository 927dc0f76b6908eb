//! The form generation pipeline.
//!
//! `FormGenerator` drives one description through
//! `Idle -> Prompting -> AwaitingModel -> Extracting -> Validating`.
//! Each run is independent and single-shot: the first failing stage ends the
//! run, and the model is never called again for the same request.

use tracing::{Instrument, debug, info, info_span, warn};

use formcraft_types::generation::{ErrorKind, GenerationError, PipelineResult, PipelineStage};

use super::client::TextGenerator;
use super::extractor::extract_json;
use super::prompt::build_form_prompt;
use super::validator::validate_schema;

/// Runs the generation pipeline against a [`TextGenerator`].
///
/// Holds no per-request state; concurrent calls share nothing but the
/// generator itself.
pub struct FormGenerator<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> FormGenerator<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Turn a natural-language description into a validated [`FormSchema`].
    ///
    /// A missing or blank description fails with `INPUT_INVALID` before the
    /// model is contacted.
    ///
    /// [`FormSchema`]: formcraft_types::schema::FormSchema
    #[tracing::instrument(name = "form.generate", skip_all)]
    pub async fn generate(&self, description: Option<&str>) -> PipelineResult {
        let description = validate_description(description).inspect_err(log_failure)?;

        debug!(stage = %PipelineStage::Prompting, "building prompt");
        let prompt = build_form_prompt(description);

        debug!(stage = %PipelineStage::AwaitingModel, "calling model");
        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.generator.name(),
            gen_ai.request.model = %self.generator.model(),
            gen_ai.request.stream = false,
        );
        let raw = self
            .generator
            .generate(&prompt)
            .instrument(span)
            .await
            .map_err(GenerationError::from)
            .inspect_err(log_failure)?;
        debug!(raw = %raw, "model output received");

        debug!(stage = %PipelineStage::Extracting, "extracting JSON");
        let document = extract_json(&raw).inspect_err(log_failure)?;

        debug!(stage = %PipelineStage::Validating, "validating schema");
        let schema = validate_schema(&document).inspect_err(log_failure)?;

        info!(
            stage = %PipelineStage::Succeeded,
            shape = %schema.shape(),
            fields = schema.fields().len(),
            "form schema generated"
        );
        Ok(schema)
    }
}

/// Check that a description is present and non-blank; returns it trimmed.
pub fn validate_description(description: Option<&str>) -> Result<&str, GenerationError> {
    let Some(description) = description else {
        return Err(GenerationError::new(
            ErrorKind::InputInvalid,
            PipelineStage::Idle,
            "description is missing",
        ));
    };

    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(GenerationError::new(
            ErrorKind::InputInvalid,
            PipelineStage::Idle,
            "description must not be empty",
        ));
    }
    Ok(trimmed)
}

fn log_failure(err: &GenerationError) {
    warn!(
        stage = %PipelineStage::Failed,
        failed_at = %err.stage,
        kind = %err.kind,
        "form generation failed: {}",
        err.message
    );
    if let Some(raw) = &err.raw_text {
        debug!(raw = %raw, "rejected model output");
    }
}
