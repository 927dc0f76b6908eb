//! Shape validation for extracted documents.
//!
//! Shapes are tried in a fixed order, standard (`title`/`fields`/`button`)
//! first, then compact (`formTitle`/`formFields`). A document must match one
//! shape in full; partial matches are rejected with the reasons for both.

use serde_json::Value;

use formcraft_types::generation::{ErrorKind, GenerationError, PipelineStage};
use formcraft_types::schema::{CompactForm, FormSchema, StandardForm};

use super::extractor::JsonObject;

/// Validate `document` against the accepted form shapes.
///
/// On failure the error is `SCHEMA_MISMATCH`, `validation_errors` lists why
/// each shape was rejected, and `raw_text` holds the rejected document.
pub fn validate_schema(document: &JsonObject) -> Result<FormSchema, GenerationError> {
    let value = Value::Object(document.clone());

    let standard_err = match serde_json::from_value::<StandardForm>(value.clone()) {
        Ok(form) => return Ok(FormSchema::Standard(form)),
        Err(e) => e,
    };

    let compact_err = match serde_json::from_value::<CompactForm>(value) {
        Ok(form) => return Ok(FormSchema::Compact(form)),
        Err(e) => e,
    };

    let raw = serde_json::to_string(document).unwrap_or_default();
    Err(GenerationError::new(
        ErrorKind::SchemaMismatch,
        PipelineStage::Validating,
        "model output does not match any accepted form shape",
    )
    .with_raw_text(raw)
    .with_validation_errors(vec![
        format!("standard shape (title/fields/button): {standard_err}"),
        format!("compact shape (formTitle/formFields): {compact_err}"),
    ]))
}

/// Validate an arbitrary JSON value, rejecting non-objects up front.
pub fn validate_value(value: Value) -> Result<FormSchema, GenerationError> {
    match value {
        Value::Object(map) => validate_schema(&map),
        other => Err(GenerationError::new(
            ErrorKind::SchemaMismatch,
            PipelineStage::Validating,
            "form schema must be a JSON object",
        )
        .with_raw_text(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcraft_types::schema::SchemaShape;
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    #[test]
    fn test_standard_shape_accepted() {
        let doc = object(json!({
            "title": "Leave application",
            "fields": [
                { "label": "Start date", "type": "date", "required": true },
                { "label": "Reason", "type": "textarea", "placeholder": "Why?" }
            ],
            "button": { "label": "Apply" },
            "form_name": "leave_application"
        }));
        let schema = validate_schema(&doc).unwrap();
        assert_eq!(schema.shape(), SchemaShape::Standard);
        assert_eq!(schema.fields().len(), 2);
        assert_eq!(schema.submit_label(), "Apply");
    }

    #[test]
    fn test_compact_shape_accepted() {
        let doc = object(json!({ "formTitle": "T", "formFields": [{ "label": "Name" }] }));
        let schema = validate_schema(&doc).unwrap();
        assert_eq!(schema.shape(), SchemaShape::Compact);
        assert_eq!(schema.title(), "T");
    }

    #[test]
    fn test_standard_preferred_when_both_match() {
        let doc = object(json!({
            "title": "A",
            "fields": [],
            "button": { "label": "Go" },
            "formTitle": "B",
            "formFields": []
        }));
        assert_eq!(validate_schema(&doc).unwrap().title(), "A");
    }

    #[test]
    fn test_unrecognized_keys_is_schema_mismatch() {
        let doc = object(json!({ "foo": "bar" }));
        let err = validate_schema(&doc).unwrap_err();
        assert_eq!(err.kind, ErrorKind::SchemaMismatch);
        assert_eq!(err.stage, PipelineStage::Validating);
        assert_eq!(err.validation_errors.len(), 2);
        assert_eq!(err.raw_text.as_deref(), Some(r#"{"foo":"bar"}"#));
    }

    #[test]
    fn test_partial_standard_match_rejected() {
        let doc = object(json!({ "title": "T", "fields": [{ "label": "A" }] }));
        let err = validate_schema(&doc).unwrap_err();
        assert_eq!(err.kind, ErrorKind::SchemaMismatch);
        assert!(err.validation_errors[0].contains("button"));
    }

    #[test]
    fn test_non_array_fields_rejected() {
        let doc = object(json!({ "formTitle": "T", "formFields": "Name, Email" }));
        assert_eq!(
            validate_schema(&doc).unwrap_err().kind,
            ErrorKind::SchemaMismatch
        );
    }

    #[test]
    fn test_field_without_label_rejected() {
        let doc = object(json!({ "formTitle": "T", "formFields": [{ "type": "text" }] }));
        assert!(validate_schema(&doc).is_err());
    }

    #[test]
    fn test_wrong_primitive_type_rejected() {
        let doc = object(json!({
            "title": 5,
            "fields": [],
            "button": { "label": "Go" }
        }));
        assert!(validate_schema(&doc).is_err());
    }

    #[test]
    fn test_validate_value_rejects_non_object() {
        let err = validate_value(json!([1, 2])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::SchemaMismatch);
        assert_eq!(err.raw_text.as_deref(), Some("[1,2]"));
    }
}
