//! Form schema shapes accepted from the language model.
//!
//! Two shapes are recognised:
//!
//! - **Standard**: `{ "title", "fields": [...], "button": { "label" } }`
//! - **Compact**: `{ "formTitle", "formFields": [...] }`
//!
//! Unknown keys are ignored on deserialization and dropped on re-serialization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Field type used when the model omits `type`.
pub const DEFAULT_FIELD_TYPE: &str = "text";

/// Submit button label used for shapes that carry no button.
pub const DEFAULT_SUBMIT_LABEL: &str = "Submit";

fn default_field_type() -> String {
    DEFAULT_FIELD_TYPE.to_string()
}

/// One input element of a form.
///
/// `field_type` is an opaque string interpreted by the rendering layer
/// ("text", "email", "select", "checkbox", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub label: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    /// Machine name used as the submission key. Falls back to `label`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Choices for select/radio/checkbox fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FieldSpec {
    /// Key under which a submission stores this field's answer.
    pub fn key(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.label)
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// Submit button definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonSpec {
    pub label: String,
}

/// Shape A: titled form with an explicit submit button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardForm {
    pub title: String,
    pub fields: Vec<FieldSpec>,
    pub button: ButtonSpec,
    /// URL-safe identifier the prompt asks the model for. Optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_name: Option<String>,
}

/// Shape B: `formTitle` / `formFields` without a button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactForm {
    pub form_title: String,
    pub form_fields: Vec<FieldSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_name: Option<String>,
}

/// A validated form schema in one of the two accepted shapes.
///
/// Deserialization tries `Standard` first, then `Compact`, matching the
/// validator's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormSchema {
    Standard(StandardForm),
    Compact(CompactForm),
}

/// Which shape a schema was accepted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaShape {
    Standard,
    Compact,
}

impl fmt::Display for SchemaShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaShape::Standard => write!(f, "standard"),
            SchemaShape::Compact => write!(f, "compact"),
        }
    }
}

impl FormSchema {
    pub fn shape(&self) -> SchemaShape {
        match self {
            FormSchema::Standard(_) => SchemaShape::Standard,
            FormSchema::Compact(_) => SchemaShape::Compact,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            FormSchema::Standard(form) => &form.title,
            FormSchema::Compact(form) => &form.form_title,
        }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        match self {
            FormSchema::Standard(form) => &form.fields,
            FormSchema::Compact(form) => &form.form_fields,
        }
    }

    /// Label for the submit button (`"Submit"` for compact schemas).
    pub fn submit_label(&self) -> &str {
        match self {
            FormSchema::Standard(form) => &form.button.label,
            FormSchema::Compact(_) => DEFAULT_SUBMIT_LABEL,
        }
    }

    /// Fields that must be answered in a submission.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields().iter().filter(|f| f.is_required())
    }
}
