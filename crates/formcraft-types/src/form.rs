use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::schema::FormSchema;

/// Unique identifier for a form, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormId(pub Uuid);

impl FormId {
    /// Create a new FormId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for FormId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FormId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A generated form owned by a user.
///
/// `content` is the validated schema; it is stored as JSON text and
/// re-validated on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
    pub id: FormId,
    /// Identifier issued by the external auth provider.
    pub owner_id: String,
    /// Published forms are reachable through their share link and accept submissions.
    pub published: bool,
    pub content: FormSchema,
    pub submission_count: i64,
    /// Opaque public identifier used in share links.
    pub share_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Form {
    /// Build a new, unpublished form for `owner_id`.
    pub fn new(owner_id: impl Into<String>, content: FormSchema) -> Self {
        let now = Utc::now();
        Self {
            id: FormId::new(),
            owner_id: owner_id.into(),
            published: false,
            content,
            submission_count: 0,
            share_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }

    /// Relative share path for this form.
    pub fn share_path(&self) -> String {
        format!("/api/v1/share/{}", self.share_id)
    }
}

/// Aggregate counters for an owner's dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormStats {
    pub total_forms: i64,
    pub published_forms: i64,
    pub total_submissions: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CompactForm;

    fn schema() -> FormSchema {
        FormSchema::Compact(CompactForm {
            form_title: "Feedback".to_string(),
            form_fields: vec![],
            form_name: None,
        })
    }

    #[test]
    fn test_new_form_defaults() {
        let form = Form::new("user_1", schema());
        assert!(!form.published);
        assert_eq!(form.submission_count, 0);
        assert!(form.is_owned_by("user_1"));
        assert!(!form.is_owned_by("user_2"));
        assert_eq!(form.created_at, form.updated_at);
    }

    #[test]
    fn test_form_id_roundtrip_string() {
        let id = FormId::new();
        let parsed: FormId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<FormId>().is_err());
    }

    #[test]
    fn test_share_path_uses_share_id() {
        let form = Form::new("user_1", schema());
        assert_eq!(form.share_path(), format!("/api/v1/share/{}", form.share_id));
    }
}
