//! Query parameter extractors for list endpoints.

use serde::Deserialize;

use formcraft_core::repository::SortOrder;
use formcraft_core::repository::form::FormFilter;

use crate::http::error::AppError;

/// Largest page size accepted by list endpoints.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for the form list endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct FormListQuery {
    /// Only published (`true`) or only draft (`false`) forms.
    pub published: Option<bool>,
    /// Sort order by creation time (asc, desc).
    #[serde(default = "default_order")]
    pub order: String,
    /// Maximum results.
    pub limit: Option<i64>,
    /// Offset for pagination.
    pub offset: Option<i64>,
}

fn default_order() -> String {
    "desc".to_string()
}

impl FormListQuery {
    pub fn into_filter(self) -> Result<FormFilter, AppError> {
        let (limit, offset) = validate_page(self.limit, self.offset)?;
        let sort_order = match self.order.to_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            other => {
                return Err(AppError::Validation(format!(
                    "invalid order '{other}', expected 'asc' or 'desc'"
                )));
            }
        };

        Ok(FormFilter {
            published: self.published,
            sort_order: Some(sort_order),
            limit,
            offset,
        })
    }
}

/// Query parameters for the submission list endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageQuery {
    pub fn validate(self) -> Result<(Option<i64>, Option<i64>), AppError> {
        validate_page(self.limit, self.offset)
    }
}

fn validate_page(
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<(Option<i64>, Option<i64>), AppError> {
    if let Some(limit) = limit {
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
    }
    if offset.is_some_and(|o| o < 0) {
        return Err(AppError::Validation("offset must not be negative".to_string()));
    }
    Ok((limit, offset))
}
