//! Request/query types (Deserialize)

use serde::Deserialize;

/// Query string for the date-keyed lookup routes.
///
/// `date` is optional at the deserialization level so handlers can answer
/// a missing parameter with the documented 400 message instead of a generic
/// rejection.
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

impl DateQuery {
    /// The date, or the route-level 400 error when absent.
    pub fn require_date(&self) -> Result<&str, crate::api_error::ApiError> {
        require_date(self.date.as_deref())
    }
}

/// Query string for the thumbnail-rendering route.
#[derive(Debug, Deserialize)]
pub struct RenderQuery {
    pub date: Option<String>,
    pub max_size: Option<u32>,
}

impl RenderQuery {
    /// The date, or the route-level 400 error when absent.
    pub fn require_date(&self) -> Result<&str, crate::api_error::ApiError> {
        require_date(self.date.as_deref())
    }
}

fn require_date(date: Option<&str>) -> Result<&str, crate::api_error::ApiError> {
    date.map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(crate::api_error::ApiError::missing_date)
}
