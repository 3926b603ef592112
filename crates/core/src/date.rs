//! Date handling for the gateway.
//!
//! Two textual forms are in play: the HTTP API and composite document IDs
//! use dash form (`2024-05-17`), while the document store and the label
//! feature collection hold storage form (`2024_05_17`). Every store-side
//! comparison goes through [`to_storage_form`] so both routes that query by
//! date behave identically.

use chrono::NaiveDate;

use crate::error::{CoreError, Result};

/// Converts a dash-form date to the underscore form used in stored records.
///
/// Already-underscored input passes through unchanged, so callers may apply
/// this unconditionally.
#[must_use]
pub fn to_storage_form(date: &str) -> String {
    date.replace('-', "_")
}

/// Converts a storage-form date back to dash form.
#[must_use]
pub fn to_dash_form(date: &str) -> String {
    date.replace('_', "-")
}

/// Builds the composite plant-record document ID for a `{globalId, date}` pair.
///
/// The date half is always dash form regardless of how the caller sent it.
#[must_use]
pub fn composite_plant_id(global_id: &str, date: &str) -> String {
    format!("{}_{}", global_id, to_dash_form(date))
}

/// Parses a dash-form date and returns its timestamp as epoch milliseconds
/// at UTC midnight, the granularity the image archive keys on.
///
/// # Errors
/// Returns [`CoreError::InvalidDate`] if the string is not a `YYYY-MM-DD` date.
pub fn date_to_epoch_millis(date: &str) -> Result<i64> {
    let parsed =
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| CoreError::InvalidDate {
            value: date.to_owned(),
            reason: e.to_string(),
        })?;
    let midnight = parsed.and_hms_opt(0, 0, 0).ok_or_else(|| CoreError::InvalidDate {
        value: date.to_owned(),
        reason: "midnight out of range".to_owned(),
    })?;
    Ok(midnight.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_form_replaces_dashes() {
        assert_eq!(to_storage_form("2024-05-17"), "2024_05_17");
    }

    #[test]
    fn storage_form_is_idempotent() {
        assert_eq!(to_storage_form("2024_05_17"), "2024_05_17");
    }

    #[test]
    fn dash_form_replaces_underscores() {
        assert_eq!(to_dash_form("2024_05_17"), "2024-05-17");
    }

    #[test]
    fn composite_id_uses_dash_form_date() {
        assert_eq!(composite_plant_id("tree-042", "2024_05_17"), "tree-042_2024-05-17");
        assert_eq!(composite_plant_id("tree-042", "2024-05-17"), "tree-042_2024-05-17");
    }

    #[test]
    fn epoch_millis_for_utc_midnight() {
        // 2024-05-17T00:00:00Z
        assert_eq!(date_to_epoch_millis("2024-05-17").unwrap(), 1_715_904_000_000);
    }

    #[test]
    fn epoch_millis_rejects_garbage() {
        assert!(date_to_epoch_millis("yesterday").is_err());
        assert!(date_to_epoch_millis("2024_05_17").is_err());
    }
}
