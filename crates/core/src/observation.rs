//! Plant records and field observations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::date::{composite_plant_id, to_storage_form};
use crate::error::{CoreError, Result};

/// Parent document persisted once per `{globalId, date}` pair.
///
/// Merge-upserted on every submission, so repeated observations of the same
/// crown on the same day collapse onto one record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlantRecord {
    pub global_id: String,
    pub latin_name: String,
    pub date: String,
}

impl PlantRecord {
    /// Composite document ID identifying this record in the store.
    #[must_use]
    pub fn document_id(&self) -> String {
        composite_plant_id(&self.global_id, &self.date)
    }
}

/// A field observation as submitted by the client app.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationInput {
    pub global_id: String,
    pub latin_name: String,
    pub date: String,
    pub leafing: String,
    pub is_flowering: bool,
    pub flowering_intensity: Value,
    pub segmentation: Value,
}

impl ObservationInput {
    /// Rejects submissions that cannot form a usable composite key.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidInput`] when `globalId` or `date` is empty.
    pub fn validate(&self) -> Result<()> {
        if self.global_id.trim().is_empty() {
            return Err(CoreError::InvalidInput("globalId must not be empty".to_owned()));
        }
        if self.date.trim().is_empty() {
            return Err(CoreError::InvalidInput("date must not be empty".to_owned()));
        }
        Ok(())
    }

    /// Parent plant record carried by this submission.
    ///
    /// The date is persisted in storage form so date-keyed queries match
    /// regardless of which form the client sent.
    #[must_use]
    pub fn plant_record(&self) -> PlantRecord {
        PlantRecord {
            global_id: self.global_id.clone(),
            latin_name: self.latin_name.clone(),
            date: to_storage_form(&self.date),
        }
    }

    /// Fields of the immutable child observation document.
    #[must_use]
    pub fn observation_fields(&self) -> Value {
        serde_json::json!({
            "leafing": self.leafing,
            "isFlowering": self.is_flowering,
            "floweringIntensity": self.flowering_intensity,
            "segmentation": self.segmentation,
        })
    }
}
