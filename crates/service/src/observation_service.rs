use std::sync::Arc;

use crownwatch_core::{
    OBSERVATIONS_SUBCOLLECTION, ObservationInput, PLANTS_COLLECTION, to_storage_form,
};
use crownwatch_store::DocStore;

use crate::error::ServiceError;

/// IDs produced by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Composite plant-record ID (`{globalId}_{date}`).
    pub parent_id: String,
    /// Store-minted ID of the new observation child document.
    pub observation_id: String,
}

/// Plant-record persistence and lookups in the document store.
pub struct ObservationService {
    store: Arc<DocStore>,
}

impl ObservationService {
    #[must_use]
    pub const fn new(store: Arc<DocStore>) -> Self {
        Self { store }
    }

    /// Persists a field observation.
    ///
    /// Merge-upserts the parent plant record keyed by the composite ID, then
    /// creates a fresh auto-ID child under its observations sub-collection.
    /// The two writes are not transactional: a child failure after a parent
    /// success leaves the merged parent in place.
    pub async fn submit(&self, input: &ObservationInput) -> Result<SubmissionReceipt, ServiceError> {
        input.validate()?;

        let record = input.plant_record();
        let parent_id = record.document_id();
        self.store
            .set_merge(PLANTS_COLLECTION, &parent_id, &serde_json::to_value(&record)?)
            .await?;

        let observation_id = self
            .store
            .add_document(
                PLANTS_COLLECTION,
                &parent_id,
                OBSERVATIONS_SUBCOLLECTION,
                &input.observation_fields(),
            )
            .await?;

        tracing::info!(parent_id = %parent_id, observation_id = %observation_id, "observation persisted");
        Ok(SubmissionReceipt { parent_id, observation_id })
    }

    /// Non-empty `globalId` values of every plant record for `date`.
    ///
    /// The date is converted to storage form before comparison, so dash and
    /// underscore input behave identically.
    pub async fn global_ids_by_date(&self, date: &str) -> Result<Vec<String>, ServiceError> {
        let storage_date = to_storage_form(date);
        let docs = self.store.query_equal(PLANTS_COLLECTION, "date", &storage_date).await?;
        Ok(docs
            .iter()
            .filter_map(|doc| doc.str_field("globalId"))
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(ToOwned::to_owned)
            .collect())
    }
}
