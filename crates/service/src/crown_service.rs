use std::sync::Arc;

use serde_json::Value;

use crownwatch_geo::GeoClient;
use crownwatch_geo::expr::{Expr, merge_crowns_with_labels, partition_and_style};

use crate::error::ServiceError;
use crate::observation_service::ObservationService;

/// Crown-feature retrieval: join with labels, filter to a date, and style by
/// whether a plant record already exists for each crown.
pub struct CrownService {
    geo: Arc<GeoClient>,
    observations: Arc<ObservationService>,
    crowns: String,
    labels: String,
}

impl CrownService {
    #[must_use]
    pub fn new(
        geo: Arc<GeoClient>,
        observations: Arc<ObservationService>,
        crowns: String,
        labels: String,
    ) -> Self {
        Self { geo, observations, crowns, labels }
    }

    /// Date-filtered crowns with their derived `leafing` attribute, before
    /// any styling.
    fn crowns_for_date(&self, date: &str) -> Expr {
        let merged = merge_crowns_with_labels(
            Expr::feature_collection(&self.crowns),
            Expr::feature_collection(&self.labels),
        );
        merged.filter_date(date)
    }

    /// Styled crown features for `date`.
    ///
    /// Every crown lands in exactly one partition: blue outline for crowns
    /// whose GlobalID already has a plant record on that date, red for the
    /// rest. Returns [`ServiceError::NotFound`] when the date has no crowns
    /// at all.
    pub async fn styled_crowns(&self, date: &str) -> Result<Value, ServiceError> {
        let existing_ids = self.observations.global_ids_by_date(date).await?;
        let filtered = self.crowns_for_date(date);

        let size = self.geo.compute(filtered.clone().size()).await?;
        let count = size.as_u64().ok_or_else(|| {
            ServiceError::UnexpectedResponse(format!("size is not a number: {size}"))
        })?;
        if count == 0 {
            return Err(ServiceError::NotFound("No crowns found for this date".to_owned()));
        }

        tracing::debug!(date = %date, crowns = count, observed = existing_ids.len(), "styling crowns");
        let styled = partition_and_style(filtered, &existing_ids);
        Ok(self.geo.compute(styled).await?)
    }
}
