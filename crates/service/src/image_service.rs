use std::sync::Arc;

use serde_json::Value;

use crownwatch_core::{DEFAULT_THUMBNAIL_DIMENSION, date_to_epoch_millis};
use crownwatch_geo::expr::Expr;
use crownwatch_geo::{GeoClient, ThumbnailParams};

use crate::error::ServiceError;

/// Satellite-image lookups against the configured archive.
pub struct ImageService {
    geo: Arc<GeoClient>,
    image_collection: String,
}

impl ImageService {
    #[must_use]
    pub fn new(geo: Arc<GeoClient>, image_collection: String) -> Self {
        Self { geo, image_collection }
    }

    /// Expression selecting the first archive image whose timestamp equals
    /// the date's UTC midnight, in epoch milliseconds.
    fn image_for_date(&self, date: &str) -> Result<Expr, ServiceError> {
        let millis = date_to_epoch_millis(date)?;
        Ok(Expr::image_collection(&self.image_collection)
            .filter_eq("system:time_start", millis)
            .first())
    }

    /// Full metadata of the image matching `date`.
    ///
    /// Returns [`ServiceError::NotFound`] when no archive image carries that
    /// timestamp.
    pub async fn image_info(&self, date: &str) -> Result<Value, ServiceError> {
        let info = self.geo.compute(self.image_for_date(date)?).await?;
        if info.is_null() {
            return Err(ServiceError::NotFound("No image found for this date".to_owned()));
        }
        Ok(info)
    }

    /// Thumbnail URL for the image matching `date`, rendered with the fixed
    /// 3-band RGB mapping and 0–255 stretch.
    pub async fn thumbnail_url(
        &self,
        date: &str,
        max_size: Option<u32>,
    ) -> Result<String, ServiceError> {
        let dimension = max_size.unwrap_or(DEFAULT_THUMBNAIL_DIMENSION);
        let url = self
            .geo
            .thumbnail_url(self.image_for_date(date)?, &ThumbnailParams::rgb(dimension))
            .await?;
        Ok(url)
    }
}
