//! Client for the remote geospatial expression service.
//!
//! All raster/vector work happens on the remote platform: this crate only
//! builds declarative expression graphs ([`expr`]) and ships them to the
//! service for evaluation ([`GeoClient`]). Nothing here touches pixels or
//! geometries locally.

mod client;
mod error;
pub mod expr;

pub use client::{GeoClient, ThumbnailParams};
pub use error::GeoError;
