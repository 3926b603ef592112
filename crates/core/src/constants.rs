//! Fixed values shared by the rendering and styling paths.

/// Default maximum thumbnail dimension when the caller does not specify one.
pub const DEFAULT_THUMBNAIL_DIMENSION: u32 = 3930;

/// RGB band mapping used for every rendered thumbnail.
pub const THUMBNAIL_BANDS: [&str; 3] = ["b1", "b2", "b3"];

/// Pixel stretch applied to thumbnails.
pub const THUMBNAIL_MIN: u8 = 0;
pub const THUMBNAIL_MAX: u8 = 255;

/// Outline color for crowns that already have a plant record.
pub const OBSERVED_CROWN_COLOR: &str = "#0000FF";
/// Outline width for crowns that already have a plant record.
pub const OBSERVED_CROWN_WIDTH: u32 = 2;

/// Outline color for crowns with no plant record yet.
pub const MISSING_CROWN_COLOR: &str = "#FF0000";
/// Outline width for crowns with no plant record yet.
pub const MISSING_CROWN_WIDTH: u32 = 1;

/// Fully transparent fill, shared by every crown style.
pub const TRANSPARENT_FILL: &str = "00000000";

/// Leafing value attached to crowns with no matching label.
pub const LEAFING_NONE: &str = "none";

/// Collection holding plant records in the document store.
pub const PLANTS_COLLECTION: &str = "plants";

/// Sub-collection holding observation records under each plant.
pub const OBSERVATIONS_SUBCOLLECTION: &str = "observations";
