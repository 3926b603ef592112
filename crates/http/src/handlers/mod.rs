pub mod crowns;
pub mod images;
pub mod observations;
