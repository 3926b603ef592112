//! Service layer for crownwatch
//!
//! Centralizes business logic between the HTTP handlers and the two remote
//! capabilities: the geospatial expression service and the document store.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod crown_service;
mod error;
mod image_service;
mod observation_service;

pub use crown_service::CrownService;
pub use error::ServiceError;
pub use image_service::ImageService;
pub use observation_service::{ObservationService, SubmissionReceipt};
