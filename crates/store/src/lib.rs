//! Client for the document database.
//!
//! Plant records and their observation sub-documents live in a remote
//! document store. This crate covers exactly the three operations the
//! gateway needs: single-field equality queries, merge-upserts keyed by
//! composite IDs, and auto-ID child document creation.

mod client;
mod error;

pub use client::{DocStore, Document};
pub use error::StoreError;
