//! Core types and configuration for crownwatch
//!
//! This crate contains domain types shared across all other crates.

mod config;
mod constants;
mod date;
mod error;
mod observation;

pub use config::*;
pub use constants::*;
pub use date::*;
pub use error::*;
pub use observation::*;
