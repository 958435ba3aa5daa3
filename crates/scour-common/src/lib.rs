//! Common utilities for scour.
//!
//! This crate provides shared infrastructure used by the engine's outer surfaces:
//! - **Error Types** - the single error enum for input, config and step parsing
//! - **Warning System** - colored, deduplicated terminal warnings

pub mod error;
pub mod warning;

pub use error::{Result, ScourError};
