//! Text sanitization for markup output.
//!
//! # Scope
//!
//! This crate implements two independent single-pass transforms:
//! - **Entity Encoder** ([`Encoder`]) - escapes `<`, `>`, `&` and `"`, and can
//!   emit a line-break fragment before each newline
//! - **Tag Stripper** ([`TagStripper`]) - drops every `<...>` span with a
//!   two-state, non-nesting scan and returns the input untouched when nothing
//!   was dropped
//!
//! Callers compose them by feeding one's output into the other, or through a
//! [`Pipeline`] of [`Step`]s.
//!
//! # Not Implemented
//!
//! - HTML parsing or DOM construction
//! - Attribute, URL or script-context escaping
//! - Unicode normalization

/// Append-only accumulator shared across encoder calls.
pub mod builder;
/// Entity encoding.
pub mod encoder;
/// Ordered composition of encode and strip steps.
pub mod pipeline;
/// Tag stripping automaton.
pub mod strip;

pub use builder::Builder;
pub use encoder::{BREAK_FRAGMENT, Encoder, encode, encode_display};
pub use pipeline::{Pipeline, PipelineConfig, PipelineStats, Step};
pub use strip::{StripReport, TagState, TagStripper, strip_tags};
