//! Descriptor schemas for aixverify.
//!
//! This crate embeds the JSON schemas a package's descriptor documents
//! (`source.json`, `filters.json`, `settings.json`) must satisfy, and
//! validates raw documents against them.

pub mod schema;
pub mod validation;

pub use aixverify_common::SchemaKind;
pub use validation::{validate, validate_reader, ValidationOutcome, Violation};
