//! Common utilities and types shared across aixverify crates.

pub mod error;
pub mod layout;

pub use error::{Error, Result};
pub use layout::SchemaKind;
