//! Descriptor validation utilities.

use crate::schema;
use aixverify_common::{Result, SchemaKind};
use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::fmt;
use std::fmt::Write as _;
use std::io::Read;
use tracing::debug;

static SOURCE: Lazy<JSONSchema> = Lazy::new(|| compile(SchemaKind::Source));
static FILTERS: Lazy<JSONSchema> = Lazy::new(|| compile(SchemaKind::Filters));
static SETTINGS: Lazy<JSONSchema> = Lazy::new(|| compile(SchemaKind::Settings));

fn compile(kind: SchemaKind) -> JSONSchema {
    let schema_value = schema::schema_value(kind);
    JSONSchema::compile(&schema_value)
        .unwrap_or_else(|e| panic!("embedded {kind} schema does not compile: {e}"))
}

fn compiled(kind: SchemaKind) -> &'static JSONSchema {
    match kind {
        SchemaKind::Source => &*SOURCE,
        SchemaKind::Filters => &*FILTERS,
        SchemaKind::Settings => &*SETTINGS,
    }
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path to the offending value, e.g. `listings[0].name`.
    /// Empty for the document root.
    pub path: String,
    pub message: String,
}

impl Violation {
    fn root(message: String) -> Self {
        Self {
            path: String::new(),
            message,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Result of validating one descriptor document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub violations: Vec<Violation>,
}

impl ValidationOutcome {
    pub fn new() -> Self {
        Self {
            valid: true,
            violations: Vec::new(),
        }
    }

    pub fn add_violation(&mut self, violation: Violation) {
        self.valid = false;
        self.violations.push(violation);
    }
}

impl Default for ValidationOutcome {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a JSON pointer (`/listings/0/name`) as a dotted path
/// (`listings[0].name`).
pub fn dotted_path(pointer: &str) -> String {
    let mut path = String::new();
    for raw in pointer.split('/').skip(1) {
        let segment = raw.replace("~1", "/").replace("~0", "~");
        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            let _ = write!(path, "[{segment}]");
        } else {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(&segment);
        }
    }
    path
}

/// Validate a raw descriptor document against the schema for `kind`.
///
/// A document that is not well-formed JSON yields a single root violation.
pub fn validate(kind: SchemaKind, document: &[u8]) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::new();

    let instance: Value = match serde_json::from_slice(document) {
        Ok(value) => value,
        Err(e) => {
            outcome.add_violation(Violation::root(format!("document is not parseable: {e}")));
            return outcome;
        }
    };

    if let Err(errors) = compiled(kind).validate(&instance) {
        for error in errors {
            outcome.add_violation(Violation {
                path: dotted_path(&error.instance_path.to_string()),
                message: error.to_string(),
            });
        }
    }

    debug!(
        "{} descriptor checked: {} violation(s)",
        kind,
        outcome.violations.len()
    );
    outcome
}

/// Read a descriptor document fully, then validate it.
///
/// Read failures are returned as errors rather than violations.
pub fn validate_reader<R: Read>(kind: SchemaKind, mut reader: R) -> Result<ValidationOutcome> {
    let mut document = Vec::new();
    reader.read_to_end(&mut document)?;
    Ok(validate(kind, &document))
}
