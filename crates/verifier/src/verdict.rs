//! Per-package verdicts.

use crate::icon::IconInspection;
use aixverify_common::layout::{display_name, ICON_PNG, MAIN_WASM, SOURCE_JSON};
use aixverify_common::{Result, SchemaKind};
use aixverify_package_schema::ValidationOutcome;

/// What checking one entry produced.
#[derive(Debug)]
pub enum EntryFinding {
    /// `main.wasm` is present. Its content is not inspected.
    Payload,
    /// Icon inspection, or the read/decode error that prevented it.
    Icon(Result<IconInspection>),
    /// Descriptor validation, or the read error that prevented it.
    Descriptor {
        kind: SchemaKind,
        outcome: Result<ValidationOutcome>,
    },
}

impl EntryFinding {
    /// Whether this finding counts as a passing check.
    pub fn passed(&self) -> bool {
        match self {
            EntryFinding::Payload => true,
            EntryFinding::Icon(inspection) => {
                inspection.as_ref().map_or(false, IconInspection::is_valid)
            }
            EntryFinding::Descriptor { outcome, .. } => {
                outcome.as_ref().map_or(false, |o| o.valid)
            }
        }
    }
}

/// Aggregate result for one package.
///
/// Mandatory entries (payload, icon, source descriptor) start out failing and
/// pass once a passing copy is seen. Optional descriptors (settings, filters)
/// start out passing and fail once a failing copy is seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageVerdict {
    pub payload_found: bool,
    pub icon_found: bool,
    pub icon_valid: bool,
    pub source_found: bool,
    pub source_valid: bool,
    pub settings_valid: bool,
    pub filters_valid: bool,
}

impl Default for PackageVerdict {
    fn default() -> Self {
        Self {
            payload_found: false,
            icon_found: false,
            icon_valid: false,
            source_found: false,
            source_valid: false,
            settings_valid: true,
            filters_valid: true,
        }
    }
}

impl PackageVerdict {
    /// Fold a sequence of findings into a verdict.
    pub fn from_findings<'a>(findings: impl IntoIterator<Item = &'a EntryFinding>) -> Self {
        let mut verdict = Self::default();
        for finding in findings {
            verdict.record(finding);
        }
        verdict
    }

    pub fn record(&mut self, finding: &EntryFinding) {
        let passed = finding.passed();
        match finding {
            EntryFinding::Payload => self.payload_found = true,
            EntryFinding::Icon(_) => {
                self.icon_found = true;
                self.icon_valid |= passed;
            }
            EntryFinding::Descriptor { kind, .. } => match kind {
                SchemaKind::Source => {
                    self.source_found = true;
                    self.source_valid |= passed;
                }
                SchemaKind::Settings => self.settings_valid &= passed,
                SchemaKind::Filters => self.filters_valid &= passed,
            },
        }
    }

    pub fn passed(&self) -> bool {
        self.payload_found
            && self.icon_valid
            && self.source_valid
            && self.settings_valid
            && self.filters_valid
    }

    /// Mandatory entries that never showed up, payload first.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (self.payload_found, MAIN_WASM),
            (self.icon_found, ICON_PNG),
            (self.source_found, SOURCE_JSON),
        ]
        .into_iter()
        .filter(|(found, _)| !found)
        .map(|(_, name)| display_name(name))
        .collect()
    }
}
