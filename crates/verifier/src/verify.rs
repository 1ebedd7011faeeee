//! Package verification.

use crate::archive::{Entry, EntryRole, Package};
use crate::config::VerifierConfig;
use crate::icon;
use crate::report::Reporter;
use crate::verdict::{EntryFinding, PackageVerdict};
use aixverify_common::Result;
use aixverify_package_schema::validation;
use std::path::Path;
use tracing::{debug, warn};

/// Check a single entry according to its role.
///
/// Returns `None` for entries that are not checked. Read, decode and schema
/// failures are captured in the finding.
pub fn inspect_entry(
    package: &mut Package,
    entry: &Entry,
    config: &VerifierConfig,
) -> Option<EntryFinding> {
    let finding = match entry.role {
        EntryRole::Payload => EntryFinding::Payload,
        EntryRole::Icon => EntryFinding::Icon(
            package
                .read_entry(entry)
                .and_then(|bytes| icon::inspect(&bytes, &config.icon)),
        ),
        EntryRole::Descriptor(kind) => EntryFinding::Descriptor {
            kind,
            outcome: package
                .read_entry(entry)
                .map(|bytes| validation::validate(kind, &bytes)),
        },
        EntryRole::Unclassified => return None,
    };

    match &finding {
        EntryFinding::Icon(Err(e)) | EntryFinding::Descriptor { outcome: Err(e), .. } => {
            warn!("{}: {}", entry.name, e);
        }
        _ => {}
    }

    Some(finding)
}

/// Verify an opened package, reporting progress as entries are checked.
pub fn verify_package(
    package: &mut Package,
    config: &VerifierConfig,
    reporter: &mut dyn Reporter,
) -> PackageVerdict {
    reporter.package_started(package.path());

    let mut verdict = PackageVerdict::default();
    let entries = package.entries().to_vec();
    for entry in entries.iter().filter(|e| !e.is_dir) {
        reporter.entry(entry);

        let Some(finding) = inspect_entry(package, entry, config) else {
            debug!("Skipping unclassified entry {}", entry.name);
            continue;
        };
        reporter.finding(entry, &finding);
        verdict.record(&finding);
    }

    debug!("{}: {:?}", package.path().display(), verdict);
    reporter.package_finished(package.path(), &verdict);
    verdict
}

/// Open, verify and close the package at `path`.
pub fn verify_path(
    path: &Path,
    config: &VerifierConfig,
    reporter: &mut dyn Reporter,
) -> Result<PackageVerdict> {
    let mut package = Package::open(path)?;
    Ok(verify_package(&mut package, config, reporter))
}
