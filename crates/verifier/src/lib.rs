//! aixverify verifier - checks package archives before publishing.
//!
//! A package is a zip archive laid out under `Payload/`. Verification walks
//! the archive, inspects the icon, validates descriptor documents and folds
//! the findings into a [`PackageVerdict`]. Console output is produced by a
//! [`Reporter`] observing the run and never feeds back into the verdict.

pub mod archive;
pub mod batch;
pub mod config;
pub mod icon;
pub mod report;
pub mod verdict;
pub mod verify;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use archive::{Entry, EntryRole, Package};
pub use batch::{run_batch, BatchOutcome};
pub use config::{IconPolicy, VerifierConfig};
pub use icon::IconInspection;
pub use report::{ConsoleReporter, Reporter};
pub use verdict::{EntryFinding, PackageVerdict};
pub use verify::{inspect_entry, verify_package, verify_path};
