//! Batch verification of many packages.

use crate::archive::Package;
use crate::config::VerifierConfig;
use crate::report::Reporter;
use crate::verify::verify_package;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Number of packages attempted.
    pub attempted: usize,
    /// Packages that failed to open or failed verification, in input order.
    pub failures: Vec<PathBuf>,
}

impl BatchOutcome {
    fn record(&mut self, path: &Path, passed: bool) {
        self.attempted += 1;
        if !passed {
            self.failures.push(path.to_path_buf());
        }
    }

    /// True if any package failed.
    pub fn failed(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn passed_count(&self) -> usize {
        self.attempted - self.failures.len()
    }
}

/// Verify every package in `paths`, in order.
///
/// A package that cannot be opened is reported and counted as failed; the
/// run always continues with the next path.
pub fn run_batch<I, P>(
    paths: I,
    config: &VerifierConfig,
    reporter: &mut dyn Reporter,
) -> BatchOutcome
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut outcome = BatchOutcome::default();

    for path in paths {
        let path = path.as_ref();
        let passed = match Package::open(path) {
            Ok(mut package) => verify_package(&mut package, config, reporter).passed(),
            Err(e) => {
                warn!("Failed to open {:?}: {}", path, e);
                reporter.open_failed(path, &e);
                false
            }
        };
        outcome.record(path, passed);
    }

    info!(
        "Verified {} package(s): {} passed, {} failed",
        outcome.attempted,
        outcome.passed_count(),
        outcome.failures.len()
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use aixverify_common::layout::{MAIN_WASM, SETTINGS_JSON, SOURCE_JSON};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_all_pass() {
        let dir = tempdir().unwrap();
        let paths: Vec<_> = (0..3)
            .map(|i| PackageBuilder::valid().build(dir.path(), &format!("ok{i}.aix")))
            .collect();

        let mut reporter = RecordingReporter::default();
        let outcome = run_batch(&paths, &VerifierConfig::default(), &mut reporter);

        assert_eq!(outcome.attempted, 3);
        assert!(!outcome.failed());
        assert_eq!(outcome.passed_count(), 3);
    }

    #[test]
    fn test_failures_do_not_short_circuit() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("broken.aix");
        std::fs::write(&broken, b"PK but not really").unwrap();

        let paths = vec![
            PackageBuilder::valid()
                .without(MAIN_WASM)
                .build(dir.path(), "no-wasm.aix"),
            broken.clone(),
            dir.path().join("missing.aix"),
            PackageBuilder::valid()
                .file(SETTINGS_JSON, &settings_missing_key_json())
                .build(dir.path(), "bad-settings.aix"),
            PackageBuilder::valid().build(dir.path(), "good.aix"),
        ];

        let mut reporter = RecordingReporter::default();
        let outcome = run_batch(&paths, &VerifierConfig::default(), &mut reporter);

        assert_eq!(outcome.attempted, 5);
        assert!(outcome.failed());
        assert_eq!(
            outcome.failures,
            vec![
                paths[0].clone(),
                broken.clone(),
                paths[2].clone(),
                paths[3].clone()
            ]
        );

        let starts = reporter.events.iter().filter(|e| e.starts_with("start ")).count();
        let open_failures = reporter
            .events
            .iter()
            .filter(|e| e.starts_with("open-failed "))
            .count();
        assert_eq!(starts, 3);
        assert_eq!(open_failures, 2);
        assert_eq!(
            reporter.events.last().unwrap(),
            &format!("finish {} pass", paths[4].display())
        );
    }

    #[test]
    fn test_empty_batch() {
        let mut reporter = RecordingReporter::default();
        let outcome = run_batch(Vec::<PathBuf>::new(), &VerifierConfig::default(), &mut reporter);
        assert_eq!(outcome, BatchOutcome::default());
        assert!(!outcome.failed());
    }

    #[test]
    fn test_oversized_entry_does_not_abort_batch() {
        let dir = tempdir().unwrap();
        let oversized = dir.path().join("oversized.aix");
        std::fs::write(&oversized, oversized_entry_archive(SOURCE_JSON, b"{}", 1 << 60)).unwrap();
        let good = PackageBuilder::valid().build(dir.path(), "good.aix");

        let mut reporter = RecordingReporter::default();
        let outcome = run_batch(
            [&oversized, &good],
            &VerifierConfig::default(),
            &mut reporter,
        );

        assert_eq!(outcome.attempted, 2);
        assert_eq!(outcome.failures, vec![oversized.clone()]);
        assert!(reporter
            .events
            .contains(&format!("finish {} fail", oversized.display())));
        assert_eq!(
            reporter.events.last().unwrap(),
            &format!("finish {} pass", good.display())
        );
    }
}
