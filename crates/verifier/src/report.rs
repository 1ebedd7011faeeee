//! Console reporting for verification runs.

use crate::archive::Entry;
use crate::verdict::{EntryFinding, PackageVerdict};
use aixverify_common::Error;
use console::{style, StyledObject, Term};
use std::io::Write;
use std::path::Path;

/// Observer of a verification run.
///
/// Reporters only watch: nothing they do affects a verdict.
pub trait Reporter {
    fn package_started(&mut self, path: &Path);

    fn open_failed(&mut self, path: &Path, error: &Error);

    fn entry(&mut self, entry: &Entry);

    fn finding(&mut self, entry: &Entry, finding: &EntryFinding);

    fn package_finished(&mut self, path: &Path, verdict: &PackageVerdict);
}

/// Line-oriented human report.
pub struct ConsoleReporter<W: Write> {
    out: W,
    colors: bool,
}

impl ConsoleReporter<Term> {
    pub fn stdout() -> Self {
        Self::new(Term::stdout(), console::colors_enabled())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, colors: bool) -> Self {
        Self { out, colors }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn ok(&self) -> StyledObject<&'static str> {
        style("ok").green().force_styling(self.colors)
    }

    fn red<D>(&self, text: D) -> StyledObject<D> {
        style(text).red().force_styling(self.colors)
    }

    /// Write a check label, then its result on the same line.
    fn check_line(&mut self, label: &str, error: Option<String>) {
        let _ = write!(self.out, "    * {label}... ");
        match error {
            None => {
                let ok = self.ok();
                let _ = writeln!(self.out, "{ok}");
            }
            Some(message) => {
                let message = self.red(message);
                let _ = writeln!(self.out, "{message}");
            }
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn package_started(&mut self, path: &Path) {
        let _ = writeln!(self.out, "* Testing {}", path.display());
    }

    fn open_failed(&mut self, path: &Path, error: &Error) {
        let line = match error {
            Error::InvalidArchive(_) => {
                format!("error: {} is not a valid zip file", path.display())
            }
            other => format!("error: couldn't open {}: {}", path.display(), other),
        };
        let line = self.red(line);
        let _ = writeln!(self.out, "{line}");
    }

    fn entry(&mut self, entry: &Entry) {
        let _ = writeln!(self.out, "  * {}", entry.display_name());
    }

    fn finding(&mut self, _entry: &Entry, finding: &EntryFinding) {
        match finding {
            EntryFinding::Payload => {}
            EntryFinding::Icon(Err(e)) => {
                let line = self.red(format!("    * error: {e}"));
                let _ = writeln!(self.out, "{line}");
            }
            EntryFinding::Icon(Ok(icon)) => {
                let size = icon.expected_size;
                let dimensions_error = (!icon.dimensions_ok).then(|| {
                    format!(
                        "error: expected {size}x{size}, found {}x{}",
                        icon.width, icon.height
                    )
                });
                self.check_line(
                    &format!("Testing if image's dimensions are {size}x{size}"),
                    dimensions_error,
                );

                let opacity_error = (!icon.opaque_ok).then(|| "error".to_string());
                self.check_line("Testing if image is fully opaque", opacity_error);
            }
            EntryFinding::Descriptor { kind, outcome } => {
                let label = format!("Testing if {} is valid against schema", kind.file_name());
                match outcome {
                    Err(e) => self.check_line(&label, Some(format!("error: {e}"))),
                    Ok(outcome) if outcome.valid => self.check_line(&label, None),
                    Ok(outcome) => {
                        self.check_line(&label, Some("error".to_string()));
                        for violation in &outcome.violations {
                            let _ = writeln!(self.out, "      * {violation}");
                        }
                    }
                }
            }
        }
    }

    fn package_finished(&mut self, _path: &Path, verdict: &PackageVerdict) {
        if !verdict.passed() {
            for name in verdict.missing() {
                let line = self.red(format!("  * test failed: did not find {name}"));
                let _ = writeln!(self.out, "{line}");
            }
        }
        let _ = writeln!(self.out);
    }
}
