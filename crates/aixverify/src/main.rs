//! aixverify - Test Aidoku packages if they're ready for publishing.

use aixverify_verifier::{run_batch, ConsoleReporter, IconPolicy, VerifierConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "aixverify")]
#[command(
    author,
    version,
    about = "Test Aidoku packages if they're ready for publishing"
)]
struct Cli {
    /// Package files to verify
    #[arg(value_name = "FILES", required = true, num_args = 1..)]
    files: Vec<PathBuf>,

    /// Reject icons when either dimension differs from the required size
    #[arg(long)]
    strict_icon_dimensions: bool,

    /// Required icon width and height in pixels
    #[arg(long, default_value = "128")]
    icon_size: u32,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let config = VerifierConfig {
        icon: IconPolicy::new(cli.icon_size, cli.strict_icon_dimensions)?,
    };
    debug!("Verifier config: {:?}", config);

    info!("Verifying {} package(s)", cli.files.len());
    let mut reporter = ConsoleReporter::stdout();
    let outcome = run_batch(&cli.files, &config, &mut reporter);

    if outcome.failed() {
        anyhow::bail!("one or more packages failed validation, see above");
    }

    Ok(())
}
