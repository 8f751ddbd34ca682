//! Tracklet CLI binary.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracklet::cli::Cli;

/// Main entry point for the tracklet CLI.
///
/// Commands run one at a time, so a current-thread runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so `--json` output on stdout stays parseable.
    // Override with RUST_LOG, e.g. RUST_LOG=tracklet=debug,tracklet_kv=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tracklet=info,tracklet_kv=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting tracklet CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Tracklet CLI completed successfully");
    Ok(())
}
