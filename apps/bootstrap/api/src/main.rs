use axum_helpers::server::{ShutdownOutcome, shutdown_signal};
use bootstrap_api::bootstrap::{self, BootstrapError};
use bootstrap_api::config::Config;
use clap::Parser;
use core_config::tracing::{LogHandle, init_logging, install_color_eyre};
use core_config::{FromSettings, Settings};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "bootstrap")]
#[command(about = "Minimal HTTP service with cache, optional database and graceful shutdown")]
struct Cli {
    /// Settings file (INI)
    #[arg(short, long, default_value = Settings::DEFAULT_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let cli = Cli::parse();

    // Settings and log level problems are reported through color-eyre
    let settings = Settings::load(&cli.config).map_err(BootstrapError::Config)?;
    let config = Config::from_settings(&settings).map_err(BootstrapError::Config)?;

    let log = init_logging(&config.log);
    info!(path = %cli.config.display(), "Settings loaded");

    let (ctx, server) = match bootstrap::prepare(config, log.clone()).await {
        Ok(prepared) => prepared,
        Err(e) => {
            error!(fatal = true, error = %e, "Bootstrap failed");
            return Err(fatal_report(&log, e));
        }
    };

    let engine = bootstrap::engine(&ctx);
    let result = server.run(engine, shutdown_signal()).await;

    ctx.close().await;

    match result {
        Ok(ShutdownOutcome::Graceful) => info!("Server exiting"),
        Ok(ShutdownOutcome::TimedOut) => warn!("Server forced to shutdown"),
        Err(e) => {
            let e = BootstrapError::Serve(e);
            error!(fatal = true, error = %e, "Server stopped unexpectedly");
            return Err(fatal_report(&log, e));
        }
    }

    log.flush()?;
    Ok(())
}

/// Flush pending records before a fatal exit. A failed flush is attached to
/// the report so it still reaches stderr.
fn fatal_report(log: &LogHandle, err: BootstrapError) -> eyre::Report {
    let report = eyre::Report::new(err);
    match log.flush() {
        Ok(()) => report,
        Err(flush) => report.wrap_err(format!("failed to flush log output: {flush}")),
    }
}
