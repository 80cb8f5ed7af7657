use std::process::ExitCode;

use anyhow::{Context, Result};
use poll_smoke_harness::{HarnessConfig, Session};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load configuration
    let config = HarnessConfig::from_env().context("Failed to load configuration")?;

    // Initialize tracing with the configured log level
    init_tracing(&config.log_level);

    info!("poll-smoke harness starting");
    info!(
        "Configuration loaded: base_url={}, datastore={}:{}, summary={}",
        config.base_url,
        config.datastore_host,
        config.datastore_port,
        config.summary_path.display()
    );

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        return Err(e);
    }

    let session = Session::from_config(config).context("Failed to create smoke session")?;
    let report = session.run().await;

    for failed in report.failed_probes() {
        if let Some(err) = &failed.error {
            error!(probe = %failed.kind, connectivity = err.is_connectivity(), "{}", err);
        }
    }

    if report.is_success() {
        info!("poll-smoke harness finished: all probes passed");
        Ok(ExitCode::SUCCESS)
    } else {
        error!(
            failed = report.summary.failed,
            summary_written = report.persist_error.is_none(),
            "poll-smoke harness finished with failures"
        );
        Ok(ExitCode::FAILURE)
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .compact()
        .init();
}
