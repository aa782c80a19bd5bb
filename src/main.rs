//! Examination system request router.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌────────────────────────────────────────────────────┐
//!                     │                    EXAM ROUTER                      │
//!                     │                                                     │
//!   Client Request    │  ┌─────────┐    ┌────────────┐    ┌────────────┐   │
//!   ──────────────────┼─▶│  http   │───▶│  routing   │───▶│  handler   │   │
//!                     │  │ server  │    │ normalize  │    │ (app/ctrl) │   │
//!                     │  └─────────┘    │ + resolve  │    └─────┬──────┘   │
//!                     │                 └────────────┘          │          │
//!   Client Response   │  ┌─────────┐                            │          │
//!   ◀─────────────────┼──│response │◀───────── Output ──────────┘          │
//!                     │  └─────────┘                                        │
//!                     │                                                     │
//!                     │  config · observability · lifecycle                 │
//!                     └────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use exam_router::config::load_or_default;
use exam_router::lifecycle::startup;
use exam_router::observability::logging;

#[derive(Parser)]
#[command(name = "exam-router")]
#[command(about = "Serve the examination system's route table", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!("exam-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        script_name = %config.mount.script_name,
        strict_handlers = config.routing.strict_handlers,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
