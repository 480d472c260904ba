//! Contact list REST API (v1)
//!
//! A bounded in-memory contact store served over hand-framed HTTP/1.1.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────────────┐
//!                   │                    CONTACT API                       │
//!                   │                                                      │
//!   Client Request  │  ┌──────────┐    ┌───────────┐    ┌──────────────┐   │
//!   ────────────────┼─▶│   net    │───▶│   http    │───▶│   routing    │   │
//!                   │  │ listener │    │  request  │    │ router +     │   │
//!                   │  └──────────┘    │  framer   │    │ handlers     │   │
//!                   │                  └───────────┘    └──────┬───────┘   │
//!                   │                                          │           │
//!                   │                        ┌─────────────────┴────────┐  │
//!                   │                        ▼                          ▼  │
//!                   │                 ┌────────────┐            ┌──────────┐
//!                   │                 │  contacts  │            │   json   │
//!                   │                 │   store    │            │  codec   │
//!                   │                 └────────────┘            └──────────┘
//!   Client Response │  ┌──────────┐    ┌───────────┐                       │
//!   ◀───────────────┼──│  close   │◀───│   http    │◀── Response ──────────┤
//!                   │  │          │    │  writer   │                       │
//!                   │  └──────────┘    └───────────┘                       │
//!                   │                                                      │
//!                   │   config · observability · lifecycle (cross-cutting) │
//!                   └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use contact_api::config::{load_config, validate_config, ConfigError, ServiceConfig};
use contact_api::net::Listener;
use contact_api::observability::{logging, metrics};
use contact_api::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "contact-api")]
#[command(about = "REST API for a bounded in-memory contact list", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("contact-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        store_capacity = config.store.capacity,
        max_request_bytes = config.limits.max_request_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = Listener::bind(&config.listener).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("Try: curl http://localhost:{}/contacts", local_addr.port());

    let shutdown = Shutdown::new();
    let stop = shutdown.subscribe();
    shutdown.trigger_on_ctrl_c();

    HttpServer::new(&config).run(listener, stop).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
