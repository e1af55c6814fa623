//! Product service (v1)
//!
//! An in-memory product catalog served over HTTP/JSON, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                 PRODUCT SERVICE                  │
//!                      │                                                  │
//!   Client Request     │  ┌─────────┐    ┌──────────┐    ┌────────────┐   │
//!   ───────────────────┼─▶│  http   │───▶│ routing  │───▶│  handlers  │   │
//!                      │  │ server  │    │  table   │    │            │   │
//!                      │  └─────────┘    └──────────┘    └─────┬──────┘   │
//!                      │                                       │          │
//!                      │                                       ▼          │
//!   Client Response    │  ┌──────────┐                  ┌────────────┐    │
//!   ◀──────────────────┼──│ response │◀─────────────────│  catalog   │    │
//!                      │  │ (JSON)   │                  │   store    │    │
//!                      │  └──────────┘                  └────────────┘    │
//!                      │                                                  │
//!                      │  config · observability · lifecycle              │
//!                      └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use product_service::config::{self, loader, LogFormat, ServiceConfig};
use product_service::lifecycle;
use product_service::observability::logging;

#[derive(Parser)]
#[command(name = "product-service")]
#[command(about = "In-memory product catalog HTTP service", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long, env = "PRODUCT_SERVICE_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides `listener.bind_address`.
    #[arg(short, long, env = "PRODUCT_SERVICE_BIND")]
    bind: Option<String>,

    /// JSON seed file, overrides `store.seed_path`.
    #[arg(short, long, env = "PRODUCT_SERVICE_SEED")]
    seed: Option<PathBuf>,

    /// Log output format, overrides `observability.log_format`.
    #[arg(long, value_enum)]
    log_format: Option<LogFormatArg>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

impl Args {
    fn apply(self, config: &mut ServiceConfig) {
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(seed) = self.seed {
            config.store.seed_path = Some(seed);
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format.into();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => loader::read_config(path)?,
        None => ServiceConfig::default(),
    };
    args.apply(&mut config);
    config::validate_config(&config).map_err(config::ConfigError::Validation)?;

    logging::init_logging(&config.observability)?;

    tracing::info!("product-service v{} starting", env!("CARGO_PKG_VERSION"));

    lifecycle::run(config).await?;
    Ok(())
}
