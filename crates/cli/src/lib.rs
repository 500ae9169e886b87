pub mod session;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use salescope_agent::{DateRangeResolver, GeminiClient, LlmClient, SalesAnalyst};
use salescope_core::{AppConfig, ConfigOverrides, LoadOptions, SystemClock};
use salescope_orders::{HttpOrderTransport, OrderService};

use crate::session::Session;

#[derive(Debug, Parser)]
#[command(
    name = "salescope",
    about = "Conversational sales-order analysis agent",
    long_about = "Ask natural-language questions about recent sales orders. Answers combine a \
                  cached pull from the order API with LLM-assisted date resolution and analysis.",
    after_help = "Examples:\n  salescope\n  salescope --log-level debug\n  salescope --config ./salescope.toml"
)]
pub struct Cli {
    #[arg(long, help = "Path to a salescope.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, help = "Log level override (trace|debug|info|warn|error)")]
    log_level: Option<String>,
    #[arg(long, help = "Order API endpoint override")]
    endpoint: Option<String>,
    #[arg(long, help = "Gemini model override")]
    model: Option<String>,
}

fn init_logging(config: &AppConfig) {
    use salescope_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load config and initialize logging before any other operations. A
    // missing API key fails here, before the loop ever starts.
    let config = AppConfig::load(LoadOptions {
        config_path: cli.config,
        overrides: ConfigOverrides {
            orders_endpoint: cli.endpoint,
            llm_model: cli.model,
            log_level: cli.log_level,
            ..ConfigOverrides::default()
        },
        ..LoadOptions::default()
    })?;
    init_logging(&config);

    let transport = Arc::new(HttpOrderTransport::new(config.orders.endpoint.clone()));
    let orders = OrderService::new(transport, Arc::new(SystemClock), config.orders.cache_ttl_secs);

    let llm: Arc<dyn LlmClient> = Arc::new(GeminiClient::from_config(&config.llm)?);
    let resolver = DateRangeResolver::new(Arc::clone(&llm));
    let analyst = SalesAnalyst::new(llm);

    Session::new(orders, resolver, analyst).run().await
}
