use std::path::PathBuf;

use clap::Parser;

use edge_router::config::load_config;
use edge_router::lifecycle::{self, signals, Shutdown};
use edge_router::observability;

#[derive(Parser)]
#[command(name = "edge-router")]
#[command(about = "Edge router proxying the news and exchange-rate APIs with CORS", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long, env = "EDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.bind)?;

    observability::init_logging(&config.logging);

    tracing::info!("edge-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        news = %config.upstreams.news.base_url,
        exchange_rate = %config.upstreams.exchange_rate.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    lifecycle::serve(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
