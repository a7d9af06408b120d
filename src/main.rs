use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use edge_relay::config::{resolve_config, ConfigOverrides};
use edge_relay::lifecycle::{wait_for_shutdown_signal, Shutdown};
use edge_relay::observability::{logging, metrics};
use edge_relay::HttpServer;

#[derive(Parser)]
#[command(name = "edge-relay")]
#[command(about = "Forward every HTTP request to one fixed upstream origin", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Upstream host[:port]; overrides upstream.host.
    #[arg(long, env = "UPSTREAM_HOST")]
    upstream_host: Option<String>,

    /// Listen address; overrides listener.bind_address.
    #[arg(long, env = "RELAY_BIND_ADDRESS")]
    bind: Option<String>,

    /// Upstream request timeout in seconds; overrides timeouts.request_secs.
    #[arg(long, env = "RELAY_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let overrides = ConfigOverrides {
        upstream_host: cli.upstream_host,
        bind_address: cli.bind,
        request_timeout_secs: cli.request_timeout_secs,
    };

    let config = match resolve_config(cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("edge-relay: {}", e);
            std::process::exit(2);
        }
    };

    logging::init_logging(&config.observability);

    tracing::info!("edge-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.host,
        request_timeout_secs = ?config.timeouts.request_secs,
        connect_timeout_secs = ?config.timeouts.connect_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(e) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    error = %e,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
