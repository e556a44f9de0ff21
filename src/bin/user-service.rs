//! gRPC user service: owns the in-memory record store.

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use user_gateway::config::{load_or_default, ServiceConfig};
use user_gateway::lifecycle::shutdown_signal;
use user_gateway::observability::{logging, metrics};
use user_gateway::RpcServer;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "gRPC service owning the user record store", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config: ServiceConfig = load_or_default(args.config.as_deref())?;

    logging::init(&config.observability, "user_gateway=debug");

    tracing::info!("user-service v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for gRPC connections");

    RpcServer::new(config).run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
