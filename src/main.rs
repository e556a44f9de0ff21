//! HTTP/JSON gateway for the user service.
//!
//! # Architecture Overview
//!
//! ```text
//!     HTTP client                 user-gateway                       user-service
//!     ───────────        ┌─────────────────────────────┐      ┌──────────────────────┐
//!     POST /users/create │  http::server (axum)         │      │  rpc::server (tonic) │
//!     GET  /users/get  ──┼─▶ handlers: decode JSON/query │ gRPC │  rpc::service        │
//!     GET  /users/list   │  upstream: deadline + drain ──┼─────▶│  store::RecordStore  │
//!     ◀── one JSON doc ──┼─ response: status mapping     │      │  (RwLock<HashMap>)   │
//!                        └─────────────────────────────┘      └──────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use user_gateway::config::{load_or_default, GatewayConfig};
use user_gateway::lifecycle::shutdown_signal;
use user_gateway::observability::{logging, metrics};
use user_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "user-gateway")]
#[command(about = "HTTP/JSON gateway in front of the gRPC user service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config: GatewayConfig = load_or_default(args.config.as_deref())?;

    logging::init(&config.observability, "user_gateway=debug,tower_http=debug");

    tracing::info!("user-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        unary_deadline_ms = config.timeouts.unary_ms,
        stream_deadline_ms = config.timeouts.stream_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
