//! HTTP/JSON gateway and the gRPC user service it fronts.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod rpc;
pub mod store;

pub use config::{GatewayConfig, ServiceConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use rpc::RpcServer;
pub use store::RecordStore;
