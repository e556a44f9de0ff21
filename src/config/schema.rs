//! Configuration schema definitions.
//!
//! This module defines the configuration for both processes: the HTTP
//! gateway and the user service. All types derive Serde traits for
//! deserialization from TOML files and every field has a default.

use serde::{Deserialize, Serialize};

/// Root configuration for the HTTP gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP listener settings.
    pub listener: ListenerConfig,

    /// Remote user service connection.
    pub upstream: UpstreamConfig,

    /// Deadlines for remote calls.
    pub timeouts: TimeoutConfig,

    /// List route settings.
    pub list: ListConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Root configuration for the user service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// gRPC listener settings.
    pub listener: ServiceListenerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listener: ServiceListenerConfig::default(),
            observability: ObservabilityConfig {
                metrics_address: "0.0.0.0:9091".to_string(),
                ..ObservabilityConfig::default()
            },
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// gRPC listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceListenerConfig {
    /// Bind address (e.g., "0.0.0.0:50051").
    pub bind_address: String,

    /// Serve gRPC server reflection alongside the user service.
    pub reflection: bool,
}

impl Default for ServiceListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:50051".to_string(),
            reflection: true,
        }
    }
}

/// Remote user service endpoint.
///
/// Fixed for the lifetime of the gateway process.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Service URI (e.g., "http://127.0.0.1:50051").
    pub address: String,

    /// Connection establishment timeout in milliseconds.
    pub connect_timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:50051".to_string(),
            connect_timeout_ms: 5000,
        }
    }
}

/// Deadlines applied by the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for single-record calls in milliseconds.
    pub unary_ms: u64,

    /// Deadline for the list call, including draining the stream, in milliseconds.
    pub stream_ms: u64,

    /// Outer limit on total HTTP request handling in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            unary_ms: 5_000,
            stream_ms: 30_000,
            request_secs: 60,
        }
    }
}

/// List route configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListConfig {
    /// Maximum records requested from the service per list call.
    pub limit: i32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
