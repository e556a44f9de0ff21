//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (deadlines > 0, list limit > 0)
//! - Keep the outer request timeout longer than every call deadline
//! - Check that addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function of the config
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::{GatewayConfig, ObservabilityConfig, ServiceConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Semantic checks for a configuration root.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<ValidationError>>;
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        check_socket_addr(&mut errors, "listener.bind_address", &self.listener.bind_address);
        if self.listener.max_body_size == 0 {
            errors.push(ValidationError::new("listener.max_body_size", "must be greater than 0"));
        }

        let address = &self.upstream.address;
        if !(address.starts_with("http://") || address.starts_with("https://")) {
            errors.push(ValidationError::new(
                "upstream.address",
                format!("'{}' must be an http:// or https:// URI", address),
            ));
        } else if address.parse::<axum::http::Uri>().is_err() {
            errors.push(ValidationError::new(
                "upstream.address",
                format!("'{}' is not a valid URI", address),
            ));
        }

        if self.timeouts.unary_ms == 0 {
            errors.push(ValidationError::new("timeouts.unary_ms", "must be greater than 0"));
        }
        if self.timeouts.stream_ms == 0 {
            errors.push(ValidationError::new("timeouts.stream_ms", "must be greater than 0"));
        }
        if self.timeouts.request_secs == 0 {
            errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
        } else {
            let longest_call_ms = self.timeouts.unary_ms.max(self.timeouts.stream_ms);
            if self.timeouts.request_secs.saturating_mul(1000) <= longest_call_ms {
                errors.push(ValidationError::new(
                    "timeouts.request_secs",
                    format!(
                        "must exceed the longest call deadline ({}ms)",
                        longest_call_ms
                    ),
                ));
            }
        }
        if self.list.limit <= 0 {
            errors.push(ValidationError::new("list.limit", "must be greater than 0"));
        }

        check_observability(&mut errors, &self.observability);
        finish(errors)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        check_socket_addr(&mut errors, "listener.bind_address", &self.listener.bind_address);
        check_observability(&mut errors, &self.observability);
        finish(errors)
    }
}

fn check_socket_addr(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            field,
            format!("'{}' is not a valid socket address", value),
        ));
    }
}

fn check_observability(errors: &mut Vec<ValidationError>, config: &ObservabilityConfig) {
    if config.log_level.trim().is_empty() {
        errors.push(ValidationError::new("observability.log_level", "must not be empty"));
    }
    if config.metrics_enabled {
        check_socket_addr(errors, "observability.metrics_address", &config.metrics_address);
    }
}

fn finish(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
