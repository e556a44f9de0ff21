//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the gateway routes
//! - Reject wrong methods on known paths with 405
//! - Wire up middleware (request ID, tracing, metrics, body limit, timeout)
//! - Hold the shared user service handle
//! - Serve until the shutdown future resolves

use axum::{
    extract::{DefaultBodyLimit, MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::handlers::{create_user, get_user, health, list_users, method_not_allowed};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::upstream::UserServiceHandle;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: UserServiceHandle,
    pub list_limit: i32,
}

/// HTTP/JSON gateway in front of the user service.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server with a lazily connected upstream channel.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: GatewayConfig) -> Result<Self, tonic::transport::Error> {
        let users = UserServiceHandle::connect_lazy(&config.upstream, &config.timeouts)?;
        Ok(Self::with_upstream(config, users))
    }

    /// Create a server around an existing upstream handle.
    pub fn with_upstream(config: GatewayConfig, users: UserServiceHandle) -> Self {
        let state = AppState {
            users,
            list_limit: config.list.limit,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/users/create", post(create_user).fallback(method_not_allowed))
            .route("/users/get", get(get_user).fallback(method_not_allowed))
            .route("/users/list", get(list_users).fallback(method_not_allowed))
            .route("/health", get(health).fallback(method_not_allowed))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// The configured router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            "HTTP gateway starting"
        );
        tracing::info!("  POST /users/create");
        tracing::info!("  GET  /users/get?id=...");
        tracing::info!("  GET  /users/list");
        tracing::info!("  GET  /health");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP gateway stopped");
        Ok(())
    }
}

/// Record count and latency per matched route.
async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;
    metrics::record_request(&route, response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    fn test_server() -> HttpServer {
        let mut config = GatewayConfig::default();
        // Nothing listens here; these tests never reach the upstream.
        config.upstream.address = "http://127.0.0.1:1".to_string();
        HttpServer::new(config).unwrap()
    }

    async fn send(router: Router, method: Method, uri: &str, body: &'static str) -> (StatusCode, String) {
        let request = axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(test_server().router(), Method::GET, "/health", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let router = test_server().router();
        for (method, uri) in [
            (Method::GET, "/users/create"),
            (Method::POST, "/users/get"),
            (Method::DELETE, "/users/list"),
            (Method::PUT, "/health"),
        ] {
            let (status, body) = send(router.clone(), method, uri, "").await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
            assert_eq!(body, "Method not allowed");
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let (status, _) = send(test_server().router(), Method::POST, "/users/create", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_negative_age_is_400() {
        let (status, _) = send(
            test_server().router(),
            Method::POST,
            "/users/create",
            r#"{"name":"Ann","email":"ann@x.com","age":-1}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_id_is_400() {
        let router = test_server().router();
        let (status, body) = send(router.clone(), Method::GET, "/users/get", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "id parameter required");

        let (status, _) = send(router, Method::GET, "/users/get?id=", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_request_id_echoed() {
        let request = axum::http::Request::builder()
            .uri("/health")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap();
        let response = test_server().router().oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "req-42");

        let request = axum::http::Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = test_server().router().oneshot(request).await.unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_500() {
        let (status, body) = send(test_server().router(), Method::GET, "/users/list", "").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.is_empty());
    }
}
