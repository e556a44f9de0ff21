//! HTTP gateway subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP request
//!     → server.rs (Axum router, method check, middleware)
//!     → request.rs (request ID)
//!     → handlers.rs (decode JSON body / query string)
//!     → upstream.rs (deadline-bounded RPC, stream aggregation)
//!     → response.rs (error → status mapping)
//!     → JSON or plain-text response to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;
pub mod upstream;

pub use request::X_REQUEST_ID;
pub use response::{GatewayError, Procedure};
pub use server::{AppState, HttpServer};
pub use upstream::UserServiceHandle;
