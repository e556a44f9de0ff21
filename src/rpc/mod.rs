//! RPC subsystem: the `user.UserService` procedures over gRPC.
//!
//! # Data Flow
//! ```text
//! gateway (tonic client)
//!     → server.rs (tonic transport, graceful shutdown)
//!     → service.rs (validation, store calls, error → status mapping)
//!     → store (RecordStore)
//! ```
//!
//! # Design Decisions
//! - Store errors map to distinct status codes (INVALID_ARGUMENT, NOT_FOUND)
//! - ListUsers streams one message per record from a held read snapshot
//! - No retries inside the handler

pub mod descriptor;
pub mod proto;
pub mod server;
pub mod service;

pub use server::{RpcServer, RpcServerError};
pub use service::UserServiceImpl;
