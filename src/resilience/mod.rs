//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to the user service:
//!     → timeouts.rs (hard deadline around the whole call, stream drain included)
//! ```
//!
//! # Design Decisions
//! - Every remote call has a deadline; expiry is a failure, never a hang
//! - No retries anywhere; callers surface failures as-is

pub mod timeouts;

pub use timeouts::with_deadline;
