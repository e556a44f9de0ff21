//! Deadline enforcement.
//!
//! # Responsibilities
//! - Wrap remote calls with a hard deadline
//! - Drop (and thereby cancel) the wrapped future on expiry
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Expiry is reported as its own error variant

use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

use crate::http::response::GatewayError;

/// Run `fut` to completion or fail with [`GatewayError::DeadlineExceeded`].
///
/// On expiry the future is dropped, which closes any open RPC stream.
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, GatewayError>>,
{
    match timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(GatewayError::DeadlineExceeded(deadline)),
    }
}
