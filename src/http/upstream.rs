//! Client side of the user service.
//!
//! # Responsibilities
//! - Hold the long-lived RPC channel to the user service
//! - Bound every call with its deadline (5s unary, 30s streaming by default)
//! - Drain the ListUsers stream into a single ordered `Vec`
//!
//! # Design Decisions
//! - The channel connects lazily; an unreachable service fails per call
//! - The deadline is both sent to the server and enforced locally
//! - A mid-stream failure discards everything received so far
//! - A stream message without a user is a stream failure

use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use tonic::Request;
use tracing::{debug, warn};

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::http::response::{GatewayError, Procedure};
use crate::resilience::with_deadline;
use crate::rpc::proto::user_service_client::UserServiceClient;
use crate::rpc::proto::{
    CreateUserRequest, CreateUserResponse, GetUserRequest, GetUserResponse, ListUsersRequest, User,
    UserResponse,
};

/// Handle to the remote user service, shared by all gateway requests.
#[derive(Debug, Clone)]
pub struct UserServiceHandle {
    client: UserServiceClient<Channel>,
    unary_deadline: Duration,
    stream_deadline: Duration,
}

impl UserServiceHandle {
    /// Build a handle over a lazily connected channel.
    pub fn connect_lazy(
        upstream: &UpstreamConfig,
        timeouts: &TimeoutConfig,
    ) -> Result<Self, tonic::transport::Error> {
        let channel = Endpoint::from_shared(upstream.address.clone())?
            .connect_timeout(Duration::from_millis(upstream.connect_timeout_ms))
            .connect_lazy();

        Ok(Self::new(
            UserServiceClient::new(channel),
            Duration::from_millis(timeouts.unary_ms),
            Duration::from_millis(timeouts.stream_ms),
        ))
    }

    pub fn new(
        client: UserServiceClient<Channel>,
        unary_deadline: Duration,
        stream_deadline: Duration,
    ) -> Self {
        Self {
            client,
            unary_deadline,
            stream_deadline,
        }
    }

    /// Invoke `CreateUser`.
    pub async fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<CreateUserResponse, GatewayError> {
        let mut client = self.client.clone();
        let deadline = self.unary_deadline;
        with_deadline(deadline, async move {
            let response = client
                .create_user(with_timeout(request, deadline))
                .await
                .map_err(|status| GatewayError::from_status(Procedure::CreateUser, status))?;
            Ok(response.into_inner())
        })
        .await
    }

    /// Invoke `GetUser`.
    pub async fn get_user(&self, id: String) -> Result<GetUserResponse, GatewayError> {
        let mut client = self.client.clone();
        let deadline = self.unary_deadline;
        with_deadline(deadline, async move {
            let response = client
                .get_user(with_timeout(GetUserRequest { id }, deadline))
                .await
                .map_err(|status| GatewayError::from_status(Procedure::GetUser, status))?;
            Ok(response.into_inner())
        })
        .await
    }

    /// Invoke `ListUsers` and collect the stream in receipt order.
    pub async fn list_users(&self, limit: i32) -> Result<Vec<User>, GatewayError> {
        let mut client = self.client.clone();
        let deadline = self.stream_deadline;
        with_deadline(deadline, async move {
            let mut stream = client
                .list_users(with_timeout(ListUsersRequest { limit }, deadline))
                .await
                .map_err(|status| GatewayError::from_status(Procedure::ListUsers, status))?
                .into_inner();

            let mut users = Vec::new();
            loop {
                match stream.message().await {
                    Ok(Some(UserResponse { user: Some(user) })) => {
                        debug!(user_id = %user.id, "Received user");
                        users.push(user);
                    }
                    Ok(Some(UserResponse { user: None })) => {
                        warn!(received = users.len(), "Stream message without a user");
                        return Err(GatewayError::Stream(
                            "stream message carried no user".to_string(),
                        ));
                    }
                    Ok(None) => break,
                    Err(status) => {
                        return Err(GatewayError::Stream(format!(
                            "{:?}: {}",
                            status.code(),
                            status.message()
                        )))
                    }
                }
            }
            Ok(users)
        })
        .await
    }
}

fn with_timeout<T>(message: T, deadline: Duration) -> Request<T> {
    let mut request = Request::new(message);
    request.set_timeout(deadline);
    request
}
