//! gRPC server for the user service.
//!
//! # Responsibilities
//! - Own the record store for the lifetime of the process
//! - Register the `UserService` implementation with tonic
//! - Register gRPC server reflection when configured
//! - Serve on a bound listener until the shutdown future resolves

use std::future::Future;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic_reflection::server::Builder as ReflectionBuilder;

use crate::config::ServiceConfig;
use crate::rpc::descriptor;
use crate::rpc::proto::user_service_server::UserServiceServer;
use crate::rpc::UserServiceImpl;
use crate::store::RecordStore;

/// Errors that stop the user service.
#[derive(Debug, thiserror::Error)]
pub enum RpcServerError {
    #[error("reflection setup failed: {0}")]
    Reflection(#[from] tonic_reflection::server::Error),

    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
}

/// The user service process: store plus RPC transport.
pub struct RpcServer {
    config: ServiceConfig,
    store: RecordStore,
}

impl RpcServer {
    /// Create a server with an empty store.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_store(config, RecordStore::new())
    }

    /// Create a server around an existing store.
    pub fn with_store(config: ServiceConfig, store: RecordStore) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Serve requests on `listener` until `shutdown` completes.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), RpcServerError>
    where
        F: Future<Output = ()> + Send,
    {
        let addr = listener.local_addr().ok();
        tracing::info!(
            address = ?addr,
            configured = %self.config.listener.bind_address,
            reflection = self.config.listener.reflection,
            "UserService gRPC server starting"
        );

        let service = UserServiceServer::new(UserServiceImpl::new(self.store));

        let reflection = if self.config.listener.reflection {
            Some(
                ReflectionBuilder::configure()
                    .register_file_descriptor_set(descriptor::file_descriptor_set())
                    .build_v1()?,
            )
        } else {
            None
        };

        Server::builder()
            .add_service(service)
            .add_optional_service(reflection)
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
            .await?;

        tracing::info!("UserService gRPC server stopped");
        Ok(())
    }
}
