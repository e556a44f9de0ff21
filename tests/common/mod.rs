//! Shared helpers for integration tests.
//!
//! Everything binds `127.0.0.1:0`, so tests can run in parallel.

#![allow(dead_code)]

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

use user_gateway::config::{GatewayConfig, ServiceConfig};
use user_gateway::rpc::proto::user_service_server::{UserService, UserServiceServer};
use user_gateway::{HttpServer, RecordStore, RpcServer, Shutdown};

/// A running service + gateway pair.
pub struct TestStack {
    pub gateway_url: String,
    pub service_addr: SocketAddr,
    pub store: RecordStore,
    pub shutdown: Shutdown,
}

impl Drop for TestStack {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Gateway config pointing at `upstream`, listening on an ephemeral port.
pub fn gateway_config(upstream: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.address = format!("http://{}", upstream);
    config
}

/// Start the real user service around `store`.
pub async fn start_service(store: RecordStore, shutdown: &Shutdown) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = RpcServer::with_store(ServiceConfig::default(), store);
    let signal = shutdown.wait();
    tokio::spawn(async move {
        server.run(listener, signal).await.unwrap();
    });

    addr
}

/// Start an arbitrary `UserService` implementation.
pub async fn start_custom_service<S: UserService>(service: S, shutdown: &Shutdown) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let signal = shutdown.wait();
    tokio::spawn(async move {
        Server::builder()
            .add_service(UserServiceServer::new(service))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), signal)
            .await
            .unwrap();
    });

    addr
}

/// Start the gateway and return its base URL.
pub async fn start_gateway(config: GatewayConfig, shutdown: &Shutdown) -> String {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).unwrap();
    let signal = shutdown.wait();
    tokio::spawn(async move {
        server.run(listener, signal).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Start the real service and a gateway in front of it.
pub async fn start_stack() -> TestStack {
    let shutdown = Shutdown::new();
    let store = RecordStore::new();
    let service_addr = start_service(store.clone(), &shutdown).await;
    let gateway_url = start_gateway(gateway_config(service_addr), &shutdown).await;

    TestStack {
        gateway_url,
        service_addr,
        store,
        shutdown,
    }
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
