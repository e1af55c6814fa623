//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use product_service::catalog::{seed, ProductId, ProductRecord};
use product_service::config::ServiceConfig;
use product_service::{HttpServer, ProductStore, Shutdown};
use tokio::net::TcpListener;

/// A running service bound to an ephemeral local port.
pub struct TestService {
    pub addr: SocketAddr,
    pub store: Arc<ProductStore>,
    pub shutdown: Shutdown,
}

impl TestService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the service over the given products.
pub async fn start_service(products: Vec<(ProductId, ProductRecord)>) -> TestService {
    start_service_with(ServiceConfig::default(), products).await
}

/// Start the service with a custom config; the bind address is always ephemeral.
pub async fn start_service_with(
    mut config: ServiceConfig,
    products: Vec<(ProductId, ProductRecord)>,
) -> TestService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let store = Arc::new(ProductStore::with_products(products));
    let server = HttpServer::new(config, store.clone());
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // The listener is already bound; give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestService {
        addr,
        store,
        shutdown,
    }
}

/// Start the service with the built-in sample catalog.
#[allow(dead_code)]
pub async fn start_seeded_service() -> TestService {
    start_service(seed::default_products()).await
}

/// Client that never reuses connections across tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
