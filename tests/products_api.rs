//! End-to-end tests against a running product service.

use std::collections::HashSet;
use std::time::Duration;

use product_service::catalog::{Price, ProductId, ProductRecord};
use product_service::config::ServiceConfig;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

mod common;

#[tokio::test]
async fn test_get_all_products() {
    let service = common::start_seeded_service().await;
    let res = common::client()
        .get(service.url("/products"))
        .send()
        .await
        .expect("Service unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    let products: Vec<Value> = res.json().await.unwrap();
    assert_eq!(products.len(), 3);
}

#[tokio::test]
async fn test_get_one_product() {
    let service = common::start_seeded_service().await;
    let client = common::client();

    let res = client.get(service.url("/products/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let product: Value = res.json().await.unwrap();
    assert_eq!(product["name"], "Laptop");

    let res = client.get(service.url("/products/99")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let error: Value = res.json().await.unwrap();
    assert_eq!(error["error"], "Product not found");
}

#[tokio::test]
async fn test_invalid_endpoint() {
    let service = common::start_seeded_service().await;
    let client = common::client();

    let res = client.get(service.url("/invalid_path")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let error: Value = res.json().await.unwrap();
    assert_eq!(error, json!({"error": "Endpoint not found"}));

    let res = client.delete(service.url("/products")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_lifecycle() {
    let service = common::start_service(vec![(
        ProductId::from(1),
        ProductRecord::new("Laptop", Price::from(1200)),
    )])
    .await;
    let client = common::client();

    let res = client
        .post(service.url("/products"))
        .json(&json!({"name": "Mouse", "price": 25}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"id": "2", "name": "Mouse", "price": 25})
    );

    let res = client.get(service.url("/products/2")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"name": "Mouse", "price": 25}));

    let res = client
        .patch(service.url("/products/2"))
        .json(&json!({"price": 30}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"id": "2", "name": "Mouse", "price": 30})
    );

    let res = client
        .put(service.url("/products/2"))
        .json(&json!({"name": "Trackball", "price": 45.5}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"id": "2", "name": "Trackball", "price": 45.5})
    );

    let res = client.delete(service.url("/products/2")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"id": "2", "name": "Trackball", "price": 45.5})
    );

    let res = client.get(service.url("/products/2")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(service.store.len().await, 1);
}

#[tokio::test]
async fn test_invalid_payloads() {
    let service = common::start_seeded_service().await;
    let client = common::client();

    let res = client
        .post(service.url("/products"))
        .header("content-type", "application/json")
        .body("{invalid json}")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"error": "Invalid JSON payload"})
    );

    let res = client
        .post(service.url("/products"))
        .json(&json!({"price": -1}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"error": "Field 'name' is required and must be a non-empty string"})
    );

    let res = client
        .put(service.url("/products/1"))
        .json(&json!({"name": "Laptop"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client.get(service.url("/products/1")).send().await.unwrap();
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"name": "Laptop", "price": 1200})
    );
    assert_eq!(service.store.len().await, 3);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let service = common::start_seeded_service().await;
    let client = common::client();

    let res = client
        .get(service.url("/products"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me");

    let res = client.get(service.url("/products")).send().await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let service = common::start_service(Vec::new()).await;
    let client = common::client();

    let mut tasks = Vec::new();
    for i in 0..20 {
        let client = client.clone();
        let url = service.url("/products");
        tasks.push(tokio::spawn(async move {
            let res = client
                .post(url)
                .json(&json!({"name": format!("Item {i}"), "price": i}))
                .send()
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::CREATED);
            let body: Value = res.json().await.unwrap();
            body["id"].as_str().unwrap().to_string()
        }));
    }

    let mut ids = HashSet::new();
    for task in tasks {
        ids.insert(task.await.unwrap());
    }
    let expected: HashSet<String> = (1..=20).map(|i: u32| i.to_string()).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_stalled_body_times_out_with_json_error() {
    let mut config = ServiceConfig::default();
    config.timeouts.request_secs = 1;
    let service = common::start_service_with(config, Vec::new()).await;

    let mut stream = TcpStream::connect(service.addr).await.unwrap();
    let head = format!(
        "POST /products HTTP/1.1\r\nHost: {}\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n",
        service.addr
    );
    stream.write_all(head.as_bytes()).await.unwrap();
    stream.write_all(br#"{"name":"#).await.unwrap();

    let expected_body = r#"{"error":"Request timed out"}"#;
    let mut raw = Vec::new();
    let read = tokio::time::timeout(Duration::from_secs(10), async {
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            raw.extend_from_slice(&chunk[..n]);
            if n == 0 || String::from_utf8_lossy(&raw).ends_with(expected_body) {
                break;
            }
        }
    })
    .await;
    assert!(read.is_ok(), "no response before the client deadline");

    let response = String::from_utf8_lossy(&raw).to_ascii_lowercase();
    assert!(response.starts_with("http/1.1 408"), "{response}");
    assert!(response.contains("content-type: application/json"), "{response}");
    assert!(response.ends_with(&expected_body.to_ascii_lowercase()), "{response}");
    assert!(service.store.is_empty().await);
}
