//! End-to-end tests over real TCP connections.

use contact_api::ServiceConfig;

mod common;

use common::{request, send_raw, start_server};

const JOHN: &str = r#"{"name":"John","email":"j@x.com","phone":"555-0100"}"#;

#[tokio::test]
async fn create_fetch_update_delete_lifecycle() {
    let server = start_server(ServiceConfig::default()).await;
    let addr = server.addr;

    let created = request(addr, "POST", "/contacts", Some(JOHN)).await;
    assert_eq!(created.status, 201);
    assert_eq!(
        created.body,
        r#"{"id":1,"name":"John","email":"j@x.com","phone":"555-0100"}"#
    );

    let missing = request(addr, "GET", "/contacts/2", None).await;
    assert_eq!(missing.status, 404);
    assert_eq!(missing.body, r#"{"error":"Contact not found"}"#);

    let bad_update = request(addr, "PUT", "/contacts/1", Some(r#"{"name":"J","phone":"1"}"#)).await;
    assert_eq!(bad_update.status, 400);
    assert_eq!(bad_update.body, r#"{"error":"Missing or invalid fields"}"#);

    let deleted = request(addr, "DELETE", "/contacts/1", None).await;
    assert_eq!(deleted.status, 204);
    assert!(deleted.body.is_empty());
    assert!(deleted.head.contains("Content-Length: 0"));

    let listed = request(addr, "GET", "/contacts", None).await;
    assert_eq!(listed.status, 200);
    assert_eq!(listed.body, "[]");

    server.shutdown.trigger();
    server.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn response_headers_are_exact() {
    let server = start_server(ServiceConfig::default()).await;

    let created = request(server.addr, "POST", "/contacts", Some(JOHN)).await;
    let length = format!("Content-Length: {}", created.body.len());
    let lines: Vec<_> = created.head.split("\r\n").collect();
    assert_eq!(
        lines,
        [
            "HTTP/1.1 201 Created",
            "Content-Type: application/json",
            length.as_str(),
            "Connection: close",
        ]
    );

    server.shutdown.trigger();
}

#[tokio::test]
async fn unsupported_method_and_unknown_path() {
    let server = start_server(ServiceConfig::default()).await;

    let patch = request(server.addr, "PATCH", "/contacts/1", None).await;
    assert_eq!(patch.status, 405);
    assert!(patch.head.starts_with("HTTP/1.1 405 Method Not Allowed"));

    let unknown = request(server.addr, "GET", "/unknown", None).await;
    assert_eq!(unknown.status, 404);
    assert_eq!(unknown.body, r#"{"error":"Not found"}"#);

    server.shutdown.trigger();
}

#[tokio::test]
async fn content_length_at_capacity_is_rejected() {
    let server = start_server(ServiceConfig::default()).await;

    let raw = b"POST /contacts HTTP/1.1\r\nContent-Length: 16384\r\n\r\n";
    let response = send_raw(server.addr, raw).await;
    assert_eq!(response.status, 413);
    assert_eq!(response.body, r#"{"error":"Payload too large"}"#);

    // Below the framing limit but above the body limit: rejected by the handler.
    let body = " ".repeat(4096);
    let response = request(server.addr, "POST", "/contacts", Some(&body)).await;
    assert_eq!(response.status, 400);
    assert_eq!(response.body, r#"{"error":"Invalid request body"}"#);

    server.shutdown.trigger();
}

#[tokio::test]
async fn malformed_requests_get_400() {
    let server = start_server(ServiceConfig::default()).await;

    let response = send_raw(server.addr, b"NOPE\r\n\r\n").await;
    assert_eq!(response.status, 400);
    assert_eq!(response.body, r#"{"error":"Invalid request line"}"#);

    server.shutdown.trigger();
}

#[tokio::test]
async fn server_survives_dropped_connections() {
    let server = start_server(ServiceConfig::default()).await;

    {
        let stream = tokio::net::TcpStream::connect(server.addr).await.unwrap();
        drop(stream);
    }

    let response = request(server.addr, "GET", "/contacts", None).await;
    assert_eq!(response.status, 200);

    server.shutdown.trigger();
}

#[tokio::test]
async fn full_store_is_conflict() {
    let mut config = ServiceConfig::default();
    config.store.capacity = 2;
    let server = start_server(config).await;

    for expected_id in 1..=2 {
        let response = request(server.addr, "POST", "/contacts", Some(JOHN)).await;
        assert_eq!(response.status, 201);
        assert!(response.body.starts_with(&format!("{{\"id\":{},", expected_id)));
    }
    let response = request(server.addr, "POST", "/contacts", Some(JOHN)).await;
    assert_eq!(response.status, 409);
    assert_eq!(response.body, r#"{"error":"Contact list is full"}"#);

    server.shutdown.trigger();
}

#[tokio::test]
async fn repeated_reads_are_byte_identical() {
    let server = start_server(ServiceConfig::default()).await;
    request(server.addr, "POST", "/contacts", Some(JOHN)).await;

    let first = request(server.addr, "GET", "/contacts/1", None).await;
    let second = request(server.addr, "GET", "/contacts/1", None).await;
    assert_eq!(first.status, 200);
    assert_eq!(first.head, second.head);
    assert_eq!(first.body, second.body);

    server.shutdown.trigger();
}

#[tokio::test]
async fn escaped_fields_survive_a_compliant_client() {
    let server = start_server(ServiceConfig::default()).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let url = format!("http://{}/contacts", server.addr);
    let name = "Ann \"Q\" \\ Lee\nJr";

    let created: serde_json::Value = client
        .post(&url)
        .json(&serde_json::json!({ "name": name, "email": "a@x.com", "phone": "1" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], name);

    let listed: serde_json::Value = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["name"], name);

    server.shutdown.trigger();
}
