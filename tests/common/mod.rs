//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

use contact_api::net::{Listener, ListenerError};
use contact_api::{HttpServer, ServiceConfig, Shutdown};

/// A server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), ListenerError>>,
}

/// Start a server with `config`, overriding the bind address to an ephemeral port.
pub async fn start_server(mut config: ServiceConfig) -> TestServer {
    config.listener.bind_address = "127.0.0.1:0".into();
    let listener = Listener::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let stop = shutdown.subscribe();
    let server = HttpServer::new(&config);
    let handle = tokio::spawn(async move { server.run(listener, stop).await });

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

/// A response as seen on the wire.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub head: String,
    pub body: String,
}

/// Send raw bytes and read until the server closes the connection.
pub async fn send_raw(addr: SocketAddr, raw: &[u8]) -> RawResponse {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw).await.unwrap();

    let mut bytes = Vec::new();
    stream.read_to_end(&mut bytes).await.unwrap();
    let text = String::from_utf8(bytes).unwrap();

    let (head, body) = text.split_once("\r\n\r\n").expect("response has a head");
    let status = head
        .split(' ')
        .nth(1)
        .and_then(|code| code.parse().ok())
        .expect("status line has a code");

    RawResponse {
        status,
        head: head.to_string(),
        body: body.to_string(),
    }
}

/// Send a request with an optional JSON body.
#[allow(dead_code)]
pub async fn request(
    addr: SocketAddr,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> RawResponse {
    let raw = match body {
        Some(body) => format!(
            "{} {} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            method,
            path,
            body.len(),
            body
        ),
        None => format!("{} {} HTTP/1.1\r\nHost: localhost\r\n\r\n", method, path),
    };
    send_raw(addr, raw.as_bytes()).await
}
