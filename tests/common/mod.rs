//! Shared utilities for integration testing.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use pubmed_relay::config::RelayConfig;
use pubmed_relay::lifecycle::{self, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const TEST_KEY: &str = "test-key";

/// Canned reply served by the mock upstream.
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: &'static str,
    pub delay: Duration,
}

impl Reply {
    pub fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            content_type: "text/xml; charset=UTF-8",
            body,
            delay: Duration::ZERO,
        }
    }
}

/// Mock efetch server recording every request target it sees.
pub struct MockUpstream {
    pub addr: SocketAddr,
    targets: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    pub fn url(&self) -> String {
        format!("http://{}/entrez/eutils/efetch.fcgi", self.addr)
    }

    /// Query string of the most recent request.
    pub fn last_query(&self) -> Option<String> {
        let targets = self.targets.lock().unwrap();
        targets.last().map(|t| t.split_once('?').map(|(_, q)| q.to_string()).unwrap_or_default())
    }

    pub fn hits(&self) -> usize {
        self.targets.lock().unwrap().len()
    }
}

/// Start a mock upstream on an ephemeral port that always sends `reply`.
pub async fn start_upstream(reply: Reply) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let targets = Arc::new(Mutex::new(Vec::new()));
    let recorded = targets.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let reply = reply.clone();
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            }
                        }

                        let head = String::from_utf8_lossy(&buf);
                        if let Some(target) = head.lines().next().and_then(|l| l.split(' ').nth(1)) {
                            recorded.lock().unwrap().push(target.to_string());
                        }

                        tokio::time::sleep(reply.delay).await;

                        let reason = StatusCode::from_u16(reply.status)
                            .ok()
                            .and_then(|s| s.canonical_reason())
                            .unwrap_or("Unknown");
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            reply.status,
                            reason,
                            reply.content_type,
                            reply.body.len(),
                            reply.body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockUpstream { addr, targets }
}

/// Address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn relay_config(upstream_url: String) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = upstream_url;
    config
}

/// Start the relay on an ephemeral port. Drop-in for the real binary.
pub async fn start_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let server = lifecycle::prepare(config, Some(TEST_KEY.to_string())).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
