//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use apex2www::http::ServeError;
use apex2www::net::Listener;
use apex2www::{Config, RedirectServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

/// A redirector running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<Result<(), ServeError>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a plain HTTP redirector with `config`.
pub async fn start_server(config: Config) -> TestServer {
    let listener = Listener::bind_addr("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();

    let server = RedirectServer::new(config, shutdown.clone());
    let task = tokio::spawn(server.serve(listener));

    TestServer {
        addr,
        shutdown,
        task,
    }
}

/// Configuration used by most scenarios.
#[allow(dead_code)]
pub fn scenario_config() -> Config {
    Config {
        port: 8080,
        halt: Some("s3cr3t".to_string()),
        ..Config::default()
    }
}

/// HTTP client that never follows redirects or reuses connections.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Send raw bytes and read until the server closes the connection.
#[allow(dead_code)]
pub async fn raw_request(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .expect("server did not close the connection")
        .unwrap();
    String::from_utf8_lossy(&response).into_owned()
}
