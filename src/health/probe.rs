// ABOUTME: HTTP/1.1 health probe over a plain TCP connection.
// ABOUTME: Any 2xx response counts as healthy; the body is never inspected.

use async_trait::async_trait;
use hyper::StatusCode;
use hyper_util::rt::TokioIo;
use std::time::Duration;
use tokio::net::TcpStream;

use super::HealthProbe;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("connect failed: {0}")]
    Connect(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] hyper::Error),

    #[error("failed to build request: {0}")]
    Request(#[from] hyper::http::Error),

    #[error("no response within {0:?}")]
    Timeout(Duration),
}

/// Issues unauthenticated GET requests to `http://<host>:<port><path>`.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    host: String,
    timeout: Duration,
}

impl HttpProbe {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(host: impl Into<String>, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            timeout,
        }
    }

    /// GET `path` and return the response status.
    pub async fn get(&self, port: u16, path: &str) -> Result<StatusCode, ProbeError> {
        tokio::time::timeout(self.timeout, self.request(port, path))
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))?
    }

    async fn request(&self, port: u16, path: &str) -> Result<StatusCode, ProbeError> {
        let stream = TcpStream::connect((self.host.as_str(), port)).await?;
        let io = TokioIo::new(stream);

        let (mut sender, conn) = hyper::client::conn::http1::handshake(io).await?;

        // Spawn connection handler
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!("health probe connection error: {}", e);
            }
        });

        let req = hyper::Request::builder()
            .method("GET")
            .uri(path)
            .header("Host", format!("{}:{}", self.host, port))
            .body(http_body_util::Empty::<bytes::Bytes>::new())?;

        let resp = sender.send_request(req).await?;
        Ok(resp.status())
    }
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new("localhost", Self::DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl HealthProbe for HttpProbe {
    async fn probe(&self, port: u16, path: &str) -> bool {
        match self.get(port, path).await {
            Ok(status) => {
                tracing::debug!("GET {}:{}{} -> {}", self.host, port, path, status);
                status.is_success()
            }
            Err(e) => {
                tracing::debug!("GET {}:{}{} failed: {}", self.host, port, path, e);
                false
            }
        }
    }
}
