//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing sources
//! to be tested with mock implementations.

use std::io;
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

/// HTTP abstraction for remote datasets.
pub trait HttpClient: Send + Sync {
    /// GET `url` and decode the body as JSON.
    fn get_json(&self, url: &str) -> io::Result<Value>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Blocking reqwest client.
#[derive(Debug, Clone)]
pub struct RealHttpClient {
    client: Client,
}

impl RealHttpClient {
    pub fn new(timeout: Duration) -> io::Result<Self> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(io::Error::other)?;
        Ok(Self { client })
    }
}

impl HttpClient for RealHttpClient {
    fn get_json(&self, url: &str) -> io::Result<Value> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(io::Error::other)?;
        response.json::<Value>().map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, e)
        })
    }
}
