use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A completed HTTP exchange, whatever the status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookReply {
    pub status: u16,
    pub body: String,
}

/// Posts a JSON document to a webhook url.
///
/// `Err` is reserved for transport failures (dns, connect, timeout, io). A response with
/// any status code is an `Ok`.
pub trait WebhookTransport: Send + Sync {
    fn post_json(&self, url: &str, body: String) -> Result<WebhookReply>;
}

/// Blocking reqwest client, built once and shared by every delivery.
///
/// Only connection establishment is bounded. A slow robot that eventually answers is still a
/// completed exchange, callers wanting an overall deadline enforce it themselves.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            // reqwest's blocking client defaults to a 30 s total timeout
            .timeout(None::<Duration>)
            .build()
            .context("Failed to build http client")?;

        Ok(Self { client })
    }
}

impl WebhookTransport for HttpTransport {
    fn post_json(&self, url: &str, body: String) -> Result<WebhookReply> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .context("Failed to read webhook response body")?;

        Ok(WebhookReply { status, body })
    }
}
