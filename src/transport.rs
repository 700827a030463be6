use std::error::Error;
use std::time::Duration;

use async_trait::async_trait;

/// Any HTTP response, regardless of status.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The request never produced a readable HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportFailure {
    pub reason: String,
}

impl From<String> for TransportFailure {
    fn from(reason: String) -> Self {
        TransportFailure { reason }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> Result<HttpResponse, TransportFailure>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> Result<HttpResponse, TransportFailure> {
        let mut req = self.client.post(url);
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let resp = req
            .body(body)
            .send()
            .await
            .map_err(|e| TransportFailure::from(describe(&e)))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportFailure::from(format!("Failed to read response body: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}

// reqwest's top-level message is generic ("error sending request"); append the
// underlying causes so "connection refused" and friends reach the user.
fn describe(err: &reqwest::Error) -> String {
    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    reason
}
