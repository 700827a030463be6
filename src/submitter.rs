use std::io::Write;

use crate::canonical::to_canonical_json;
use crate::config::Config;
use crate::error::SubmitError;
use crate::payload::{Clock, SubmissionPayload};
use crate::signer::sign;
use crate::transport::{HttpResponse, Transport};

pub const SIGNATURE_HEADER: &str = "X-Signature-256";

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

pub struct Submitter<T: Transport> {
    transport: T,
    endpoint: String,
}

impl<T: Transport> Submitter<T> {
    pub fn new(transport: T, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// POST the signed body once and classify the outcome. Only 2xx counts as success.
    pub async fn submit(&self, body: &[u8], signature: &str) -> Result<HttpResponse, SubmitError> {
        let headers = [
            ("Content-Type", "application/json"),
            (SIGNATURE_HEADER, signature),
        ];

        tracing::debug!("POST {} ({} bytes)", self.endpoint, body.len());

        let resp = self
            .transport
            .post(&self.endpoint, &headers, body.to_vec())
            .await
            .map_err(|e| SubmitError::Transport { reason: e.reason })?;

        if (200..300).contains(&resp.status) {
            Ok(resp)
        } else {
            Err(SubmitError::Http {
                status: resp.status,
                body: resp.body,
            })
        }
    }

    /// Build, sign, send and report. Returns the process exit code.
    pub async fn run(
        &self,
        config: &Config,
        clock: &dyn Clock,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> u8 {
        let payload = SubmissionPayload::build(&config.applicant, clock);

        let body = match to_canonical_json(&payload) {
            Ok(body) => body,
            Err(e) => {
                tracing::info!("Payload serialization failed");
                let _ = writeln!(err, "Serialization Error: {e}");
                return EXIT_FAILURE;
            }
        };
        let signature = sign(&body, &config.signing_secret);

        let _ = writeln!(out, "Payload: {}", String::from_utf8_lossy(&body));
        let _ = writeln!(out, "Signature: {signature}");

        match self.submit(&body, &signature).await {
            Ok(resp) => {
                tracing::info!("Submission accepted with status {}", resp.status);
                let _ = writeln!(out, "Status: {}", resp.status);
                let _ = writeln!(out, "Response: {}", resp.body);
                EXIT_SUCCESS
            }
            Err(e) => {
                match &e {
                    SubmitError::Http { status, .. } => {
                        tracing::info!("Submission rejected with status {status}");
                    }
                    SubmitError::Transport { .. } => {
                        tracing::info!("Submission failed before a response arrived");
                    }
                }
                let _ = writeln!(err, "{e}");
                EXIT_FAILURE
            }
        }
    }
}
