//! reqwest-backed transport
//!
//! One `POST` per submission with a JSON body. No retries; no timeout unless
//! one is configured.

use crate::error::ClientError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use scenario_core::{AnalysisRequest, AnalysisResult, AnalysisTransport, ClientConfig, SubmitError};
use std::time::Duration;

/// HTTP transport for the analysis endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Shared connection pool
    client: Client,
    /// Fixed analysis endpoint
    endpoint: Url,
}

impl HttpTransport {
    /// Create transport from client configuration
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let endpoint = parse_endpoint(&config.endpoint)?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, endpoint })
    }

    /// Endpoint requests are sent to
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisTransport for HttpTransport {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, SubmitError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            constraints = request.constraints.len(),
            "sending analysis request"
        );

        // `json` also sets `Content-Type: application/json`.
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| SubmitError::transport(describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "analysis service returned an error status");
            return Err(SubmitError::status(status.as_u16(), reason_phrase(status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SubmitError::transport(describe(&e)))?;

        serde_json::from_slice::<AnalysisResult>(&body)
            .map_err(|e| SubmitError::malformed(format!("invalid analysis response: {e}")))
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

/// Reason phrase for a status, falling back to the numeric code
fn reason_phrase(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_u16().to_string(), str::to_string)
}

/// Error message including its source chain
fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
