//! Core types for the analysis client
//!
//! Defines:
//! - Client configuration
//! - The outbound request payload
//! - The structured analysis result returned by the service
//! - Submission identifiers

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/analyze-scenario";

/// Unique submission identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub Ulid);

impl SubmissionId {
    /// Generate new submission ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Full URL of the analysis endpoint
    pub endpoint: String,
    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With endpoint URL
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

/// Outbound payload: `{ "scenario": ..., "constraints": [...] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Scenario text, unchanged from the form
    pub scenario: String,
    /// Non-blank constraints in display order
    pub constraints: Vec<String>,
}

/// Structured analysis returned by the service
///
/// Every string may carry Markdown. Field names on the wire are camelCase and
/// all of them are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Short restatement of the scenario
    pub scenario_summary: String,
    /// Risks worth watching
    pub potential_pitfalls: Vec<String>,
    /// Suggested courses of action
    pub proposed_strategies: Vec<String>,
    /// Further reading or tooling
    pub recommended_resources: Vec<String>,
    /// Caveat about the analysis
    pub disclaimer: String,
}
