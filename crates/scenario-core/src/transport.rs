//! Transport seam between the controller and the analysis service

use crate::error::SubmitError;
use crate::types::{AnalysisRequest, AnalysisResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Sends one analysis request and waits for its outcome
///
/// Implementations must not retry and must resolve exactly once: either the
/// decoded result or a [`SubmitError`] describing why there is none.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// Submit the payload to the service
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, SubmitError>;
}

#[async_trait]
impl<T: AnalysisTransport + ?Sized> AnalysisTransport for Arc<T> {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, SubmitError> {
        (**self).analyze(request).await
    }
}
