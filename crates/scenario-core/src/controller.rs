//! Request lifecycle controller
//!
//! Owns the [`SubmissionState`] and enforces the one-request-at-a-time rule:
//! - [`RequestController::begin_submit`] moves to `Loading` and hands back the
//!   payload to send, or `None` if a request is already outstanding
//! - [`RequestController::settle`] records the outcome of that request
//! - [`RequestController::submit`] does both around a transport call
//!
//! The split lets an event loop keep processing input while the request is
//! pending and still have duplicate submissions suppressed.

use crate::constraints::ScenarioInput;
use crate::error::{StateError, SubmitError};
use crate::state::{validate_transition, Phase, SubmissionState};
use crate::transport::AnalysisTransport;
use crate::types::{AnalysisRequest, AnalysisResult, SubmissionId};

/// Failure message recorded by [`RequestController::abandon`]
pub const ABANDONED_MESSAGE: &str = "analysis request was abandoned";

/// Drives submissions through the lifecycle state machine
#[derive(Debug, Default)]
pub struct RequestController {
    /// Current lifecycle state
    state: SubmissionState,
    /// Submission currently in flight
    in_flight: Option<SubmissionId>,
    /// Requests handed out so far
    requests_issued: u64,
}

impl RequestController {
    /// Create controller in the `Idle` state
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Check if a request is outstanding
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Number of requests issued over the controller's lifetime
    #[inline]
    #[must_use]
    pub fn requests_issued(&self) -> u64 {
        self.requests_issued
    }

    /// Submission currently in flight
    #[inline]
    #[must_use]
    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    /// Start a submission
    ///
    /// Clears any previous result or error, enters `Loading` and returns the
    /// payload to send. Returns `None` without touching anything while
    /// another request is outstanding.
    pub fn begin_submit(&mut self, input: &ScenarioInput) -> Option<AnalysisRequest> {
        if let Some(id) = self.in_flight {
            tracing::debug!(submission = %id, "submission already in flight, ignoring submit");
            return None;
        }

        // Idle, Succeeded and Failed all lead to Loading.
        if let Err(e) = self.transition(SubmissionState::Loading) {
            tracing::warn!("cannot start submission: {}", e);
            return None;
        }

        let id = SubmissionId::new();
        self.in_flight = Some(id);
        self.requests_issued += 1;

        let request = input.to_request();
        tracing::info!(
            submission = %id,
            constraints = request.constraints.len(),
            "submitting scenario for analysis"
        );
        Some(request)
    }

    /// Record the outcome of the outstanding request
    ///
    /// Fails with [`StateError::IllegalTransition`] if nothing is in flight;
    /// the state is left untouched in that case.
    pub fn settle(
        &mut self,
        outcome: Result<AnalysisResult, SubmitError>,
    ) -> Result<&SubmissionState, StateError> {
        let next = match outcome {
            Ok(result) => SubmissionState::Succeeded(result),
            Err(e) => {
                tracing::error!(kind = e.kind().as_str(), "analysis request failed: {}", e);
                SubmissionState::Failed(e.user_message())
            }
        };

        self.transition(next)?;
        if let Some(id) = self.in_flight.take() {
            tracing::info!(submission = %id, phase = ?self.state.phase(), "submission settled");
        }
        Ok(&self.state)
    }

    /// Submit `input` through `transport` and wait for the outcome
    ///
    /// A call made while a request is outstanding issues nothing and returns
    /// the current (`Loading`) state.
    ///
    /// Not cancel-safe: dropping the future after the request went out (for
    /// example under `tokio::time::timeout`) leaves the controller `Loading`
    /// until [`abandon`](Self::abandon) is called.
    pub async fn submit<T>(&mut self, transport: &T, input: &ScenarioInput) -> &SubmissionState
    where
        T: AnalysisTransport + ?Sized,
    {
        let Some(request) = self.begin_submit(input) else {
            return &self.state;
        };

        let outcome = transport.analyze(&request).await;
        if let Err(e) = self.settle(outcome) {
            // begin_submit left us in Loading, so settle cannot be rejected.
            tracing::error!("failed to settle submission: {}", e);
        }
        &self.state
    }

    /// Give up on the outstanding request
    ///
    /// Settles it as `Failed` so a new submission can start. Returns `false`
    /// when nothing is in flight.
    pub fn abandon(&mut self) -> bool {
        let Some(id) = self.in_flight else {
            return false;
        };
        tracing::warn!(submission = %id, "abandoning outstanding submission");
        self.settle(Err(SubmitError::transport(ABANDONED_MESSAGE))).is_ok()
    }

    fn transition(&mut self, next: SubmissionState) -> Result<(), StateError> {
        let from: Phase = self.state.phase();
        validate_transition(from, next.phase())?;
        self.state = next;
        Ok(())
    }
}
