use crate::error::StateError;
use crate::types::AnalysisResult;

/// Submission lifecycle state
///
/// Exactly one variant holds at a time. A stored result or error message only
/// exists inside its own variant, so entering `Loading` clears both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// One request is in flight
    Loading,
    /// Last submission produced a result
    Succeeded(AnalysisResult),
    /// Last submission failed; the message is shown near the form
    Failed(String),
}

impl SubmissionState {
    /// Payload-free tag of this state
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::Idle => Phase::Idle,
            Self::Loading => Phase::Loading,
            Self::Succeeded(_) => Phase::Succeeded,
            Self::Failed(_) => Phase::Failed,
        }
    }

    /// Check if a request is outstanding
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Result of the last successful submission, if it is current
    #[inline]
    #[must_use]
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// Message of the last failed submission, if it is current
    #[inline]
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Tag of a [`SubmissionState`], used by the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing submitted yet
    Idle,
    /// Request in flight
    Loading,
    /// Result stored
    Succeeded,
    /// Failure message stored
    Failed,
}

impl Phase {
    /// Every phase, in lifecycle order
    pub const ALL: [Phase; 4] = [Phase::Idle, Phase::Loading, Phase::Succeeded, Phase::Failed];
}

/// Validates a submission state transition.
pub fn validate_transition(from: Phase, to: Phase) -> Result<(), StateError> {
    if allowed(from, to) {
        Ok(())
    } else {
        Err(StateError::IllegalTransition { from, to })
    }
}

#[must_use]
pub fn allowed_transitions(from: Phase) -> Vec<Phase> {
    use Phase::*;
    match from {
        Idle => vec![Loading],
        Loading => vec![Succeeded, Failed],
        Succeeded => vec![Loading],
        Failed => vec![Loading],
    }
}

fn allowed(from: Phase, to: Phase) -> bool {
    allowed_transitions(from).into_iter().any(|s| s == to)
}
