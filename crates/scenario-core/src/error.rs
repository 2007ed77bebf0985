//! Error types for scenario submission
//!
//! Provides error handling for:
//! - Form-level validation (required fields)
//! - Submission failures (transport, service status, malformed response)
//! - Illegal submission state transitions

use crate::state::Phase;

/// Failure of a single submission attempt
///
/// Every variant is surfaced to the user the same way: one message string
/// replacing any previous one. The variants only exist so that logs can tell
/// the categories apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The request never completed (unreachable host, reset connection, ...)
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("API error: {reason}")]
    Status {
        /// Numeric HTTP status
        code: u16,
        /// Reason phrase for the status
        reason: String,
    },

    /// The body was not JSON or did not match the result shape
    #[error("{0}")]
    MalformedResponse(String),
}

impl SubmitError {
    /// Create a transport failure
    #[inline]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a service status failure
    #[inline]
    pub fn status(code: u16, reason: impl Into<String>) -> Self {
        Self::Status {
            code,
            reason: reason.into(),
        }
    }

    /// Create a malformed-response failure
    #[inline]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Classification used for logging
    #[inline]
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) => FailureKind::Transport,
            Self::Status { .. } => FailureKind::Service,
            Self::MalformedResponse(_) => FailureKind::MalformedResponse,
        }
    }

    /// The single human-readable message shown near the form
    ///
    /// Never empty: a failure with no description falls back to its
    /// category name.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            format!("{} failure", self.kind().as_str())
        } else {
            message
        }
    }
}

/// Failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Request never completed
    Transport,
    /// Request completed with a non-success status
    Service,
    /// Body did not decode into a result
    MalformedResponse,
}

impl FailureKind {
    /// Stable name for log fields
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Service => "service",
            Self::MalformedResponse => "malformed-response",
        }
    }
}

/// Required-field violations that block submission at the form level
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Scenario description is empty
    #[error("scenario is required")]
    EmptyScenario,

    /// A constraint field is empty
    #[error("constraint {} is required", .index + 1)]
    EmptyConstraint {
        /// Zero-based position of the empty field
        index: usize,
    },
}

/// Submission state machine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Transition not in the allowed table
    #[error("illegal submission transition: {from:?} -> {to:?}")]
    IllegalTransition {
        /// Phase before the attempted transition
        from: Phase,
        /// Requested phase
        to: Phase,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_uses_reason() {
        let err = SubmitError::status(500, "Internal Server Error");
        assert_eq!(err.user_message(), "API error: Internal Server Error");
        assert_eq!(err.kind(), FailureKind::Service);
    }

    #[test]
    fn transport_message_is_passed_through() {
        let err = SubmitError::transport("connection refused");
        assert_eq!(err.user_message(), "connection refused");
        assert_eq!(err.kind(), FailureKind::Transport);
    }

    #[test]
    fn empty_descriptions_still_produce_a_message() {
        let err = SubmitError::malformed("");
        assert_eq!(err.user_message(), "malformed-response failure");
    }

    #[test]
    fn validation_messages_are_one_based() {
        let err = ValidationError::EmptyConstraint { index: 0 };
        assert_eq!(err.to_string(), "constraint 1 is required");
        assert_eq!(ValidationError::EmptyScenario.to_string(), "scenario is required");
    }

    #[test]
    fn illegal_transition_display() {
        let err = StateError::IllegalTransition {
            from: Phase::Idle,
            to: Phase::Succeeded,
        };
        assert!(err.to_string().contains("Idle -> Succeeded"));
    }
}
