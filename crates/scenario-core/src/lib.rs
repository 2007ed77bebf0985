//! Scenario Core - input store and submission lifecycle
//!
//! The client-side half of the scenario analyzer:
//! - Collects a scenario description and an editable list of constraints
//! - Builds the outbound payload (blank constraints dropped, order kept)
//! - Runs a single in-flight request through `Idle → Loading → Succeeded | Failed`
//! - Abstracts the service behind [`AnalysisTransport`]
//!
//! # Example
//!
//! ```rust,ignore
//! use scenario_core::{RequestController, ScenarioInput};
//!
//! # async fn example(transport: &dyn scenario_core::AnalysisTransport) {
//! let mut input = ScenarioInput::new();
//! input.set_scenario_text("Launch a product");
//! input.update_constraint(0, "Budget: $10,000");
//!
//! let mut controller = RequestController::new();
//! let state = controller.submit(transport, &input).await;
//! println!("{:?}", state.phase());
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod constraints;
pub mod controller;
pub mod error;
pub mod state;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use constraints::{ConstraintList, ScenarioInput};
pub use controller::{RequestController, ABANDONED_MESSAGE};
pub use error::{FailureKind, StateError, SubmitError, ValidationError};
pub use state::{Phase, SubmissionState};
pub use transport::AnalysisTransport;
pub use types::{AnalysisRequest, AnalysisResult, ClientConfig, SubmissionId, DEFAULT_ENDPOINT};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Scenario Core
    pub use crate::{
        AnalysisRequest, AnalysisResult, AnalysisTransport, ClientConfig, RequestController,
        ScenarioInput, SubmissionState, SubmitError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
