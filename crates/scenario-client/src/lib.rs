//! Scenario Client - HTTP transport
//!
//! Implements [`AnalysisTransport`](scenario_core::AnalysisTransport) over
//! `reqwest`:
//! - `POST` of `{ "scenario", "constraints" }` as JSON to a fixed endpoint
//! - 2xx bodies decoded into [`AnalysisResult`](scenario_core::AnalysisResult)
//! - Non-success statuses, transport failures and undecodable bodies mapped to
//!   [`SubmitError`](scenario_core::SubmitError)
//!
//! # Example
//!
//! ```rust,ignore
//! use scenario_client::HttpTransport;
//! use scenario_core::{ClientConfig, RequestController, ScenarioInput};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new(&ClientConfig::default())?;
//! let input = ScenarioInput::new().with_scenario("Launch a product");
//!
//! let mut controller = RequestController::new();
//! controller.submit(&transport, &input).await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod http;

pub use error::ClientError;
pub use http::HttpTransport;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
