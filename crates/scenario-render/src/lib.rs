//! Scenario Render - result projection
//!
//! Turns an [`AnalysisResult`](scenario_core::AnalysisResult) into the five
//! labeled sections the client displays, passing every markup field through a
//! [`MarkupRenderer`].
//!
//! # Architecture
//!
//! ```text
//! SubmissionState → render_state → RenderedView → to_text / to_html → output
//!                        ↑
//!                 MarkupRenderer (MarkdownText, MarkdownHtml, any Fn(&str) -> String)
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod format;
pub mod markup;
pub mod view;

// Re-exports for convenience
pub use format::{to_html, to_text};
pub use markup::{MarkdownHtml, MarkdownText, MarkupRenderer};
pub use view::{
    render_result, render_state, RenderedSection, RenderedView, SectionBody, SectionKind,
    NO_ANALYSIS_PLACEHOLDER,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
