//! Result output in the configured format

use crate::config::OutputFormat;
use scenario_core::SubmissionState;
use scenario_render::{render_state, to_html, to_text, MarkdownHtml, MarkdownText};

/// Render the result area for `state`
///
/// JSON output is the raw result, or `null` when there is none.
pub fn render(state: &SubmissionState, format: OutputFormat) -> Result<String, serde_json::Error> {
    let out = match format {
        OutputFormat::Text => to_text(&render_state(state, &MarkdownText)),
        OutputFormat::Html => to_html(&render_state(state, &MarkdownHtml)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&state.result())?;
            json.push('\n');
            json
        }
    };
    Ok(out)
}
