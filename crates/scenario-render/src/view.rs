//! Projection of an analysis result into labeled sections

use crate::markup::MarkupRenderer;
use scenario_core::{AnalysisResult, SubmissionState};

/// Shown when there is no current result
pub const NO_ANALYSIS_PLACEHOLDER: &str = "No analysis yet.";

/// The five result sections, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Scenario summary (single text block)
    Summary,
    /// Potential pitfalls (item list)
    PotentialPitfalls,
    /// Proposed strategies (item list)
    ProposedStrategies,
    /// Recommended resources (item list)
    RecommendedResources,
    /// Disclaimer (single text block)
    Disclaimer,
}

impl SectionKind {
    /// Every section in display order
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Summary,
        SectionKind::PotentialPitfalls,
        SectionKind::ProposedStrategies,
        SectionKind::RecommendedResources,
        SectionKind::Disclaimer,
    ];

    /// Section heading
    #[inline]
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::PotentialPitfalls => "Potential Pitfalls",
            Self::ProposedStrategies => "Proposed Strategies",
            Self::RecommendedResources => "Recommended Resources",
            Self::Disclaimer => "Disclaimer",
        }
    }
}

/// Rendered content of one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    /// Single rendered block
    Text(String),
    /// Individually rendered items; may be empty
    Items(Vec<String>),
}

/// One labeled section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    /// Which section this is
    pub kind: SectionKind,
    /// Rendered content
    pub body: SectionBody,
}

/// What the result area displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedView {
    /// No current result
    Placeholder,
    /// The five sections, in [`SectionKind::ALL`] order
    Analysis(Vec<RenderedSection>),
}

impl RenderedView {
    /// Check if this is the "no analysis yet" view
    #[inline]
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    /// Rendered sections (empty for the placeholder)
    #[inline]
    #[must_use]
    pub fn sections(&self) -> &[RenderedSection] {
        match self {
            Self::Placeholder => &[],
            Self::Analysis(sections) => sections,
        }
    }

    /// Look up a section by kind
    #[must_use]
    pub fn section(&self, kind: SectionKind) -> Option<&RenderedSection> {
        self.sections().iter().find(|s| s.kind == kind)
    }
}

/// Render a result, or the placeholder when there is none
pub fn render_result<R>(result: Option<&AnalysisResult>, markup: &R) -> RenderedView
where
    R: MarkupRenderer + ?Sized,
{
    let Some(result) = result else {
        return RenderedView::Placeholder;
    };

    let text = |source: &str| SectionBody::Text(markup.render(source));
    let items = |sources: &[String]| {
        SectionBody::Items(sources.iter().map(|s| markup.render(s)).collect())
    };

    let sections = SectionKind::ALL
        .into_iter()
        .map(|kind| {
            let body = match kind {
                SectionKind::Summary => text(&result.scenario_summary),
                SectionKind::PotentialPitfalls => items(&result.potential_pitfalls),
                SectionKind::ProposedStrategies => items(&result.proposed_strategies),
                SectionKind::RecommendedResources => items(&result.recommended_resources),
                SectionKind::Disclaimer => text(&result.disclaimer),
            };
            RenderedSection { kind, body }
        })
        .collect();

    RenderedView::Analysis(sections)
}

/// Render whatever the submission state currently holds
///
/// Only `Succeeded` carries a result; every other state shows the
/// placeholder.
pub fn render_state<R>(state: &SubmissionState, markup: &R) -> RenderedView
where
    R: MarkupRenderer + ?Sized,
{
    render_result(state.result(), markup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::MarkdownText;

    fn result() -> AnalysisResult {
        AnalysisResult {
            scenario_summary: "A *launch*.".to_string(),
            potential_pitfalls: vec![],
            proposed_strategies: vec!["First".to_string(), "**Second**".to_string()],
            recommended_resources: vec!["Book".to_string()],
            disclaimer: "Not advice.".to_string(),
        }
    }

    #[test]
    fn absent_result_is_placeholder() {
        let view = render_result(None, &MarkdownText);
        assert!(view.is_placeholder());
        assert!(view.sections().is_empty());
    }

    #[test]
    fn sections_follow_display_order() {
        let view = render_result(Some(&result()), &MarkdownText);
        let kinds: Vec<_> = view.sections().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, SectionKind::ALL.to_vec());
    }

    #[test]
    fn empty_list_renders_zero_items() {
        let view = render_result(Some(&result()), &MarkdownText);
        let pitfalls = view.section(SectionKind::PotentialPitfalls).unwrap();
        assert_eq!(pitfalls.body, SectionBody::Items(vec![]));
    }

    #[test]
    fn each_item_is_rendered_individually() {
        let calls = std::cell::Cell::new(0);
        let counting = |s: &str| {
            calls.set(calls.get() + 1);
            s.to_string()
        };
        render_result(Some(&result()), &counting);
        // summary + disclaimer + 0 pitfalls + 2 strategies + 1 resource
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn non_succeeded_states_show_placeholder() {
        assert!(render_state(&SubmissionState::Idle, &MarkdownText).is_placeholder());
        assert!(render_state(&SubmissionState::Loading, &MarkdownText).is_placeholder());
        assert!(
            render_state(&SubmissionState::Failed("boom".to_string()), &MarkdownText)
                .is_placeholder()
        );
        assert!(
            !render_state(&SubmissionState::Succeeded(result()), &MarkdownText).is_placeholder()
        );
    }
}
