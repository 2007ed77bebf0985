//! Scenario input and the editable constraint list
//!
//! The list is a persistent vector: each mutation produces a new version and
//! any snapshot handed out earlier keeps seeing the entries it was taken with.
//! Entries are identified by position only.

use crate::error::ValidationError;
use crate::types::AnalysisRequest;
use im::Vector;

/// Ordered, editable constraint entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintList {
    entries: Vector<String>,
}

impl ConstraintList {
    /// Create list with a single blank entry (initial form state)
    #[must_use]
    pub fn new() -> Self {
        let mut entries = Vector::new();
        entries.push_back(String::new());
        Self { entries }
    }

    /// Create list with no entries
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vector::new(),
        }
    }

    /// Immutable view of the current entries
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Vector<String> {
        self.entries.clone()
    }

    /// Replace the entry at `index`
    ///
    /// Returns `false` and leaves the list untouched when `index` is out of
    /// bounds.
    pub fn update(&mut self, index: usize, text: impl Into<String>) -> bool {
        if index >= self.entries.len() {
            tracing::debug!(index, len = self.entries.len(), "constraint update out of bounds");
            return false;
        }
        self.entries = self.entries.update(index, text.into());
        true
    }

    /// Append one blank entry
    pub fn add(&mut self) {
        let mut next = self.entries.clone();
        next.push_back(String::new());
        self.entries = next;
    }

    /// Remove the entry at `index`, shifting later entries down
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index >= self.entries.len() {
            tracing::debug!(index, len = self.entries.len(), "constraint removal out of bounds");
            return None;
        }
        let mut next = self.entries.clone();
        let removed = next.remove(index);
        self.entries = next;
        Some(removed)
    }

    /// Entry at `index`
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Number of entries, blank ones included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in display order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Entries whose trimmed content is non-empty, order preserved
    pub fn filled(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|entry| !entry.trim().is_empty())
    }
}

impl Default for ConstraintList {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Into<String>> FromIterator<S> for ConstraintList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Everything the form collects before a submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioInput {
    scenario: String,
    constraints: ConstraintList,
}

impl ScenarioInput {
    /// Create input for a fresh session: empty scenario, one blank constraint
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With scenario text
    #[inline]
    #[must_use]
    pub fn with_scenario(mut self, text: impl Into<String>) -> Self {
        self.scenario = text.into();
        self
    }

    /// With a complete constraint list
    #[inline]
    #[must_use]
    pub fn with_constraints(mut self, constraints: ConstraintList) -> Self {
        self.constraints = constraints;
        self
    }

    /// Replace the scenario description
    #[inline]
    pub fn set_scenario_text(&mut self, text: impl Into<String>) {
        self.scenario = text.into();
    }

    /// Replace the constraint at `index`; out-of-bounds is a no-op
    #[inline]
    pub fn update_constraint(&mut self, index: usize, text: impl Into<String>) -> bool {
        self.constraints.update(index, text)
    }

    /// Append a blank constraint
    #[inline]
    pub fn add_constraint(&mut self) {
        self.constraints.add();
    }

    /// Remove the constraint at `index`
    #[inline]
    pub fn remove_constraint(&mut self, index: usize) -> Option<String> {
        self.constraints.remove(index)
    }

    /// Current scenario text
    #[inline]
    #[must_use]
    pub fn scenario_text(&self) -> &str {
        &self.scenario
    }

    /// Current constraint list
    #[inline]
    #[must_use]
    pub fn constraints(&self) -> &ConstraintList {
        &self.constraints
    }

    /// Required-field check performed by the form before submitting
    ///
    /// Mirrors native `required` inputs: a field is missing only when it is
    /// completely empty. Whitespace-only constraints pass here and are dropped
    /// later by [`ScenarioInput::to_request`].
    pub fn check_required(&self) -> Result<(), ValidationError> {
        if self.scenario.is_empty() {
            return Err(ValidationError::EmptyScenario);
        }
        if let Some(index) = self.constraints.iter().position(str::is_empty) {
            return Err(ValidationError::EmptyConstraint { index });
        }
        Ok(())
    }

    /// Build the outbound payload
    #[must_use]
    pub fn to_request(&self) -> AnalysisRequest {
        AnalysisRequest {
            scenario: self.scenario.clone(),
            constraints: self.constraints.filled().map(str::to_owned).collect(),
        }
    }
}
