//! Selection state: the user's chosen value per category.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::{CategoryId, OptionValue};

/// Mapping from category to chosen value.
///
/// The state is partial: a category that is absent or mapped to `None` is
/// unselected. Values are not required to exist in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionState {
    components: BTreeMap<CategoryId, Option<OptionValue>>,
}

impl SelectionState {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected value for a category, if any.
    pub fn get(&self, category: &str) -> Option<&OptionValue> {
        self.components.get(category).and_then(Option::as_ref)
    }

    /// Returns true if the category has a value.
    pub fn is_selected(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    /// Selects a value for a category, replacing any previous one.
    pub fn set(&mut self, category: impl Into<CategoryId>, value: impl Into<OptionValue>) {
        self.components.insert(category.into(), Some(value.into()));
    }

    /// Sets or clears a category in one call.
    pub fn update(&mut self, category: impl Into<CategoryId>, value: Option<OptionValue>) {
        self.components.insert(category.into(), value);
    }

    /// Marks a category as explicitly unselected.
    pub fn clear(&mut self, category: impl Into<CategoryId>) {
        self.components.insert(category.into(), None);
    }

    /// Builder method to select a value.
    pub fn with(mut self, category: impl Into<CategoryId>, value: impl Into<OptionValue>) -> Self {
        self.set(category, value);
        self
    }

    /// Returns a copy of this state with one category overridden.
    ///
    /// This is the hypothetical state used to probe "what if this option were
    /// picked"; every other selection is unchanged.
    pub fn with_override(&self, category: &str, value: &str) -> Self {
        let mut hypothetical = self.clone();
        hypothetical.set(category, value);
        hypothetical
    }

    /// Iterates over categories that have a value.
    pub fn selected(&self) -> impl Iterator<Item = (&CategoryId, &OptionValue)> {
        self.components
            .iter()
            .filter_map(|(category, value)| value.as_ref().map(|v| (category, v)))
    }

    /// Iterates over every entry, including explicitly unselected ones.
    pub fn entries(&self) -> impl Iterator<Item = (&CategoryId, Option<&OptionValue>)> {
        self.components.iter().map(|(c, v)| (c, v.as_ref()))
    }

    /// Returns true if no category has a value.
    pub fn is_empty(&self) -> bool {
        self.selected().next().is_none()
    }

    /// Returns the number of selected categories.
    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }
}

impl<C, V> FromIterator<(C, V)> for SelectionState
where
    C: Into<CategoryId>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        let mut state = Self::new();
        for (category, value) in iter {
            state.set(category, value);
        }
        state
    }
}
