use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{ElementId, GridResponse, ResponseValue};

/// The aggregated response record of a survey.
///
/// Maps each element id to that element's current response. The record is
/// accumulated across pages: [`merge`](Self::merge) adds or overwrites keys and
/// never removes any. Insertion order is kept so a persisted record lists
/// answers in the order they were first given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyData {
    values: IndexMap<ElementId, ResponseValue>,
}

impl SurveyData {
    /// Create a new empty record.
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Insert a response for the given element, replacing any previous one.
    pub fn insert(&mut self, id: impl Into<ElementId>, value: impl Into<ResponseValue>) {
        self.values.insert(id.into(), value.into());
    }

    /// Get the response recorded for an element.
    pub fn get(&self, id: &str) -> Option<&ResponseValue> {
        self.values.get(id)
    }

    /// Check if a response exists for the given element.
    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    /// Get an iterator over all id-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ElementId, &ResponseValue)> {
        self.values.iter()
    }

    /// Get the number of recorded responses.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge another record into this one; entries of `other` win on conflict.
    pub fn merge(&mut self, other: SurveyData) {
        self.values.extend(other.values);
    }

    /// Check if every key of `other` is also recorded here.
    pub fn is_superset_of(&self, other: &SurveyData) -> bool {
        other.values.keys().all(|id| self.values.contains_key(id))
    }

    // === Convenience accessors ===

    /// Get a text response.
    pub fn get_text(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(ResponseValue::as_str)
    }

    /// Get a grid response.
    pub fn get_grid(&self, id: &str) -> Option<&GridResponse> {
        self.get(id).and_then(ResponseValue::as_grid)
    }
}

impl FromIterator<(ElementId, ResponseValue)> for SurveyData {
    fn from_iter<I: IntoIterator<Item = (ElementId, ResponseValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SurveyData {
    type Item = (ElementId, ResponseValue);
    type IntoIter = indexmap::map::IntoIter<ElementId, ResponseValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a SurveyData {
    type Item = (&'a ElementId, &'a ResponseValue);
    type IntoIter = indexmap::map::Iter<'a, ElementId, ResponseValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
