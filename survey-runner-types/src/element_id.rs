use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an element within a survey, e.g. `"satisfaction"`.
///
/// Assigned when the survey is authored and never changed afterwards. Used as
/// the key of the aggregated [`SurveyData`](crate::SurveyData) record, so it
/// must be unique across every page of a survey.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId {
    id: String,
}

impl ElementId {
    /// Create a new element id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Check if the id is empty (or only whitespace).
    pub fn is_empty(&self) -> bool {
        self.id.trim().is_empty()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.id
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for ElementId {
    fn from(s: &String) -> Self {
        Self::new(s.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        let id = ElementId::new("satisfaction");
        assert_eq!(id.as_str(), "satisfaction");
    }

    #[test]
    fn blank_id_is_empty() {
        assert!(ElementId::new("").is_empty());
        assert!(ElementId::new("   ").is_empty());
        assert!(!ElementId::new("q1").is_empty());
    }

    #[test]
    fn display() {
        let id = ElementId::new("q1");
        assert_eq!(format!("{id}"), "q1");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = ElementId::new("q1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"q1\"");
    }
}
