use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Response shape of a grid question: every row label mapped to the selected
/// column label, or `None` while the row is unanswered.
///
/// Iteration order is the grid's canonical row order.
pub type GridResponse = IndexMap<String, Option<String>>;

/// The value a respondent has supplied for one element.
///
/// Serializes without a tag so a persisted record reads as plain JSON:
/// `{"name": "Alice", "satisfaction": {"Speed": "Good", "Price": null}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    /// A single string (from text and choice questions).
    Text(String),

    /// A row -> column mapping (from grid questions).
    Grid(GridResponse),
}

impl ResponseValue {
    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a grid mapping.
    pub fn as_grid(&self) -> Option<&GridResponse> {
        match self {
            Self::Grid(grid) => Some(grid),
            _ => None,
        }
    }

    /// Whether the value carries an actual answer.
    ///
    /// Blank text and grids without a single selected column count as unanswered.
    pub fn is_answered(&self) -> bool {
        match self {
            Self::Text(s) => !s.trim().is_empty(),
            Self::Grid(grid) => grid
                .values()
                .any(|column| column.as_deref().is_some_and(|c| !c.is_empty())),
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::Grid(_) => "Grid",
        }
    }
}

impl From<String> for ResponseValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for ResponseValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<GridResponse> for ResponseValue {
    fn from(grid: GridResponse) -> Self {
        Self::Grid(grid)
    }
}
