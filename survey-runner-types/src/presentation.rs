use std::fmt;

use serde::Serialize;

use crate::{ElementId, StyleMetadata};

/// Page position reported to the presentation host.
///
/// Display only; navigation never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    /// Check if the reported page is the last one.
    pub fn is_complete(&self) -> bool {
        self.current == self.total
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {} of {}", self.current, self.total)
    }
}

/// A page prepared for display: its elements in page order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagePresentation {
    pub elements: Vec<ElementPresentation>,
}

impl PagePresentation {
    /// Find the presentation of an element.
    pub fn element(&self, id: &str) -> Option<&ElementPresentation> {
        self.elements.iter().find(|element| element.id.as_str() == id)
    }
}

/// One element prepared for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementPresentation {
    pub id: ElementId,
    /// Kind tag, e.g. `"grid"`.
    pub kind: &'static str,
    pub text: String,
    pub sub_text: Option<String>,
    pub required: bool,
    /// Presentation hints carried through from the definition.
    pub styles: StyleMetadata,
    /// Validation error currently surfaced for this element.
    pub error: Option<String>,
    pub body: PresentationBody,
}

/// Kind-specific part of an element presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PresentationBody {
    /// Display-only text, no input.
    Instruction,

    /// A free-text input prefilled with `value`.
    Text {
        value: String,
        max_length: Option<usize>,
    },

    /// Single-select options in display order.
    Choice {
        options: Vec<String>,
        selected: Option<String>,
    },

    /// A matrix of radio buttons; rows and columns in display order.
    Grid {
        rows: Vec<GridRowPresentation>,
        columns: Vec<String>,
    },
}

/// One grid row in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRowPresentation {
    pub label: String,
    /// Position of the row in the grid's canonical order; input controls are
    /// named after it so a shuffled display maps back to the right row.
    pub canonical_index: usize,
    pub selected: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_display() {
        let progress = Progress {
            current: 2,
            total: 3,
        };
        assert_eq!(progress.to_string(), "Page 2 of 3");
        assert!(!progress.is_complete());
    }
}
