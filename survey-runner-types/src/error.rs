use crate::ElementId;

/// Fatal authoring error raised while constructing elements, pages or surveys.
///
/// These indicate a defect in the survey definition and never occur at
/// runtime once a [`Survey`](crate::Survey) exists.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Element is missing an id")]
    MissingId,

    #[error("Element '{0}' is missing its prompt text")]
    MissingText(ElementId),

    #[error("Grid '{0}': rows must be a non-empty list")]
    EmptyRows(ElementId),

    #[error("Grid '{0}': columns must be a non-empty list")]
    EmptyColumns(ElementId),

    #[error("Choice '{0}': options must be a non-empty list")]
    EmptyOptions(ElementId),

    #[error("Element '{id}': {what} labels must not be blank")]
    BlankLabel { id: ElementId, what: &'static str },

    #[error("Element '{id}': duplicate {what} '{label}'")]
    DuplicateLabel {
        id: ElementId,
        what: &'static str,
        label: String,
    },

    #[error("Duplicate element id '{0}'")]
    DuplicateElementId(ElementId),

    #[error("A page must contain at least one element")]
    EmptyPage,

    #[error("Survey '{0}' has no pages")]
    EmptySurvey(String),

    #[error("Unknown element kind '{0}'")]
    UnknownKind(String),

    #[error("Unknown custom validation '{0}'")]
    UnknownValidator(String),

    #[error("Invalid survey definition: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error raised when user input cannot be applied to an element.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("No element '{0}' on the current page")]
    UnknownElement(ElementId),

    #[error("Element '{id}' expects {expected} input, got {actual}")]
    KindMismatch {
        id: ElementId,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("The survey is finished; there is no current page")]
    NoCurrentPage,
}

/// Error type for survey navigation.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// Submit was called after the last page had been accepted.
    #[error("Survey '{0}' is finished; no further submissions are accepted")]
    Finished(String),
}

impl SurveyError {
    /// Check if this error means the survey has already finished.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// Error type for persistence stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed survey record: {0}")]
    Format(#[from] serde_json::Error),

    /// Backend-specific failure (locking, remote storage, etc.)
    #[error("Store backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }
}
