use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::{ElementId, ResponseValue};

/// Message reported for a required element that has no answer.
pub const ANSWER_REQUIRED: &str = "This question requires an answer.";

/// Outcome of validating one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,
    pub error_message: Option<String>,
}

impl Validation {
    /// A passing validation.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: None,
        }
    }

    /// A failing validation with the message to show next to the element.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }
}

impl From<Result<(), String>> for Validation {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(message) => Self::invalid(message),
        }
    }
}

type Check = dyn Fn(Option<&ResponseValue>) -> Validation + Send + Sync;

/// An authoring-time validator consulted after an element's built-in checks.
///
/// Receives the element's current response (`None` while unanswered).
#[derive(Clone)]
pub struct CustomValidation {
    name: Option<String>,
    check: Arc<Check>,
}

impl CustomValidation {
    /// Wrap a validator function.
    pub fn new(
        check: impl Fn(Option<&ResponseValue>) -> Validation + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: None,
            check: Arc::new(check),
        }
    }

    /// Wrap a validator function under the name used by survey definitions.
    pub fn named(
        name: impl Into<String>,
        check: impl Fn(Option<&ResponseValue>) -> Validation + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: Some(name.into()),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Run the validator against a response.
    pub fn check(&self, response: Option<&ResponseValue>) -> Validation {
        (self.check)(response)
    }
}

impl fmt::Debug for CustomValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValidation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Per-element error messages collected while validating a page.
///
/// Empty when the page is valid. Entries follow page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageValidation {
    errors: IndexMap<ElementId, String>,
}

impl PageValidation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the error message for an element.
    pub fn insert(&mut self, id: ElementId, message: impl Into<String>) {
        self.errors.insert(id, message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the error message for an element, if it failed.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.errors.get(id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ElementId, &str)> {
        self.errors.iter().map(|(id, message)| (id, message.as_str()))
    }

    /// Number of invalid elements.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
