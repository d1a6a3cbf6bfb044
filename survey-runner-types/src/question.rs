use std::collections::HashSet;

use crate::shuffle::shuffled_order;
use crate::{ConfigError, ElementId, Grid, PresentationBody, ResponseValue, Validation};

pub const INSTRUCTION_KIND: &str = "instruction";
pub const TEXT_KIND: &str = "text";
pub const CHOICE_KIND: &str = "choice";
pub const GRID_KIND: &str = "grid";

/// The kind of element, determining its response shape and validation rules.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Display-only text. Never stores a response.
    Instruction,

    /// Free-text answer.
    Text(TextQuestion),

    /// Pick one option from a list.
    Choice(ChoiceQuestion),

    /// Pick one column for every row of a matrix.
    Grid(Grid),
}

impl ElementKind {
    /// The kind tag used in survey definitions.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Instruction => INSTRUCTION_KIND,
            Self::Text(_) => TEXT_KIND,
            Self::Choice(_) => CHOICE_KIND,
            Self::Grid(_) => GRID_KIND,
        }
    }

    /// Check if elements of this kind contribute to the survey record.
    pub fn stores_data(&self) -> bool {
        !matches!(self, Self::Instruction)
    }
}

/// Configuration for a free-text question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextQuestion {
    /// Optional maximum number of characters.
    pub max_length: Option<usize>,
}

impl TextQuestion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a length limit.
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length: Some(max_length),
        }
    }

    pub(crate) fn check(&self, response: Option<&ResponseValue>) -> Validation {
        let Some(response) = response else {
            return Validation::valid();
        };
        let Some(text) = response.as_str() else {
            return Validation::invalid(format!(
                "Expected a text response, got {}",
                response.type_name()
            ));
        };
        match self.max_length {
            Some(max) if text.chars().count() > max => {
                Validation::invalid(format!("Please use at most {max} characters."))
            }
            _ => Validation::valid(),
        }
    }

    pub(crate) fn presentation(&self, response: Option<&ResponseValue>) -> PresentationBody {
        PresentationBody::Text {
            value: response
                .and_then(ResponseValue::as_str)
                .unwrap_or_default()
                .to_string(),
            max_length: self.max_length,
        }
    }
}

/// Configuration for a single-select question.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceQuestion {
    options: Vec<String>,
    randomize_options: bool,
}

impl ChoiceQuestion {
    /// Create a choice question. Options must be non-empty and unique.
    pub fn new(id: &ElementId, options: Vec<String>) -> Result<Self, ConfigError> {
        if options.is_empty() {
            return Err(ConfigError::EmptyOptions(id.clone()));
        }
        ensure_unique(id, "option", &options)?;
        Ok(Self {
            options,
            randomize_options: false,
        })
    }

    /// Shuffle the options on every render.
    pub fn with_randomized_options(mut self, randomize: bool) -> Self {
        self.randomize_options = randomize;
        self
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub(crate) fn check(&self, response: Option<&ResponseValue>) -> Validation {
        let Some(response) = response else {
            return Validation::valid();
        };
        match response.as_str() {
            Some(selected) if self.options.iter().any(|option| option == selected) => {
                Validation::valid()
            }
            Some(selected) => Validation::invalid(format!("'{selected}' is not an option.")),
            None => Validation::invalid(format!(
                "Expected a single choice, got {}",
                response.type_name()
            )),
        }
    }

    pub(crate) fn presentation(
        &self,
        response: Option<&ResponseValue>,
        seed: u64,
    ) -> PresentationBody {
        let options = if self.randomize_options {
            shuffled_order(&self.options, seed)
        } else {
            self.options.clone()
        };
        PresentationBody::Choice {
            options,
            selected: response.and_then(ResponseValue::as_str).map(str::to_string),
        }
    }
}

/// Reject duplicate labels within one element.
pub(crate) fn ensure_unique(
    id: &ElementId,
    what: &'static str,
    labels: &[String],
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for label in labels {
        if label.trim().is_empty() {
            return Err(ConfigError::BlankLabel {
                id: id.clone(),
                what,
            });
        }
        if !seen.insert(label.as_str()) {
            return Err(ConfigError::DuplicateLabel {
                id: id.clone(),
                what,
                label: label.clone(),
            });
        }
    }
    Ok(())
}
