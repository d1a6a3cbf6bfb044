use std::collections::{BTreeMap, HashMap};

use crate::{
    ANSWER_REQUIRED, ChoiceQuestion, ConfigError, CustomValidation, ElementId, ElementKind,
    ElementPresentation, Grid, InputError, PresentationBody, ResponseValue, SurveyData,
    TextQuestion, Validation,
};

/// Presentation hints keyed by style target (`"table"`, `"rowLabel"`, ...),
/// each holding CSS property/value pairs.
///
/// Carried through to the presentation untouched; the model never reads it.
pub type StyleMetadata = BTreeMap<String, BTreeMap<String, String>>;

/// The full current state of one element's input controls.
///
/// Input sources send the whole state on every change so the element can
/// rebuild its response from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    /// Contents of a text field.
    Text(String),

    /// The checked option, if any.
    Choice(Option<String>),

    /// The checked column of every row that has one.
    Grid(HashMap<String, String>),
}

impl RawInput {
    /// The element kind this input belongs to.
    pub fn kind_tag(&self) -> &'static str {
        match self {
            Self::Text(_) => crate::TEXT_KIND,
            Self::Choice(_) => crate::CHOICE_KIND,
            Self::Grid(_) => crate::GRID_KIND,
        }
    }
}

/// A single question unit within a page.
///
/// The element exclusively owns its response. The response only changes
/// through [`set_response`](Self::set_response), which stores without
/// validating; [`validate`](Self::validate) reports.
#[derive(Debug, Clone)]
pub struct Element {
    id: ElementId,
    text: String,
    sub_text: Option<String>,
    kind: ElementKind,
    required: bool,
    response: Option<ResponseValue>,
    custom_validation: Option<CustomValidation>,
    styles: StyleMetadata,
    error: Option<String>,
}

impl Element {
    /// Create a new element. Elements are required by default.
    pub fn new(
        id: impl Into<ElementId>,
        text: impl Into<String>,
        kind: ElementKind,
    ) -> Result<Self, ConfigError> {
        let id = id.into();
        let text = text.into();
        if id.is_empty() {
            return Err(ConfigError::MissingId);
        }
        if text.trim().is_empty() {
            return Err(ConfigError::MissingText(id));
        }
        Ok(Self {
            id,
            text,
            sub_text: None,
            kind,
            required: true,
            response: None,
            custom_validation: None,
            styles: StyleMetadata::new(),
            error: None,
        })
    }

    /// Create a grid element.
    pub fn grid(
        id: impl Into<ElementId>,
        text: impl Into<String>,
        rows: Vec<String>,
        columns: Vec<String>,
    ) -> Result<Self, ConfigError> {
        let id = id.into();
        let grid = Grid::new(&id, rows, columns)?;
        Self::new(id, text, ElementKind::Grid(grid))
    }

    /// Create a single-choice element.
    pub fn choice(
        id: impl Into<ElementId>,
        text: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, ConfigError> {
        let id = id.into();
        let choice = ChoiceQuestion::new(&id, options)?;
        Self::new(id, text, ElementKind::Choice(choice))
    }

    /// Create a free-text element.
    pub fn text(id: impl Into<ElementId>, text: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(id, text, ElementKind::Text(TextQuestion::new()))
    }

    /// Create a display-only element.
    pub fn instruction(
        id: impl Into<ElementId>,
        text: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let mut element = Self::new(id, text, ElementKind::Instruction)?;
        element.required = false;
        Ok(element)
    }

    pub fn with_sub_text(mut self, sub_text: impl Into<String>) -> Self {
        let sub_text = sub_text.into();
        self.sub_text = (!sub_text.is_empty()).then_some(sub_text);
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required && self.kind.stores_data();
        self
    }

    pub fn with_custom_validation(mut self, validation: CustomValidation) -> Self {
        self.custom_validation = Some(validation);
        self
    }

    pub fn with_styles(mut self, styles: StyleMetadata) -> Self {
        self.styles = styles;
        self
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// The prompt shown to the respondent.
    pub fn prompt(&self) -> &str {
        &self.text
    }

    pub fn sub_text(&self) -> Option<&str> {
        self.sub_text.as_deref()
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn custom_validation(&self) -> Option<&CustomValidation> {
        self.custom_validation.as_ref()
    }

    pub fn styles(&self) -> &StyleMetadata {
        &self.styles
    }

    /// The validation error currently surfaced for this element.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The current response, or `None` while unanswered.
    pub fn get_data(&self) -> Option<&ResponseValue> {
        self.response.as_ref()
    }

    /// Replace the stored response.
    ///
    /// Does not validate, but clears any surfaced validation error.
    /// Display-only elements drop the value.
    pub fn set_response(&mut self, value: Option<ResponseValue>) {
        if self.kind.stores_data() {
            self.response = value;
        }
        self.error = None;
    }

    /// Rebuild the response from the full state of the element's controls.
    pub fn apply_input(&mut self, input: RawInput) -> Result<(), InputError> {
        let response = match (&self.kind, input) {
            (ElementKind::Text(_), RawInput::Text(value)) => {
                (!value.trim().is_empty()).then_some(ResponseValue::Text(value))
            }
            (ElementKind::Choice(_), RawInput::Choice(selected)) => {
                selected.map(ResponseValue::Text)
            }
            (ElementKind::Grid(grid), RawInput::Grid(checked)) => {
                Some(ResponseValue::Grid(grid.response_from(&checked)))
            }
            (kind, input) => {
                return Err(InputError::KindMismatch {
                    id: self.id.clone(),
                    expected: kind.tag(),
                    actual: input.kind_tag(),
                });
            }
        };
        tracing::debug!(element = %self.id, answered = response.is_some(), "Response recomputed");
        self.set_response(response);
        Ok(())
    }

    /// Surface (or clear) a validation error for display.
    pub fn show_error(&mut self, message: Option<String>) {
        self.error = message;
    }

    /// Check if the element carries a meaningful answer.
    pub fn is_answered(&self) -> bool {
        self.get_data().is_some_and(ResponseValue::is_answered)
    }

    /// Check if a required element has everything it needs (every row, for grids).
    pub fn is_complete(&self) -> bool {
        if !self.required {
            return true;
        }
        match &self.kind {
            ElementKind::Instruction => true,
            ElementKind::Grid(grid) => grid
                .missing_rows(self.get_data().and_then(ResponseValue::as_grid))
                .is_empty(),
            ElementKind::Text(_) | ElementKind::Choice(_) => self.is_answered(),
        }
    }

    /// Validate the current response.
    ///
    /// Checks run in order and the first failure wins: required-ness, then the
    /// kind's structural rules, then the custom validation. Grids report
    /// missing rows by name instead of the generic required message.
    pub fn validate(&self) -> Validation {
        if !self.kind.stores_data() {
            return Validation::valid();
        }

        let response = self.get_data();
        let answered = self.is_answered();
        let builtin = match &self.kind {
            ElementKind::Grid(grid) if answered || self.required => grid.check(response),
            _ if !answered && self.required => Validation::invalid(ANSWER_REQUIRED),
            _ if !answered => Validation::valid(),
            ElementKind::Text(text) => text.check(response),
            ElementKind::Choice(choice) => choice.check(response),
            ElementKind::Grid(_) | ElementKind::Instruction => Validation::valid(),
        };
        if !builtin.is_valid() {
            return builtin;
        }

        match &self.custom_validation {
            Some(custom) => custom.check(response),
            None => builtin,
        }
    }

    /// Prepare the element for display.
    ///
    /// Prefills from the element's own response, falling back to the value in
    /// the aggregated record.
    pub fn render(&self, data: &SurveyData, seed: u64) -> ElementPresentation {
        let current = self.get_data().or_else(|| data.get(self.id.as_str()));
        let body = match &self.kind {
            ElementKind::Instruction => PresentationBody::Instruction,
            ElementKind::Text(text) => text.presentation(current),
            ElementKind::Choice(choice) => choice.presentation(current, seed),
            ElementKind::Grid(grid) => grid.presentation(current, seed),
        };
        ElementPresentation {
            id: self.id.clone(),
            kind: self.kind.tag(),
            text: self.text.clone(),
            sub_text: self.sub_text.clone(),
            required: self.required,
            styles: self.styles.clone(),
            error: self.error.clone(),
            body,
        }
    }
}
