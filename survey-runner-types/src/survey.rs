use std::collections::HashSet;

use crate::{
    ConfigError, ElementId, ElementRegistry, InputError, Page, PagePresentation, PageValidation,
    Progress, RawInput, SurveyData, SurveyDefinition, SurveyError,
};

/// Navigation state of a survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyState {
    /// Showing the page at this index.
    InProgress(usize),

    /// Every page has been accepted.
    Finished,
}

/// Result of a submit that was accepted for processing.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The page at `page_index` validated and the cursor moved past it.
    Advanced { page_index: usize },

    /// The current page did not validate; the cursor did not move.
    Rejected(PageValidation),
}

impl Submission {
    pub fn is_advanced(&self) -> bool {
        matches!(self, Self::Advanced { .. })
    }
}

/// An ordered sequence of pages, a cursor and the aggregated response record.
///
/// The cursor only moves forward, one page per accepted submit, and reaching
/// `pages.len()` means finished. The record only grows.
#[derive(Debug, Clone)]
pub struct Survey {
    id: String,
    pages: Vec<Page>,
    current_page_index: usize,
    data: SurveyData,
}

impl Survey {
    /// Create a survey. Needs at least one page and unique element ids
    /// across all pages.
    pub fn new(id: impl Into<String>, pages: Vec<Page>) -> Result<Self, ConfigError> {
        let id = id.into();
        if pages.is_empty() {
            return Err(ConfigError::EmptySurvey(id));
        }

        let mut seen = HashSet::new();
        for element in pages.iter().flat_map(Page::elements) {
            if !seen.insert(element.id().clone()) {
                return Err(ConfigError::DuplicateElementId(element.id().clone()));
            }
        }

        tracing::debug!(survey = %id, pages = pages.len(), "Survey constructed");
        Ok(Self {
            id,
            pages,
            current_page_index: 0,
            data: SurveyData::new(),
        })
    }

    /// Build a survey from a declarative definition.
    pub fn from_definition(
        definition: &SurveyDefinition,
        registry: &ElementRegistry,
    ) -> Result<Self, ConfigError> {
        let pages = definition
            .pages
            .iter()
            .map(|page| {
                let elements = page
                    .elements
                    .iter()
                    .map(|config| registry.build(config))
                    .collect::<Result<Vec<_>, _>>()?;
                Page::new(elements)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(definition.id.clone(), pages)
    }

    /// The survey id, used as the persistence key.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The aggregated response record.
    pub fn data(&self) -> &SurveyData {
        &self.data
    }

    pub fn current_page_index(&self) -> usize {
        self.current_page_index
    }

    pub fn state(&self) -> SurveyState {
        if self.is_finished() {
            SurveyState::Finished
        } else {
            SurveyState::InProgress(self.current_page_index)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current_page_index >= self.pages.len()
    }

    /// The page being shown, or `None` once finished.
    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(self.current_page_index)
    }

    pub fn current_page_mut(&mut self) -> Option<&mut Page> {
        self.pages.get_mut(self.current_page_index)
    }

    /// Page position for display, clamped to the page count.
    pub fn progress(&self) -> Progress {
        let total = self.pages.len();
        Progress {
            current: (self.current_page_index + 1).min(total),
            total,
        }
    }

    /// Prepare the current page for display.
    pub fn render_current(&self, seed: u64) -> Option<PagePresentation> {
        self.current_page().map(|page| page.render(&self.data, seed))
    }

    /// Apply the full control state of an element on the current page.
    pub fn on_element_changed(&mut self, id: &ElementId, input: RawInput) -> Result<(), InputError> {
        let page = self.current_page_mut().ok_or(InputError::NoCurrentPage)?;
        let element = page
            .element_mut(id.as_str())
            .ok_or_else(|| InputError::UnknownElement(id.clone()))?;
        element.apply_input(input)
    }

    /// Gather the response of every answered element across all pages.
    pub fn collect_data(&self) -> SurveyData {
        let mut data = SurveyData::new();
        for page in &self.pages {
            page.collect_into(&mut data);
        }
        data
    }

    /// Merge `responses` into the record, then validate the current page.
    ///
    /// Values for elements on the current page are also written back to those
    /// elements, so the page validates exactly what was submitted. On success
    /// the cursor advances by one. On rejection the cursor stays put, the
    /// merged values are kept, and the failing elements carry their errors.
    pub fn submit_data(&mut self, responses: SurveyData) -> Result<Submission, SurveyError> {
        if self.is_finished() {
            return Err(SurveyError::Finished(self.id.clone()));
        }

        let index = self.current_page_index;
        let page = &mut self.pages[index];
        for element in page.elements_mut() {
            if let Some(value) = responses.get(element.id().as_str()) {
                element.set_response(Some(value.clone()));
            }
        }
        tracing::debug!(survey = %self.id, page = index, responses = responses.len(), "Merging responses");
        self.data.merge(responses);

        let validation = page.validate();
        if validation.is_valid() {
            self.current_page_index += 1;
            tracing::info!(
                survey = %self.id,
                page = index,
                finished = self.is_finished(),
                "Page accepted"
            );
            Ok(Submission::Advanced { page_index: index })
        } else {
            page.annotate(&validation);
            tracing::warn!(
                survey = %self.id,
                page = index,
                invalid = validation.len(),
                "Page rejected"
            );
            Ok(Submission::Rejected(validation))
        }
    }

    /// Merge a previously persisted record back in, restoring the responses of
    /// matching elements. The cursor does not move.
    pub fn restore(&mut self, record: SurveyData) {
        for element in self.pages.iter_mut().flat_map(Page::elements_mut) {
            if let Some(value) = record.get(element.id().as_str()) {
                element.set_response(Some(value.clone()));
            }
        }
        tracing::debug!(survey = %self.id, restored = record.len(), "Restored saved responses");
        self.data.merge(record);
    }
}
