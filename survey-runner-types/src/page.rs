use crate::shuffle::derive_seed;
use crate::{ConfigError, Element, PagePresentation, PageValidation, SurveyData};

/// An ordered, fixed group of elements shown together.
///
/// Completion and validity are derived from the elements on every call,
/// never cached: responses can change between checks.
#[derive(Debug, Clone)]
pub struct Page {
    elements: Vec<Element>,
}

impl Page {
    /// Create a page. A page needs at least one element.
    pub fn new(elements: Vec<Element>) -> Result<Self, ConfigError> {
        if elements.is_empty() {
            return Err(ConfigError::EmptyPage);
        }
        Ok(Self { elements })
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    /// Find an element on this page.
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|element| element.id().as_str() == id)
    }

    /// Find an element on this page for mutation.
    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements
            .iter_mut()
            .find(|element| element.id().as_str() == id)
    }

    /// Get the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always `false`; pages are never empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Prepare every element for display. Reads only.
    pub fn render(&self, data: &SurveyData, seed: u64) -> PagePresentation {
        PagePresentation {
            elements: self
                .elements
                .iter()
                .enumerate()
                .map(|(index, element)| element.render(data, derive_seed(seed, index as u64)))
                .collect(),
        }
    }

    /// Check if every required element has its answer.
    pub fn is_complete(&self) -> bool {
        self.elements.iter().all(Element::is_complete)
    }

    /// Check if the page is complete and every element validates.
    pub fn is_valid(&self) -> bool {
        self.is_complete() && self.validate().is_valid()
    }

    /// Validate every element, collecting each failure message.
    pub fn validate(&self) -> PageValidation {
        let mut validation = PageValidation::new();
        for element in &self.elements {
            let result = element.validate();
            if !result.is_valid() {
                validation.insert(
                    element.id().clone(),
                    result.error_message.unwrap_or_default(),
                );
            }
        }
        validation
    }

    /// Surface the messages of a failed validation on the elements they
    /// belong to, clearing errors on the others.
    pub fn annotate(&mut self, validation: &PageValidation) {
        for element in &mut self.elements {
            let message = validation.get(element.id().as_str()).map(str::to_string);
            element.show_error(message);
        }
    }

    /// Add every answered element's response to `data`.
    pub fn collect_into(&self, data: &mut SurveyData) {
        for element in &self.elements {
            if let Some(response) = element.get_data() {
                data.insert(element.id().clone(), response.clone());
            }
        }
    }
}
