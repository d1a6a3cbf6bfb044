//! Recording host for testing surveys without a display.
//!
//! `RecordingHost` keeps every call the controller makes, in order, so tests
//! can assert on what a respondent would have seen.
//!
//! # Example
//!
//! ```rust
//! use survey_runner::{Controller, Element, MemoryStore, Page, RecordingHost, Survey};
//!
//! let survey = Survey::new(
//!     "intro",
//!     vec![Page::new(vec![Element::text("name", "Your name?")?])?],
//! )?;
//! let mut controller = Controller::new(survey, RecordingHost::new(), MemoryStore::new());
//! controller.start()?;
//! controller.submit()?;
//!
//! let host = controller.host();
//! assert_eq!(host.notices(), vec!["Please answer all questions before proceeding."]);
//! assert!(host.element_error("name").is_some());
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::convert::Infallible;

use indexmap::IndexMap;
use survey_runner_types::{ElementId, PagePresentation, PresentationHost, Progress, SurveyData};

/// One call made on the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Page(PagePresentation),
    ElementError {
        id: ElementId,
        message: Option<String>,
    },
    Progress(Progress),
    Notice(String),
    Finished(SurveyData),
}

/// A host that records calls instead of displaying anything.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    events: Vec<HostEvent>,
    element_errors: IndexMap<ElementId, String>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded call, oldest first.
    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    /// The page currently on display.
    pub fn last_page(&self) -> Option<&PagePresentation> {
        self.events.iter().rev().find_map(|event| match event {
            HostEvent::Page(page) => Some(page),
            _ => None,
        })
    }

    /// How many times a page was displayed.
    pub fn pages_shown(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, HostEvent::Page(_)))
            .count()
    }

    pub fn last_progress(&self) -> Option<Progress> {
        self.events.iter().rev().find_map(|event| match event {
            HostEvent::Progress(progress) => Some(*progress),
            _ => None,
        })
    }

    pub fn notices(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Notice(notice) => Some(notice.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The error text currently shown next to an element.
    pub fn element_error(&self, id: &str) -> Option<&str> {
        self.element_errors.get(id).map(String::as_str)
    }

    /// The final record, once the finish screen was shown.
    pub fn finished(&self) -> Option<&SurveyData> {
        self.events.iter().rev().find_map(|event| match event {
            HostEvent::Finished(data) => Some(data),
            _ => None,
        })
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
        self.element_errors.clear();
    }
}

impl PresentationHost for RecordingHost {
    type Error = Infallible;

    fn show_page(&mut self, page: &PagePresentation) -> Result<(), Self::Error> {
        self.element_errors.clear();
        self.events.push(HostEvent::Page(page.clone()));
        Ok(())
    }

    fn show_element_error(
        &mut self,
        id: &ElementId,
        message: Option<&str>,
    ) -> Result<(), Self::Error> {
        match message {
            Some(message) => {
                self.element_errors.insert(id.clone(), message.to_string());
            }
            None => {
                self.element_errors.shift_remove(id.as_str());
            }
        }
        self.events.push(HostEvent::ElementError {
            id: id.clone(),
            message: message.map(str::to_string),
        });
        Ok(())
    }

    fn show_progress(&mut self, progress: Progress) -> Result<(), Self::Error> {
        self.events.push(HostEvent::Progress(progress));
        Ok(())
    }

    fn show_notice(&mut self, message: &str) -> Result<(), Self::Error> {
        self.events.push(HostEvent::Notice(message.to_string()));
        Ok(())
    }

    fn show_finished(&mut self, data: &SurveyData) -> Result<(), Self::Error> {
        self.events.push(HostEvent::Finished(data.clone()));
        Ok(())
    }
}
