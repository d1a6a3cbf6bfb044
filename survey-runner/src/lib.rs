//! # survey-runner
//!
//! Drive multi-page surveys. Host-agnostic.
//!
//! A [`Survey`] walks the respondent through pages of elements. The
//! [`Controller`] ties it to a [`PresentationHost`] that displays pages and a
//! [`SurveyStore`] that persists the aggregated record after every accepted page.
//!
//! ## Usage
//!
//! ```rust
//! use survey_runner::{
//!     Controller, ElementId, ElementRegistry, MemoryStore, RawInput, RecordingHost, Survey,
//!     SurveyDefinition,
//! };
//!
//! let definition = SurveyDefinition::from_json(r#"{
//!     "id": "feedback",
//!     "pages": [{ "elements": [{
//!         "type": "grid", "id": "service", "text": "How was our service?",
//!         "rows": ["Speed", "Price"], "columns": ["Poor", "Good"]
//!     }]}]
//! }"#)?;
//! let survey = Survey::from_definition(&definition, &ElementRegistry::new())?;
//!
//! let mut controller = Controller::new(survey, RecordingHost::new(), MemoryStore::new());
//! controller.start()?;
//!
//! let checked = [("Speed", "Good"), ("Price", "Poor")]
//!     .into_iter()
//!     .map(|(row, column)| (row.to_string(), column.to_string()))
//!     .collect();
//! controller.on_element_changed(&ElementId::new("service"), RawInput::Grid(checked))?;
//!
//! let outcome = controller.submit()?;
//! assert!(outcome.finished);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Element kinds
//!
//! - `grid` - one single-select answer per row of a matrix
//! - `choice` - one option from a list
//! - `text` - free text
//! - `instruction` - display-only text
//!
//! ## Hosts
//!
//! Hosts are separate crates that implement `PresentationHost`:
//! - `survey-runner-html` - HTML fragments mirroring the web runner's markup
//! - `survey-runner-dialoguer` - interactive terminal prompts via dialoguer

// Re-export all types from survey-runner-types
pub use survey_runner_types::*;

mod controller;
pub use controller::{
    BLOCKING_NOTICE, Controller, ControllerError, SAVE_FAILED_NOTICE, SubmitOutcome,
};

mod store;
pub use store::{JsonFileStore, MemoryStore};

// Recording host for testing surveys without a display
mod test_host;
pub use test_host::{HostEvent, RecordingHost};
