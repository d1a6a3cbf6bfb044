//! # survey-runner-dialoguer
//!
//! Terminal host for survey-runner.
//!
//! Pages are printed to the terminal and each element is prompted with
//! `dialoguer`: free-text input for text questions, a select list for
//! choices, and one select list per row for grids. The page is submitted
//! once every element has been prompted; rejected pages are prompted again
//! with their answers prefilled.
//!
//! ## Example
//!
//! ```rust,no_run
//! use survey_runner::{Controller, ElementRegistry, JsonFileStore, Survey, SurveyDefinition};
//! use survey_runner_dialoguer::{DialoguerPrompter, TerminalHost, run};
//!
//! fn main() -> anyhow::Result<()> {
//!     let definition = SurveyDefinition::from_json(&std::fs::read_to_string("survey.json")?)?;
//!     let survey = Survey::from_definition(&definition, &ElementRegistry::new())?;
//!
//!     let store = JsonFileStore::new("survey-data.json");
//!     let mut controller = Controller::new(survey, TerminalHost::stdout(), store);
//!     let record = run(&mut controller, &DialoguerPrompter::new())?;
//!     println!("Collected {} answers", record.len());
//!     Ok(())
//! }
//! ```

mod backend;
pub use backend::{DialoguerError, DialoguerPrompter, run};

mod host;
pub use host::TerminalHost;
