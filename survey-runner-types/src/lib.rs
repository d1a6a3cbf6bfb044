//! Core types for the survey-runner crate.
//!
//! This crate provides the presentation-agnostic survey model:
//! - `Element` and `ElementKind` - Question units and their kinds (`Grid`, ...)
//! - `Page` and `Survey` - Page grouping and the navigation state machine
//! - `SurveyData` and `ResponseValue` - The aggregated response record
//! - `ElementRegistry` and `SurveyDefinition` - Building surveys from definitions
//! - `PresentationHost` and `SurveyStore` traits - For implementing hosts and stores

mod element_id;
pub use element_id::ElementId;

mod response_value;
pub use response_value::{GridResponse, ResponseValue};

mod survey_data;
pub use survey_data::SurveyData;

mod validation;
pub use validation::{ANSWER_REQUIRED, CustomValidation, PageValidation, Validation};

mod question;
pub use question::{
    CHOICE_KIND, ChoiceQuestion, ElementKind, GRID_KIND, INSTRUCTION_KIND, TEXT_KIND,
    TextQuestion,
};

mod grid;
pub use grid::Grid;

mod element;
pub use element::{Element, RawInput, StyleMetadata};

mod presentation;
pub use presentation::{
    ElementPresentation, GridRowPresentation, PagePresentation, PresentationBody, Progress,
};

pub mod shuffle;
pub use shuffle::{SeedSequence, shuffled_order};

mod page;
pub use page::Page;

mod survey;
pub use survey::{Submission, Survey, SurveyState};

mod definition;
pub use definition::{ElementConfig, PageDefinition, SurveyDefinition};

mod registry;
pub use registry::{ElementRegistry, KindConstructor};

mod error;
pub use error::{ConfigError, InputError, StoreError, SurveyError};

mod traits;
pub use traits::{PresentationHost, SurveyStore};
