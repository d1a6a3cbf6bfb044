//! # survey-runner-html
//!
//! HTML presentation host for survey-runner.
//!
//! Renders pages into the markup the web survey runner uses, so existing
//! stylesheets and input listeners keep working:
//! - each element sits in `<div id="{id}-container">`
//! - grid radios are named `{id}-{row}` after the row's canonical position
//! - validation text goes into `<div id="{id}-error">`
//!
//! ## Example
//!
//! ```rust
//! use survey_runner::{Controller, Element, MemoryStore, Page, Survey};
//! use survey_runner_html::HtmlHost;
//!
//! let grid = Element::grid(
//!     "service",
//!     "How was our service?",
//!     vec!["Speed".into(), "Price".into()],
//!     vec!["Poor".into(), "Good".into()],
//! )?;
//! let survey = Survey::new("feedback", vec![Page::new(vec![grid])?])?;
//!
//! let mut controller = Controller::new(survey, HtmlHost::new(), MemoryStore::new());
//! controller.start()?;
//!
//! let html = controller.host().document();
//! assert!(html.contains(r#"name="service-0""#));
//! assert!(html.contains("Page 1 of 1"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod generator;
pub use generator::{HtmlOptions, escape_html, render_element, render_page};

mod host;
pub use host::HtmlHost;
