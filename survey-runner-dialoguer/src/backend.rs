//! Dialoguer prompts and the terminal run loop.

use std::collections::HashMap;
use std::io::Write;

use dialoguer::{Input, Select, theme::ColorfulTheme, theme::SimpleTheme, theme::Theme};
use survey_runner::{
    Controller, ControllerError, ElementPresentation, PresentationBody, RawInput, SurveyData,
    SurveyStore,
};
use thiserror::Error;

use crate::TerminalHost;

/// Item offered for optional choices and grid rows.
const SKIP_ITEM: &str = "(skip)";

/// Error type for the Dialoguer host.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// User cancelled the survey (e.g., pressed Ctrl+C or Escape).
    #[error("Survey cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    #[error(transparent)]
    Controller(#[from] ControllerError),
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_error(err: dialoguer::Error) -> DialoguerError {
    if is_cancelled(&err) {
        DialoguerError::Cancelled
    } else {
        DialoguerError::Dialoguer(err)
    }
}

/// Asks for the answer to one displayed element.
#[derive(Debug, Default, Clone)]
pub struct DialoguerPrompter {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl DialoguerPrompter {
    /// Create a new prompter with default (colorful) theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a prompter with plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    fn theme(&self) -> Box<dyn Theme> {
        if self.colorful {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        }
    }

    /// Prompt for an element. Instructions have no input and yield `None`.
    pub fn ask(&self, element: &ElementPresentation) -> Result<Option<RawInput>, DialoguerError> {
        let theme = self.theme();
        match &element.body {
            PresentationBody::Instruction => Ok(None),

            PresentationBody::Text { value, max_length } => {
                let max_length = *max_length;
                let answer: String = Input::with_theme(theme.as_ref())
                    .with_prompt(&element.text)
                    .with_initial_text(value.as_str())
                    .allow_empty(true)
                    .validate_with(move |input: &String| match max_length {
                        Some(max) if input.chars().count() > max => {
                            Err(format!("At most {max} characters"))
                        }
                        _ => Ok(()),
                    })
                    .interact_text()
                    .map_err(prompt_error)?;
                Ok(Some(RawInput::Text(answer)))
            }

            PresentationBody::Choice { options, selected } => {
                let answer = self.select(
                    theme.as_ref(),
                    &element.text,
                    options,
                    selected.as_deref(),
                    element.required,
                )?;
                Ok(Some(RawInput::Choice(answer)))
            }

            PresentationBody::Grid { rows, columns } => {
                if let Some(sub_text) = &element.sub_text {
                    println!("{sub_text}");
                }
                let mut answers = HashMap::new();
                for row in rows {
                    let prompt = format!("{}: {}", element.text, row.label);
                    let answer = self.select(
                        theme.as_ref(),
                        &prompt,
                        columns,
                        row.selected.as_deref(),
                        element.required,
                    )?;
                    if let Some(column) = answer {
                        answers.insert(row.label.clone(), column);
                    }
                }
                Ok(Some(RawInput::Grid(answers)))
            }
        }
    }

    fn select(
        &self,
        theme: &dyn Theme,
        prompt: &str,
        options: &[String],
        selected: Option<&str>,
        required: bool,
    ) -> Result<Option<String>, DialoguerError> {
        let (items, default) = select_items(options, selected, required);
        let index = Select::with_theme(theme)
            .with_prompt(prompt)
            .items(&items)
            .default(default)
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(DialoguerError::Cancelled)?;
        Ok(options.get(index).cloned())
    }
}

/// Items for a select prompt and the index to preselect.
///
/// Optional questions get a trailing skip item, preselected while unanswered.
fn select_items<'a>(
    options: &'a [String],
    selected: Option<&str>,
    required: bool,
) -> (Vec<&'a str>, usize) {
    let mut items: Vec<&str> = options.iter().map(String::as_str).collect();
    if !required {
        items.push(SKIP_ITEM);
    }
    let default = selected
        .and_then(|selected| options.iter().position(|option| option == selected))
        .unwrap_or(if required { 0 } else { options.len() });
    (items, default)
}

/// Run a survey to completion in the terminal.
///
/// Starts the controller, then prompts every element of each displayed page
/// and submits it. Returns the final record.
pub fn run<W: Write, S: SurveyStore>(
    controller: &mut Controller<TerminalHost<W>, S>,
    prompter: &DialoguerPrompter,
) -> Result<SurveyData, DialoguerError> {
    controller.start()?;

    while !controller.survey().is_finished() {
        let Some(page) = controller.host().page().cloned() else {
            break;
        };
        for element in &page.elements {
            if let Some(input) = prompter.ask(element)? {
                controller.on_element_changed(&element.id, input)?;
            }
        }

        let outcome = controller.submit()?;
        tracing::debug!(
            advanced = outcome.submission.is_advanced(),
            persisted = outcome.persisted,
            "Page submitted"
        );
    }

    Ok(controller.survey().data().clone())
}
