//! The render → collect → validate → advance loop.

use survey_runner_types::{
    ElementId, InputError, PresentationHost, RawInput, SeedSequence, StoreError, Submission,
    Survey, SurveyError, SurveyStore,
};

/// Notice shown when a page cannot be advanced.
pub const BLOCKING_NOTICE: &str = "Please answer all questions before proceeding.";

/// Notice shown when an accepted page could not be persisted.
pub const SAVE_FAILED_NOTICE: &str = "Your answers could not be saved.";

/// Error type for controller operations.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Survey(#[from] SurveyError),

    #[error(transparent)]
    Input(#[from] InputError),

    /// The saved record could not be loaded at start.
    #[error("Could not load saved responses: {0}")]
    Load(#[source] StoreError),

    /// Host-specific failure (I/O, terminal, etc.)
    #[error("Presentation host error: {0}")]
    Host(anyhow::Error),
}

impl ControllerError {
    fn host(err: impl Into<anyhow::Error>) -> Self {
        Self::Host(err.into())
    }
}

/// What a call to [`Controller::submit`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub submission: Submission,
    /// Whether the record reached the store. Always `false` for rejected submits.
    pub persisted: bool,
    /// Whether the survey is now finished.
    pub finished: bool,
}

/// Owns a survey and drives it against a host and a store.
///
/// Every operation runs to completion before the next one starts; nothing
/// here is shared or concurrent.
#[derive(Debug)]
pub struct Controller<H, S> {
    survey: Survey,
    host: H,
    store: S,
    seeds: SeedSequence,
}

impl<H: PresentationHost, S: SurveyStore> Controller<H, S> {
    /// Create a controller whose render seeds come from the system clock.
    pub fn new(survey: Survey, host: H, store: S) -> Self {
        Self {
            survey,
            host,
            store,
            seeds: SeedSequence::from_clock(),
        }
    }

    /// Use a fixed seed for render randomization.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seeds = SeedSequence::new(seed);
        self
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tear the controller down into its parts.
    pub fn into_parts(self) -> (Survey, H, S) {
        (self.survey, self.host, self.store)
    }

    /// Restore any saved record for this survey, then display the first page.
    pub fn start(&mut self) -> Result<(), ControllerError> {
        let saved = self
            .store
            .load(self.survey.id())
            .map_err(ControllerError::Load)?;
        if let Some(record) = saved {
            self.survey.restore(record);
        }
        self.display_page()
    }

    /// Display the current page with a fresh render seed, or the finish screen.
    pub fn display_page(&mut self) -> Result<(), ControllerError> {
        let seed = self.seeds.next_seed();
        match self.survey.render_current(seed) {
            Some(presentation) => {
                self.host
                    .show_page(&presentation)
                    .map_err(ControllerError::host)?;
                self.host
                    .show_progress(self.survey.progress())
                    .map_err(ControllerError::host)?;
            }
            None => {
                tracing::info!(survey = %self.survey.id(), "Survey finished");
                self.host
                    .show_finished(self.survey.data())
                    .map_err(ControllerError::host)?;
            }
        }
        Ok(())
    }

    /// Feed the current control state of an element into the survey.
    pub fn on_element_changed(
        &mut self,
        id: &ElementId,
        input: RawInput,
    ) -> Result<(), ControllerError> {
        self.survey.on_element_changed(id, input)?;
        self.host
            .show_element_error(id, None)
            .map_err(ControllerError::host)?;
        Ok(())
    }

    /// Collect every answer, submit it, and advance or report.
    ///
    /// An accepted page is persisted before the next page (or the finish
    /// screen) is shown. A rejected page is shown again with its errors and
    /// the blocking notice; the cursor does not move.
    pub fn submit(&mut self) -> Result<SubmitOutcome, ControllerError> {
        let responses = self.survey.collect_data();
        tracing::debug!(
            survey = %self.survey.id(),
            responses = responses.len(),
            "Collected responses"
        );

        let submission = self.survey.submit_data(responses)?;
        let persisted = match &submission {
            Submission::Advanced { .. } => {
                let persisted = self.persist();
                self.display_page()?;
                if !persisted {
                    self.host
                        .show_notice(SAVE_FAILED_NOTICE)
                        .map_err(ControllerError::host)?;
                }
                persisted
            }
            Submission::Rejected(validation) => {
                self.display_page()?;
                for (id, message) in validation.iter() {
                    self.host
                        .show_element_error(id, Some(message))
                        .map_err(ControllerError::host)?;
                }
                self.host
                    .show_notice(BLOCKING_NOTICE)
                    .map_err(ControllerError::host)?;
                false
            }
        };

        Ok(SubmitOutcome {
            submission,
            persisted,
            finished: self.survey.is_finished(),
        })
    }

    /// Write the record to the store. Failures are logged, not retried.
    fn persist(&self) -> bool {
        match self.store.save(self.survey.id(), self.survey.data()) {
            Ok(()) => {
                tracing::debug!(survey = %self.survey.id(), "Responses saved");
                true
            }
            Err(err) => {
                tracing::warn!(survey = %self.survey.id(), error = %err, "Failed to save responses");
                false
            }
        }
    }
}
