use crate::{ElementId, PagePresentation, Progress, StoreError, SurveyData};

/// Trait for hosts that display a survey.
///
/// The controller pushes everything the respondent should see through this
/// trait; how it is drawn (HTML, terminal, GUI) is up to the host.
pub trait PresentationHost {
    /// The error type for this host.
    type Error: Into<anyhow::Error>;

    /// Display a rendered page, replacing the previous one.
    fn show_page(&mut self, page: &PagePresentation) -> Result<(), Self::Error>;

    /// Show the validation error text next to an element, or clear it with `None`.
    fn show_element_error(
        &mut self,
        id: &ElementId,
        message: Option<&str>,
    ) -> Result<(), Self::Error>;

    /// Display the page position.
    fn show_progress(&mut self, progress: Progress) -> Result<(), Self::Error>;

    /// Show a blocking, page-level notice.
    fn show_notice(&mut self, message: &str) -> Result<(), Self::Error>;

    /// Show the end of the survey with the final record.
    fn show_finished(&mut self, data: &SurveyData) -> Result<(), Self::Error>;
}

/// Trait for key-value stores that persist survey records by survey id.
pub trait SurveyStore {
    /// Load the stored record for a survey, if any.
    fn load(&self, survey_id: &str) -> Result<Option<SurveyData>, StoreError>;

    /// Merge `record` into the stored record for a survey.
    ///
    /// Stored keys missing from `record` are kept; keys present in `record`
    /// overwrite.
    fn save(&self, survey_id: &str, record: &SurveyData) -> Result<(), StoreError>;
}
