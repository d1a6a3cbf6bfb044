use std::convert::Infallible;

use survey_runner::{ElementId, PagePresentation, PresentationHost, Progress, SurveyData};

use crate::generator::{HtmlOptions, escape_html, render_page, wrap_document};

/// Presentation host that keeps the latest screen as HTML.
///
/// Each call updates the held state; [`HtmlHost::document`] renders it.
#[derive(Debug, Clone, Default)]
pub struct HtmlHost {
    options: HtmlOptions,
    page: Option<PagePresentation>,
    progress: Option<Progress>,
    notice: Option<String>,
    finished: Option<SurveyData>,
}

impl HtmlHost {
    pub fn new() -> Self {
        Self::with_options(HtmlOptions::new())
    }

    pub fn with_options(options: HtmlOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &HtmlOptions {
        &self.options
    }

    /// The page currently displayed, with any surfaced errors.
    pub fn page(&self) -> Option<&PagePresentation> {
        self.page.as_ref()
    }

    pub fn progress(&self) -> Option<Progress> {
        self.progress
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// The final record, once the survey has finished.
    pub fn finished(&self) -> Option<&SurveyData> {
        self.finished.as_ref()
    }

    /// Render the current screen.
    pub fn document(&self) -> String {
        let mut body = String::new();
        if let Some(progress) = self.progress {
            body.push_str(&format!(
                "<div id=\"progress-text\">{}</div>\n",
                escape_html(&progress.to_string())
            ));
        }
        if let Some(notice) = &self.notice {
            body.push_str(&format!(
                "<div class=\"survey-notice\" role=\"alert\">{}</div>\n",
                escape_html(notice)
            ));
        }
        match (&self.finished, &self.page) {
            (Some(_), _) => {
                body.push_str("<div id=\"survey-complete\">Thank you for completing the survey.</div>\n");
            }
            (None, Some(page)) => body.push_str(&render_page(page, &self.options)),
            (None, None) => {}
        }
        wrap_document(&body, &self.options)
    }
}

impl PresentationHost for HtmlHost {
    type Error = Infallible;

    fn show_page(&mut self, page: &PagePresentation) -> Result<(), Self::Error> {
        self.page = Some(page.clone());
        self.notice = None;
        Ok(())
    }

    fn show_element_error(
        &mut self,
        id: &ElementId,
        message: Option<&str>,
    ) -> Result<(), Self::Error> {
        if let Some(page) = &mut self.page
            && let Some(element) = page.elements.iter_mut().find(|element| &element.id == id)
        {
            element.error = message.map(str::to_string);
        }
        Ok(())
    }

    fn show_progress(&mut self, progress: Progress) -> Result<(), Self::Error> {
        self.progress = Some(progress);
        Ok(())
    }

    fn show_notice(&mut self, message: &str) -> Result<(), Self::Error> {
        self.notice = Some(message.to_string());
        Ok(())
    }

    fn show_finished(&mut self, data: &SurveyData) -> Result<(), Self::Error> {
        self.finished = Some(data.clone());
        self.page = None;
        self.progress = None;
        self.notice = None;
        Ok(())
    }
}
