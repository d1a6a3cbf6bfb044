use std::io::{self, Stdout, Write};

use survey_runner::{
    ElementId, ElementPresentation, PagePresentation, PresentationBody, PresentationHost, Progress,
    SurveyData,
};

/// Presentation host that prints to a terminal (or any writer).
///
/// The last shown page is kept so a prompter can ask for its elements.
#[derive(Debug)]
pub struct TerminalHost<W = Stdout> {
    out: W,
    page: Option<PagePresentation>,
}

impl TerminalHost<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalHost<W> {
    pub fn new(out: W) -> Self {
        Self { out, page: None }
    }

    /// The page currently on screen, including surfaced errors.
    pub fn page(&self) -> Option<&PagePresentation> {
        self.page.as_ref()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    fn write_element(&mut self, element: &ElementPresentation) -> io::Result<()> {
        let marker = if element.required { " *" } else { "" };
        writeln!(self.out, "{}{marker}", element.text)?;
        if let Some(sub_text) = &element.sub_text {
            writeln!(self.out, "  {sub_text}")?;
        }
        if let PresentationBody::Grid { rows, columns } = &element.body {
            writeln!(self.out, "  columns: {}", columns.join(" | "))?;
            for row in rows {
                let answer = row.selected.as_deref().unwrap_or("-");
                writeln!(self.out, "  {}: {answer}", row.label)?;
            }
        }
        if let Some(error) = &element.error {
            writeln!(self.out, "  ! {error}")?;
        }
        Ok(())
    }
}

impl<W: Write> PresentationHost for TerminalHost<W> {
    type Error = io::Error;

    fn show_page(&mut self, page: &PagePresentation) -> Result<(), Self::Error> {
        writeln!(self.out)?;
        for element in &page.elements {
            self.write_element(element)?;
        }
        self.page = Some(page.clone());
        Ok(())
    }

    fn show_element_error(
        &mut self,
        id: &ElementId,
        message: Option<&str>,
    ) -> Result<(), Self::Error> {
        let Some(element) = self
            .page
            .as_mut()
            .and_then(|page| page.elements.iter_mut().find(|element| &element.id == id))
        else {
            return Ok(());
        };
        element.error = message.map(str::to_string);
        if let Some(message) = message {
            writeln!(self.out, "Error in '{}': {message}", element.text)?;
        }
        Ok(())
    }

    fn show_progress(&mut self, progress: Progress) -> Result<(), Self::Error> {
        writeln!(self.out, "-- {progress} --")
    }

    fn show_notice(&mut self, message: &str) -> Result<(), Self::Error> {
        writeln!(self.out, "{message}")
    }

    fn show_finished(&mut self, data: &SurveyData) -> Result<(), Self::Error> {
        self.page = None;
        writeln!(self.out)?;
        writeln!(self.out, "Thank you! {} answers recorded.", data.len())
    }
}
