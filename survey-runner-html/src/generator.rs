//! HTML markup generator implementation.

use survey_runner::{ElementPresentation, PagePresentation, PresentationBody, StyleMetadata};

/// Options for HTML generation.
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Title for the HTML document.
    pub title: Option<String>,
    /// Whether to include default CSS styling.
    pub include_styles: bool,
    /// Whether to generate a complete HTML document (with html/head/body tags).
    pub full_document: bool,
    /// Label of the submit button.
    pub submit_label: String,
}

impl HtmlOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self {
            title: None,
            include_styles: true,
            full_document: true,
            submit_label: "Next".to_string(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable default CSS styling.
    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }

    /// Generate a complete HTML document or just the page fragment.
    pub fn full_document(mut self, full: bool) -> Self {
        self.full_document = full;
        self
    }

    /// Set the submit button label.
    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }
}

/// Generate the markup of a page: every element followed by the submit button.
pub fn render_page(page: &PagePresentation, options: &HtmlOptions) -> String {
    let mut html = String::new();
    html.push_str("<div id=\"question-container\">\n");
    for element in &page.elements {
        html.push_str(&render_element(element));
    }
    html.push_str("</div>\n");
    html.push_str(&format!(
        "<button type=\"button\" id=\"submit-btn\">{}</button>\n",
        escape_html(&options.submit_label)
    ));
    html
}

/// Generate the markup of a single element.
pub fn render_element(element: &ElementPresentation) -> String {
    let id = escape_html(element.id.as_str());
    let styles = &element.styles;
    let mut html = String::new();

    html.push_str(&format!(
        "<div class=\"{}-question\" id=\"{id}-container\"{}>\n",
        element.kind,
        style_attr(styles, "root")
    ));
    html.push_str(&format!(
        "  <div class=\"inner-container\"{}>\n",
        style_attr(styles, "innerContainer")
    ));
    html.push_str(&format!(
        "    <label class=\"question-label\"{}>{}</label>\n",
        style_attr(styles, "label"),
        escape_html(&element.text)
    ));
    if let Some(sub_text) = &element.sub_text {
        html.push_str(&format!(
            "    <span class=\"question-subtext\"{}>{}</span>\n",
            style_attr(styles, "subText"),
            escape_html(sub_text)
        ));
    }

    match &element.body {
        PresentationBody::Instruction => {}

        PresentationBody::Text { value, max_length } => {
            let max_attr = max_length
                .map(|max| format!(" maxlength=\"{max}\""))
                .unwrap_or_default();
            html.push_str(&format!(
                "    <input type=\"text\" id=\"{id}-input\" name=\"{id}\" value=\"{}\"{max_attr}{}>\n",
                escape_html(value),
                style_attr(styles, "input")
            ));
        }

        PresentationBody::Choice { options, selected } => {
            for (index, option) in options.iter().enumerate() {
                let checked = if selected.as_deref() == Some(option.as_str()) {
                    " checked"
                } else {
                    ""
                };
                let option = escape_html(option);
                html.push_str(&format!(
                    "    <label class=\"choice-option\"><input type=\"radio\" id=\"{id}-{index}\" name=\"{id}\" value=\"{option}\"{checked}{}> {option}</label>\n",
                    style_attr(styles, "radio")
                ));
            }
        }

        PresentationBody::Grid { rows, columns } => {
            html.push_str(&format!("    <table{}>\n", style_attr(styles, "table")));
            html.push_str(&format!(
                "      <thead><tr{}><th></th>",
                style_attr(styles, "headerRow")
            ));
            for column in columns {
                html.push_str(&format!(
                    "<th{}>{}</th>",
                    style_attr(styles, "headerCell"),
                    escape_html(column)
                ));
            }
            html.push_str("</tr></thead>\n      <tbody>\n");

            for row in rows {
                let row_index = row.canonical_index;
                html.push_str(&format!(
                    "        <tr{}><td class=\"row-label\"{}>{}</td>",
                    style_attr(styles, "row"),
                    style_attr(styles, "rowLabel"),
                    escape_html(&row.label)
                ));
                for (col_index, column) in columns.iter().enumerate() {
                    let checked = if row.selected.as_deref() == Some(column.as_str()) {
                        " checked"
                    } else {
                        ""
                    };
                    html.push_str(&format!(
                        "<td{}><input type=\"radio\" id=\"{id}-{row_index}-{col_index}\" name=\"{id}-{row_index}\" value=\"{}\"{checked}{}></td>",
                        style_attr(styles, "cell"),
                        escape_html(column),
                        style_attr(styles, "radio")
                    ));
                }
                html.push_str("</tr>\n");
            }
            html.push_str("      </tbody>\n    </table>\n");
        }
    }

    html.push_str("  </div>\n");
    match &element.error {
        Some(error) => html.push_str(&format!(
            "  <div id=\"{id}-error\" class=\"error-message\">{}</div>\n",
            escape_html(error)
        )),
        None => html.push_str(&format!(
            "  <div id=\"{id}-error\" class=\"error-message\" style=\"display: none;\"></div>\n"
        )),
    }
    html.push_str("</div>\n");
    html
}

/// Wrap body markup into a full document when the options ask for one.
pub(crate) fn wrap_document(body: &str, options: &HtmlOptions) -> String {
    if !options.full_document {
        return body.to_string();
    }

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    if let Some(title) = &options.title {
        html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
    }
    if options.include_styles {
        html.push_str(&generate_styles());
    }
    html.push_str("</head>\n<body>\n");
    if let Some(title) = &options.title {
        html.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));
    }
    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}

/// Build an inline `style` attribute from the hints for one style target.
fn style_attr(styles: &StyleMetadata, key: &str) -> String {
    let Some(properties) = styles.get(key).filter(|properties| !properties.is_empty()) else {
        return String::new();
    };
    let declarations = properties
        .iter()
        .map(|(property, value)| format!("{}: {}", css_property(property), value))
        .collect::<Vec<_>>()
        .join("; ");
    format!(" style=\"{}\"", escape_html(&declarations))
}

/// Convert a camelCase property name (`borderCollapse`) to CSS (`border-collapse`).
fn css_property(name: &str) -> String {
    let mut css = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            css.push('-');
            css.push(c.to_ascii_lowercase());
        } else {
            css.push(c);
        }
    }
    css
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate default CSS styles.
fn generate_styles() -> String {
    r#"  <style>
    body {
      max-width: 720px;
      margin: 2rem auto;
      font-family: sans-serif;
    }
    .inner-container {
      margin: 1rem 0;
    }
    .question-label {
      display: block;
      font-weight: bold;
    }
    .question-subtext {
      display: block;
      color: #6c757d;
      margin-bottom: 0.5rem;
    }
    .grid-question table {
      width: 100%;
      border-collapse: collapse;
    }
    .grid-question thead tr {
      background-color: #f2f2f2;
    }
    .grid-question th, .grid-question td {
      padding: 10px;
      text-align: center;
    }
    .grid-question tbody tr {
      border-bottom: 1px solid #dee2e6;
    }
    .grid-question td.row-label {
      font-weight: bold;
      text-align: left;
    }
    .error-message, .survey-notice {
      color: #dc3545;
      margin-top: 0.25rem;
    }
    #submit-btn {
      margin-top: 1rem;
      padding: 0.5rem 1rem;
    }
  </style>
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_runner::{Element, SurveyData};

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn html_options_chaining() {
        let options = HtmlOptions::new()
            .with_title("Test Survey")
            .with_styles(false)
            .full_document(true)
            .with_submit_label("Continue");

        assert_eq!(options.title, Some("Test Survey".to_string()));
        assert!(!options.include_styles);
        assert!(options.full_document);
        assert_eq!(options.submit_label, "Continue");
    }

    #[test]
    fn grid_markup_matches_runner_names() {
        let grid = Element::grid("g", "Rate <us>", labels(&["A", "B"]), labels(&["X", "Y"]))
            .unwrap()
            .with_sub_text("One per row");
        let mut data = SurveyData::new();
        data.insert(
            "g",
            survey_runner::GridResponse::from([("B".to_string(), Some("Y".to_string()))]),
        );

        let html = render_element(&grid.render(&data, 0));
        assert!(html.contains(r#"id="g-container""#));
        assert!(html.contains("Rate &lt;us&gt;"));
        assert!(html.contains(r#"<span class="question-subtext">One per row</span>"#));
        assert!(html.contains(r#"id="g-1-1" name="g-1" value="Y" checked"#));
        assert!(html.contains(r#"id="g-0-0" name="g-0" value="X">"#));
        assert!(html.contains(r#"<div id="g-error" class="error-message" style="display: none;"></div>"#));
    }

    #[test]
    fn error_text_is_visible() {
        let mut element = Element::text("name", "Name?").unwrap();
        element.show_error(Some("This question requires an answer.".into()));

        let html = render_element(&element.render(&SurveyData::new(), 0));
        assert!(html.contains(
            r#"<div id="name-error" class="error-message">This question requires an answer.</div>"#
        ));
    }

    #[test]
    fn style_hints_become_inline_styles() {
        let mut styles = StyleMetadata::new();
        styles
            .entry("table".to_string())
            .or_default()
            .insert("borderCollapse".to_string(), "collapse".to_string());
        let grid = Element::grid("g", "Rate", labels(&["A"]), labels(&["X"]))
            .unwrap()
            .with_styles(styles);

        let html = render_element(&grid.render(&SurveyData::new(), 0));
        assert!(html.contains(r#"<table style="border-collapse: collapse">"#));
    }

    #[test]
    fn css_property_names() {
        assert_eq!(css_property("backgroundColor"), "background-color");
        assert_eq!(css_property("width"), "width");
    }

    #[test]
    fn fragment_is_not_wrapped() {
        let options = HtmlOptions::new().full_document(false);
        assert_eq!(wrap_document("<p>hi</p>", &options), "<p>hi</p>");

        let document = wrap_document("<p>hi</p>", &HtmlOptions::new().with_title("T"));
        assert!(document.starts_with("<!DOCTYPE html>"));
        assert!(document.contains("<title>T</title>"));
    }
}
