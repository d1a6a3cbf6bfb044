use serde::{Deserialize, Serialize};

use crate::{ConfigError, StyleMetadata};

/// Declarative description of a survey, as authored.
///
/// Keys are camelCase so definitions written for the web runner load as-is:
///
/// ```
/// use survey_runner_types::SurveyDefinition;
///
/// let definition = SurveyDefinition::from_json(r#"{
///     "id": "feedback",
///     "pages": [{ "elements": [{
///         "type": "grid",
///         "id": "service",
///         "text": "How was our service?",
///         "rows": ["Speed", "Friendliness"],
///         "columns": ["Poor", "Good"],
///         "randomizeRows": true
///     }]}]
/// }"#).unwrap();
///
/// let grid = &definition.pages[0].elements[0];
/// assert!(grid.required);
/// assert!(grid.randomize_rows);
/// assert!(!grid.randomize_columns);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDefinition {
    /// Stable survey id, used as the persistence key.
    pub id: String,

    /// Optional title shown by hosts that have a place for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub pages: Vec<PageDefinition>,
}

impl SurveyDefinition {
    /// Parse a definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The elements of one page, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDefinition {
    pub elements: Vec<ElementConfig>,
}

/// Authoring options for one element.
///
/// Options that do not apply to the element's kind are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementConfig {
    #[serde(default)]
    pub id: String,

    /// Kind tag selecting the element variant, e.g. `"grid"`.
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,

    /// The prompt.
    #[serde(default)]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_text: Option<String>,

    #[serde(default = "default_required")]
    pub required: bool,

    /// Grid rows.
    #[serde(default)]
    pub rows: Vec<String>,

    /// Grid columns.
    #[serde(default)]
    pub columns: Vec<String>,

    /// Choice options.
    #[serde(default)]
    pub options: Vec<String>,

    #[serde(default)]
    pub randomize_rows: bool,

    #[serde(default)]
    pub randomize_columns: bool,

    #[serde(default)]
    pub randomize_options: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Name of a validator registered with the
    /// [`ElementRegistry`](crate::ElementRegistry).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_validation: Option<String>,

    #[serde(default)]
    pub styles: StyleMetadata,
}

fn default_required() -> bool {
    true
}

impl ElementConfig {
    /// Create a config with the given kind and the documented defaults.
    pub fn new(id: impl Into<String>, kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            text: text.into(),
            sub_text: None,
            required: true,
            rows: Vec::new(),
            columns: Vec::new(),
            options: Vec::new(),
            randomize_rows: false,
            randomize_columns: false,
            randomize_options: false,
            max_length: None,
            custom_validation: None,
            styles: StyleMetadata::new(),
        }
    }

    /// Create a grid config.
    pub fn grid<S: Into<String>>(
        id: impl Into<String>,
        text: impl Into<String>,
        rows: impl IntoIterator<Item = S>,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::new(id, crate::GRID_KIND, text)
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_custom_validation(mut self, name: impl Into<String>) -> Self {
        self.custom_validation = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config: ElementConfig =
            serde_json::from_str(r#"{"type": "text", "id": "name", "text": "Name?"}"#).unwrap();
        assert!(config.required);
        assert!(config.rows.is_empty());
        assert!(config.styles.is_empty());
        assert_eq!(config, ElementConfig::new("name", "text", "Name?"));
    }

    #[test]
    fn styles_are_carried() {
        let config: ElementConfig = serde_json::from_str(
            r##"{
                "type": "grid", "id": "g", "text": "Rate",
                "rows": ["A"], "columns": ["X"],
                "styles": {"table": {"borderCollapse": "collapse"}}
            }"##,
        )
        .unwrap();
        assert_eq!(config.styles["table"]["borderCollapse"], "collapse");
    }

    #[test]
    fn missing_kind_is_a_parse_error() {
        let result = SurveyDefinition::from_json(r#"{"id": "s", "pages": [{"elements": [{"id": "x"}]}]}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
