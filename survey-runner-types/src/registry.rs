use std::collections::HashMap;

use crate::{
    CHOICE_KIND, ChoiceQuestion, ConfigError, CustomValidation, Element, ElementConfig,
    ElementId, ElementKind, GRID_KIND, Grid, INSTRUCTION_KIND, ResponseValue, TEXT_KIND,
    TextQuestion, Validation,
};

/// Builds the kind-specific part of an element from its config.
pub type KindConstructor = fn(&ElementId, &ElementConfig) -> Result<ElementKind, ConfigError>;

/// Maps kind tags to constructors and validator names to validators.
///
/// The common options (`id`, `text`, `subText`, `required`,
/// `customValidation`, `styles`) are handled here for every kind.
#[derive(Debug, Clone)]
pub struct ElementRegistry {
    kinds: HashMap<String, KindConstructor>,
    validators: HashMap<String, CustomValidation>,
}

impl ElementRegistry {
    /// Create a registry without any kinds.
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
            validators: HashMap::new(),
        }
    }

    /// Create a registry with the built-in kinds.
    pub fn new() -> Self {
        Self::empty()
            .with_kind(INSTRUCTION_KIND, build_instruction)
            .with_kind(TEXT_KIND, build_text)
            .with_kind(CHOICE_KIND, build_choice)
            .with_kind(GRID_KIND, build_grid)
    }

    /// Register (or replace) the constructor for a kind tag.
    pub fn register_kind(&mut self, tag: impl Into<String>, constructor: KindConstructor) {
        self.kinds.insert(tag.into(), constructor);
    }

    pub fn with_kind(mut self, tag: impl Into<String>, constructor: KindConstructor) -> Self {
        self.register_kind(tag, constructor);
        self
    }

    /// Register a validator that definitions can refer to by name.
    pub fn register_validator(
        &mut self,
        name: impl Into<String>,
        check: impl Fn(Option<&ResponseValue>) -> Validation + Send + Sync + 'static,
    ) {
        let name = name.into();
        self.validators
            .insert(name.clone(), CustomValidation::named(name, check));
    }

    pub fn with_validator(
        mut self,
        name: impl Into<String>,
        check: impl Fn(Option<&ResponseValue>) -> Validation + Send + Sync + 'static,
    ) -> Self {
        self.register_validator(name, check);
        self
    }

    /// Check if a kind tag is known.
    pub fn has_kind(&self, tag: &str) -> bool {
        self.kinds.contains_key(tag)
    }

    /// Build an element from its config.
    pub fn build(&self, config: &ElementConfig) -> Result<Element, ConfigError> {
        let id = ElementId::new(config.id.as_str());
        if id.is_empty() {
            return Err(ConfigError::MissingId);
        }
        let constructor = self
            .kinds
            .get(&config.kind)
            .ok_or_else(|| ConfigError::UnknownKind(config.kind.clone()))?;
        let kind = constructor(&id, config)?;

        let mut element = Element::new(id, config.text.as_str(), kind)?
            .with_required(config.required)
            .with_styles(config.styles.clone());
        if let Some(sub_text) = &config.sub_text {
            element = element.with_sub_text(sub_text.as_str());
        }
        if let Some(name) = &config.custom_validation {
            let validation = self
                .validators
                .get(name)
                .ok_or_else(|| ConfigError::UnknownValidator(name.clone()))?;
            element = element.with_custom_validation(validation.clone());
        }
        Ok(element)
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn build_instruction(_: &ElementId, _: &ElementConfig) -> Result<ElementKind, ConfigError> {
    Ok(ElementKind::Instruction)
}

fn build_text(_: &ElementId, config: &ElementConfig) -> Result<ElementKind, ConfigError> {
    Ok(ElementKind::Text(TextQuestion {
        max_length: config.max_length,
    }))
}

fn build_choice(id: &ElementId, config: &ElementConfig) -> Result<ElementKind, ConfigError> {
    let choice = ChoiceQuestion::new(id, config.options.clone())?
        .with_randomized_options(config.randomize_options);
    Ok(ElementKind::Choice(choice))
}

fn build_grid(id: &ElementId, config: &ElementConfig) -> Result<ElementKind, ConfigError> {
    let grid = Grid::new(id, config.rows.clone(), config.columns.clone())?
        .with_randomized_rows(config.randomize_rows)
        .with_randomized_columns(config.randomize_columns);
    Ok(ElementKind::Grid(grid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_grid_with_common_options() {
        let registry = ElementRegistry::new().with_validator("never", |_| {
            Validation::invalid("Never valid.")
        });
        let mut config = ElementConfig::grid("g", "Rate", ["A", "B"], ["X", "Y"])
            .with_required(false)
            .with_custom_validation("never");
        config.randomize_columns = true;
        config.sub_text = Some("Pick one per row".into());

        let element = registry.build(&config).unwrap();
        assert_eq!(element.kind().tag(), "grid");
        assert!(!element.is_required());
        assert_eq!(element.sub_text(), Some("Pick one per row"));
        assert_eq!(element.custom_validation().and_then(CustomValidation::name), Some("never"));

        let ElementKind::Grid(grid) = element.kind() else {
            panic!("Expected a grid");
        };
        assert!(grid.randomize_columns());
        assert!(!grid.randomize_rows());
    }

    #[test]
    fn unknown_kind_and_validator_fail() {
        let registry = ElementRegistry::new();
        let result = registry.build(&ElementConfig::new("x", "slider", "Slide"));
        assert!(matches!(result, Err(ConfigError::UnknownKind(kind)) if kind == "slider"));

        let config = ElementConfig::new("x", "text", "Name").with_custom_validation("missing");
        assert!(matches!(
            registry.build(&config),
            Err(ConfigError::UnknownValidator(_))
        ));
    }

    #[test]
    fn empty_grid_rows_fail_at_build() {
        let registry = ElementRegistry::new();
        let config = ElementConfig::grid("g", "Rate", Vec::<String>::new(), vec!["X".to_string()]);
        assert!(matches!(registry.build(&config), Err(ConfigError::EmptyRows(_))));
    }

    #[test]
    fn custom_kinds_can_be_registered() {
        fn build_yes_no(id: &ElementId, _: &ElementConfig) -> Result<ElementKind, ConfigError> {
            let choice = ChoiceQuestion::new(id, vec!["Yes".into(), "No".into()])?;
            Ok(ElementKind::Choice(choice))
        }

        let registry = ElementRegistry::new().with_kind("yesno", build_yes_no);
        assert!(registry.has_kind("yesno"));
        let element = registry
            .build(&ElementConfig::new("agree", "yesno", "Agree?"))
            .unwrap();
        assert_eq!(element.kind().tag(), "choice");
    }
}
