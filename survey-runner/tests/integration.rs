//! Integration tests for survey-runner

use std::collections::HashMap;

use survey_runner::{
    BLOCKING_NOTICE, ConfigError, Controller, Element, ElementConfig, ElementId, ElementKind,
    ElementRegistry, GridResponse, MemoryStore, Page, PresentationBody, Progress, RawInput,
    HostEvent, RecordingHost, ResponseValue, SAVE_FAILED_NOTICE, StoreError, Submission, Survey,
    SurveyData, SurveyDefinition, SurveyStore, Validation,
};

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn grid_survey() -> Survey {
    let grid = Element::grid("ratings", "Rate these", labels(&["A", "B"]), labels(&["X", "Y"]))
        .unwrap();
    Survey::new("grid-survey", vec![Page::new(vec![grid]).unwrap()]).unwrap()
}

fn grid_record(id: &str, pairs: &[(&str, &str)]) -> SurveyData {
    let response: GridResponse = pairs
        .iter()
        .map(|(row, column)| (row.to_string(), Some(column.to_string())))
        .collect();
    let mut data = SurveyData::new();
    data.insert(id, response);
    data
}

fn checked(pairs: &[(&str, &str)]) -> RawInput {
    RawInput::Grid(
        pairs
            .iter()
            .map(|(row, column)| (row.to_string(), column.to_string()))
            .collect::<HashMap<_, _>>(),
    )
}

fn two_page_survey() -> Survey {
    Survey::new(
        "two-pages",
        vec![
            Page::new(vec![Element::text("name", "Your name?").unwrap()]).unwrap(),
            Page::new(vec![
                Element::choice("color", "Favourite colour?", labels(&["red", "blue"])).unwrap(),
            ])
            .unwrap(),
        ],
    )
    .unwrap()
}

#[test]
fn test_partial_grid_submit_names_missing_row() {
    let mut survey = grid_survey();

    let submission = survey
        .submit_data(grid_record("ratings", &[("A", "X")]))
        .unwrap();

    let Submission::Rejected(validation) = submission else {
        panic!("Expected the page to be rejected");
    };
    let message = validation.get("ratings").unwrap();
    assert!(message.contains('B'));
    assert!(!message.contains("A,"));
    assert_eq!(survey.current_page_index(), 0);
}

#[test]
fn test_empty_column_value_is_a_missing_row() {
    let mut survey = grid_survey();

    let submission = survey
        .submit_data(grid_record("ratings", &[("A", "X"), ("B", "")]))
        .unwrap();

    let Submission::Rejected(validation) = submission else {
        panic!("Expected the page to be rejected");
    };
    assert_eq!(
        validation.get("ratings"),
        Some("Please provide a response for all rows. Missing: B")
    );
    assert_eq!(survey.current_page_index(), 0);
}

#[test]
fn test_text_value_for_grid_is_rejected() {
    let mut survey = grid_survey();
    let mut responses = SurveyData::new();
    responses.insert("ratings", "X");

    let submission = survey.submit_data(responses).unwrap();

    let Submission::Rejected(validation) = submission else {
        panic!("Expected the page to be rejected");
    };
    assert_eq!(
        validation.get("ratings"),
        Some("Expected a grid response, got Text")
    );
    assert_eq!(survey.current_page_index(), 0);
}

#[test]
fn test_complete_grid_submit_advances() {
    let mut survey = grid_survey();

    let submission = survey
        .submit_data(grid_record("ratings", &[("A", "X"), ("B", "Y")]))
        .unwrap();

    assert_eq!(submission, Submission::Advanced { page_index: 0 });
    assert_eq!(survey.current_page_index(), 1);

    let expected = GridResponse::from([
        ("A".to_string(), Some("X".to_string())),
        ("B".to_string(), Some("Y".to_string())),
    ]);
    assert_eq!(survey.data().get_grid("ratings"), Some(&expected));
}

#[test]
fn test_two_pages_reach_finished() {
    let mut survey = two_page_survey();

    let mut first = SurveyData::new();
    first.insert("name", "Alice");
    assert!(survey.submit_data(first).unwrap().is_advanced());

    let mut second = SurveyData::new();
    second.insert("color", "blue");
    assert!(survey.submit_data(second).unwrap().is_advanced());

    assert!(survey.current_page().is_none());
    let progress = survey.progress();
    assert_eq!(progress.current, progress.total);
}

#[test]
fn test_empty_rows_fail_construction() {
    let result = Element::grid("ratings", "Rate these", Vec::new(), labels(&["X"]));
    assert!(matches!(result, Err(ConfigError::EmptyRows(_))));

    let definition = SurveyDefinition::from_json(
        r#"{"id": "s", "pages": [{"elements": [
            {"type": "grid", "id": "g", "text": "Rate", "rows": [], "columns": ["X"]}
        ]}]}"#,
    )
    .unwrap();
    let result = Survey::from_definition(&definition, &ElementRegistry::new());
    assert!(matches!(result, Err(ConfigError::EmptyRows(_))));
}

#[test]
fn test_data_accumulates_across_pages() {
    let mut survey = two_page_survey();
    let mut previous = survey.data().clone();

    let mut first = SurveyData::new();
    first.insert("name", "Alice");
    let mut second = SurveyData::new();
    second.insert("color", "red");

    for responses in [first, second] {
        assert!(survey.submit_data(responses).unwrap().is_advanced());
        assert!(survey.data().is_superset_of(&previous));
        assert!(survey.data().len() > previous.len());
        previous = survey.data().clone();
    }
    assert_eq!(survey.data().get_text("name"), Some("Alice"));
}

#[test]
fn test_advancement_gate() {
    let page = Page::new(vec![
        Element::text("name", "Your name?").unwrap(),
        Element::text("nickname", "Nickname?")
            .unwrap()
            .with_required(false),
        Element::instruction("note", "Thanks!").unwrap(),
    ])
    .unwrap();
    let mut survey = Survey::new("gate", vec![page]).unwrap();

    // Optional and display-only elements do not block; the required one does.
    let submission = survey.submit_data(SurveyData::new()).unwrap();
    let Submission::Rejected(validation) = submission else {
        panic!("Expected rejection");
    };
    assert_eq!(validation.len(), 1);
    assert!(validation.get("name").is_some());
    assert_eq!(survey.current_page_index(), 0);

    let mut responses = SurveyData::new();
    responses.insert("name", "Alice");
    assert!(survey.submit_data(responses).unwrap().is_advanced());
    assert!(survey.is_finished());
}

#[test]
fn test_randomization_does_not_change_response_keys() {
    let registry = ElementRegistry::new();
    let mut plain = registry
        .build(&ElementConfig::grid("g", "Rate", ["A", "B", "C"], ["X", "Y", "Z"]))
        .unwrap();
    let mut config = ElementConfig::grid("g", "Rate", ["A", "B", "C"], ["X", "Y", "Z"]);
    config.randomize_rows = true;
    config.randomize_columns = true;
    let mut shuffled = registry.build(&config).unwrap();

    let input = checked(&[("A", "Z"), ("C", "X")]);
    plain.apply_input(input.clone()).unwrap();
    shuffled.apply_input(input).unwrap();
    assert_eq!(plain.get_data(), shuffled.get_data());

    let ElementKind::Grid(grid) = shuffled.kind() else {
        panic!("Expected a grid");
    };
    assert_eq!(grid.rows(), labels(&["A", "B", "C"]).as_slice());

    for seed in 0..10 {
        let presentation = shuffled.render(&SurveyData::new(), seed);
        let PresentationBody::Grid { rows, .. } = presentation.body else {
            panic!("Expected a grid body");
        };
        let a = rows.iter().find(|row| row.label == "A").unwrap();
        assert_eq!(a.selected.as_deref(), Some("Z"));
        assert_eq!(a.canonical_index, 0);
    }
}

#[test]
fn test_custom_validation_from_definition() {
    let registry = ElementRegistry::new().with_validator("not_all_same", |response| {
        let Some(grid) = response.and_then(ResponseValue::as_grid) else {
            return Validation::valid();
        };
        let mut columns = grid.values().flatten();
        let first = columns.next();
        if grid.len() > 1 && columns.all(|column| Some(column) == first) {
            Validation::invalid("Please don't give every row the same answer.")
        } else {
            Validation::valid()
        }
    });
    let definition = SurveyDefinition::from_json(
        r#"{"id": "s", "pages": [{"elements": [{
            "type": "grid", "id": "g", "text": "Rate",
            "rows": ["A", "B"], "columns": ["X", "Y"],
            "customValidation": "not_all_same"
        }]}]}"#,
    )
    .unwrap();
    let mut survey = Survey::from_definition(&definition, &registry).unwrap();

    let rejected = survey
        .submit_data(grid_record("g", &[("A", "X"), ("B", "X")]))
        .unwrap();
    let Submission::Rejected(validation) = rejected else {
        panic!("Expected rejection");
    };
    assert_eq!(
        validation.get("g"),
        Some("Please don't give every row the same answer.")
    );

    let accepted = survey
        .submit_data(grid_record("g", &[("A", "X"), ("B", "Y")]))
        .unwrap();
    assert!(accepted.is_advanced());
}

#[test]
fn test_controller_walks_survey_and_persists() {
    let mut controller =
        Controller::new(two_page_survey(), RecordingHost::new(), MemoryStore::new()).with_seed(7);
    controller.start().unwrap();
    assert_eq!(
        controller.host().last_progress(),
        Some(Progress {
            current: 1,
            total: 2
        })
    );

    controller
        .on_element_changed(&ElementId::new("name"), RawInput::Text("Alice".into()))
        .unwrap();
    let outcome = controller.submit().unwrap();
    assert!(outcome.submission.is_advanced());
    assert!(outcome.persisted);
    assert!(!outcome.finished);

    let saved = controller.store().load("two-pages").unwrap().unwrap();
    assert_eq!(saved.get_text("name"), Some("Alice"));
    assert!(controller.host().last_page().unwrap().element("color").is_some());

    controller
        .on_element_changed(&ElementId::new("color"), RawInput::Choice(Some("red".into())))
        .unwrap();
    let outcome = controller.submit().unwrap();
    assert!(outcome.finished);

    let finished = controller.host().finished().unwrap();
    assert_eq!(finished.get_text("color"), Some("red"));
    assert_eq!(finished.get_text("name"), Some("Alice"));
    assert!(controller.submit().is_err());
}

#[test]
fn test_controller_rejection_shows_errors_and_notice() {
    let mut controller =
        Controller::new(grid_survey(), RecordingHost::new(), MemoryStore::new()).with_seed(1);
    controller.start().unwrap();

    controller
        .on_element_changed(&ElementId::new("ratings"), checked(&[("A", "X")]))
        .unwrap();
    let outcome = controller.submit().unwrap();

    assert!(!outcome.submission.is_advanced());
    assert!(!outcome.persisted);
    assert!(controller.store().load("grid-survey").unwrap().is_none());

    let host = controller.host();
    assert_eq!(host.notices(), vec![BLOCKING_NOTICE]);
    assert_eq!(
        host.element_error("ratings"),
        Some("Please provide a response for all rows. Missing: B")
    );
    assert_eq!(host.pages_shown(), 2);
    let page = host.last_page().unwrap();
    assert!(page.element("ratings").unwrap().error.is_some());

    // The page is shown again before its errors and the notice.
    let tail: Vec<_> = host.events().iter().rev().take(4).rev().collect();
    assert!(matches!(tail[0], HostEvent::Page(_)));
    assert!(matches!(tail[1], HostEvent::Progress(_)));
    assert!(matches!(tail[2], HostEvent::ElementError { message: Some(_), .. }));
    assert!(matches!(tail[3], HostEvent::Notice(_)));

    // New input clears the error shown for the element.
    controller
        .on_element_changed(&ElementId::new("ratings"), checked(&[("A", "X"), ("B", "Y")]))
        .unwrap();
    assert_eq!(controller.host().element_error("ratings"), None);
    assert!(controller.submit().unwrap().finished);
}

#[test]
fn test_controller_restores_saved_record() {
    let store = MemoryStore::with_record("grid-survey", grid_record("ratings", &[("A", "Y"), ("B", "X")]));
    let mut controller = Controller::new(grid_survey(), RecordingHost::new(), store).with_seed(3);
    controller.start().unwrap();

    let page = controller.host().last_page().unwrap();
    let PresentationBody::Grid { rows, .. } = &page.element("ratings").unwrap().body else {
        panic!("Expected a grid body");
    };
    assert!(rows.iter().all(|row| row.selected.is_some()));

    assert!(controller.submit().unwrap().finished);
}

struct FailingStore;

impl SurveyStore for FailingStore {
    fn load(&self, _: &str) -> Result<Option<SurveyData>, StoreError> {
        Ok(None)
    }

    fn save(&self, _: &str, _: &SurveyData) -> Result<(), StoreError> {
        Err(StoreError::backend(anyhow::anyhow!("disk full")))
    }
}

#[test]
fn test_persistence_failure_is_surfaced() {
    let mut controller = Controller::new(two_page_survey(), RecordingHost::new(), FailingStore);
    controller.start().unwrap();
    controller
        .on_element_changed(&ElementId::new("name"), RawInput::Text("Alice".into()))
        .unwrap();

    let outcome = controller.submit().unwrap();
    assert!(outcome.submission.is_advanced());
    assert!(!outcome.persisted);
    assert_eq!(controller.host().notices(), vec![SAVE_FAILED_NOTICE]);
    assert_eq!(controller.survey().current_page_index(), 1);
}
