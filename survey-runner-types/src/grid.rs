use std::collections::HashMap;

use crate::question::ensure_unique;
use crate::shuffle::{derive_seed, shuffled_order};
use crate::{
    ConfigError, ElementId, GridResponse, GridRowPresentation, PresentationBody, ResponseValue,
    Validation,
};

/// A matrix question: one single-select answer per row.
///
/// `rows` and `columns` are the canonical identity keys of the response. The
/// randomize flags only change the order they are displayed in.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: Vec<String>,
    columns: Vec<String>,
    randomize_rows: bool,
    randomize_columns: bool,
}

impl Grid {
    /// Create a grid. Rows and columns must each be non-empty and unique.
    pub fn new(id: &ElementId, rows: Vec<String>, columns: Vec<String>) -> Result<Self, ConfigError> {
        if rows.is_empty() {
            return Err(ConfigError::EmptyRows(id.clone()));
        }
        if columns.is_empty() {
            return Err(ConfigError::EmptyColumns(id.clone()));
        }
        ensure_unique(id, "row", &rows)?;
        ensure_unique(id, "column", &columns)?;
        Ok(Self {
            rows,
            columns,
            randomize_rows: false,
            randomize_columns: false,
        })
    }

    /// Shuffle the displayed row order on every render.
    pub fn with_randomized_rows(mut self, randomize: bool) -> Self {
        self.randomize_rows = randomize;
        self
    }

    /// Shuffle the displayed column order on every render.
    pub fn with_randomized_columns(mut self, randomize: bool) -> Self {
        self.randomize_columns = randomize;
        self
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn randomize_rows(&self) -> bool {
        self.randomize_rows
    }

    pub fn randomize_columns(&self) -> bool {
        self.randomize_columns
    }

    /// Rebuild the whole response from the checked column of each row.
    ///
    /// Always yields exactly one entry per row, in canonical order, with
    /// `None` for rows that have nothing checked. Entries in `checked` that
    /// name no row are ignored.
    pub fn response_from(&self, checked: &HashMap<String, String>) -> GridResponse {
        self.rows
            .iter()
            .map(|row| (row.clone(), checked.get(row).cloned()))
            .collect()
    }

    /// Rows without a selected column, in canonical order.
    pub fn missing_rows(&self, response: Option<&GridResponse>) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| {
                response
                    .and_then(|grid| grid.get(row.as_str()))
                    .and_then(|column| column.as_deref())
                    .is_none_or(str::is_empty)
            })
            .map(String::as_str)
            .collect()
    }

    pub(crate) fn check(&self, response: Option<&ResponseValue>) -> Validation {
        let grid = match response {
            None => None,
            Some(ResponseValue::Grid(grid)) => Some(grid),
            Some(other) => {
                return Validation::invalid(format!(
                    "Expected a grid response, got {}",
                    other.type_name()
                ));
            }
        };

        let missing = self.missing_rows(grid);
        if !missing.is_empty() {
            return Validation::invalid(format!(
                "Please provide a response for all rows. Missing: {}",
                missing.join(", ")
            ));
        }

        for (row, column) in grid.into_iter().flatten() {
            if !self.rows.contains(row) {
                return Validation::invalid(format!("Unknown row '{row}'"));
            }
            if let Some(column) = column
                && !self.columns.contains(column)
            {
                return Validation::invalid(format!(
                    "Invalid response for row '{row}': '{column}' is not a column"
                ));
            }
        }

        Validation::valid()
    }

    pub(crate) fn presentation(
        &self,
        response: Option<&ResponseValue>,
        seed: u64,
    ) -> PresentationBody {
        let selected = response.and_then(ResponseValue::as_grid);
        let indexed: Vec<(usize, &String)> = self.rows.iter().enumerate().collect();
        let row_order = if self.randomize_rows {
            shuffled_order(&indexed, derive_seed(seed, 0))
        } else {
            indexed
        };
        let columns = if self.randomize_columns {
            shuffled_order(&self.columns, derive_seed(seed, 1))
        } else {
            self.columns.clone()
        };

        let rows = row_order
            .into_iter()
            .map(|(canonical_index, label)| GridRowPresentation {
                label: label.clone(),
                canonical_index,
                selected: selected
                    .and_then(|grid| grid.get(label.as_str()))
                    .cloned()
                    .flatten(),
            })
            .collect();

        PresentationBody::Grid { rows, columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn grid() -> Grid {
        Grid::new(
            &ElementId::new("g"),
            labels(&["A", "B", "C"]),
            labels(&["X", "Y"]),
        )
        .unwrap()
    }

    fn checked(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(row, column)| (row.to_string(), column.to_string()))
            .collect()
    }

    #[test]
    fn empty_rows_or_columns_fail() {
        let id = ElementId::new("g");
        assert!(matches!(
            Grid::new(&id, Vec::new(), labels(&["X"])),
            Err(ConfigError::EmptyRows(_))
        ));
        assert!(matches!(
            Grid::new(&id, labels(&["A"]), Vec::new()),
            Err(ConfigError::EmptyColumns(_))
        ));
        assert!(matches!(
            Grid::new(&id, labels(&["A", "A"]), labels(&["X"])),
            Err(ConfigError::DuplicateLabel { what: "row", .. })
        ));
    }

    #[test]
    fn blank_labels_fail() {
        let id = ElementId::new("g");
        assert!(matches!(
            Grid::new(&id, labels(&["A", " "]), labels(&["X"])),
            Err(ConfigError::BlankLabel { what: "row", .. })
        ));
        assert!(matches!(
            Grid::new(&id, labels(&["A"]), labels(&["X", ""])),
            Err(ConfigError::BlankLabel { what: "column", .. })
        ));
    }

    #[test]
    fn empty_column_value_counts_as_missing() {
        let grid = grid();
        let response = GridResponse::from([
            ("A".to_string(), Some("X".to_string())),
            ("B".to_string(), Some(String::new())),
            ("C".to_string(), Some("Y".to_string())),
        ]);

        assert_eq!(grid.missing_rows(Some(&response)), vec!["B"]);
        let validation = grid.check(Some(&ResponseValue::Grid(response)));
        assert_eq!(
            validation.error_message.as_deref(),
            Some("Please provide a response for all rows. Missing: B")
        );
    }

    #[test]
    fn text_response_is_malformed() {
        let validation = grid().check(Some(&ResponseValue::Text("X".to_string())));
        assert!(!validation.is_valid());
        assert_eq!(
            validation.error_message.as_deref(),
            Some("Expected a grid response, got Text")
        );
    }

    #[test]
    fn response_has_one_entry_per_row() {
        let grid = grid();
        let response = grid.response_from(&checked(&[("B", "Y"), ("nope", "X")]));

        let entries: Vec<_> = response
            .iter()
            .map(|(row, column)| (row.as_str(), column.as_deref()))
            .collect();
        assert_eq!(entries, vec![("A", None), ("B", Some("Y")), ("C", None)]);
    }

    #[test]
    fn recompute_is_idempotent() {
        let grid = grid();
        let input = checked(&[("A", "X"), ("C", "Y")]);
        assert_eq!(grid.response_from(&input), grid.response_from(&input));
    }

    #[test]
    fn missing_rows_named_in_canonical_order() {
        let grid = grid();
        let response = ResponseValue::Grid(grid.response_from(&checked(&[("B", "X")])));
        let result = grid.check(Some(&response));
        assert_eq!(
            result.error_message.as_deref(),
            Some("Please provide a response for all rows. Missing: A, C")
        );
    }

    #[test]
    fn rejects_unknown_column() {
        let grid = grid();
        let response = ResponseValue::Grid(grid.response_from(&checked(&[
            ("A", "X"),
            ("B", "Z"),
            ("C", "Y"),
        ])));
        let result = grid.check(Some(&response));
        assert_eq!(
            result.error_message.as_deref(),
            Some("Invalid response for row 'B': 'Z' is not a column")
        );
    }

    #[test]
    fn rejects_unknown_row() {
        let grid = grid();
        let mut response = grid.response_from(&checked(&[("A", "X"), ("B", "X"), ("C", "X")]));
        response.insert("D".to_string(), Some("X".to_string()));
        let result = grid.check(Some(&ResponseValue::Grid(response)));
        assert_eq!(result.error_message.as_deref(), Some("Unknown row 'D'"));
    }

    #[test]
    fn randomized_display_keeps_identity() {
        let grid = grid().with_randomized_rows(true).with_randomized_columns(true);
        let response = ResponseValue::Grid(grid.response_from(&checked(&[("B", "Y")])));

        for seed in 0..20 {
            let PresentationBody::Grid { rows, mut columns } =
                grid.presentation(Some(&response), seed)
            else {
                panic!("Expected a grid body");
            };
            for row in &rows {
                assert_eq!(grid.rows()[row.canonical_index], row.label);
            }
            let b = rows.iter().find(|row| row.label == "B").unwrap();
            assert_eq!(b.selected.as_deref(), Some("Y"));
            columns.sort();
            assert_eq!(columns, grid.columns());
        }
        assert_eq!(grid.rows(), labels(&["A", "B", "C"]).as_slice());
    }
}
