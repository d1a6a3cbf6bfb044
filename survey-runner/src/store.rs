//! Persistence adapters for [`SurveyStore`].

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use indexmap::IndexMap;
use survey_runner_types::{StoreError, SurveyData, SurveyStore};

/// An in-process store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, SurveyData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a record for a survey.
    pub fn with_record(survey_id: impl Into<String>, record: SurveyData) -> Self {
        let store = Self::new();
        if let Ok(mut records) = store.records.lock() {
            records.insert(survey_id.into(), record);
        }
        store
    }

    fn records(&self) -> Result<MutexGuard<'_, HashMap<String, SurveyData>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::backend(anyhow::anyhow!("memory store lock poisoned")))
    }
}

impl SurveyStore for MemoryStore {
    fn load(&self, survey_id: &str) -> Result<Option<SurveyData>, StoreError> {
        Ok(self.records()?.get(survey_id).cloned())
    }

    fn save(&self, survey_id: &str, record: &SurveyData) -> Result<(), StoreError> {
        self.records()?
            .entry(survey_id.to_string())
            .or_default()
            .merge(record.clone());
        Ok(())
    }
}

/// A store backed by one JSON file holding every survey's record, keyed by
/// survey id:
///
/// ```json
/// { "feedback": { "service": { "Speed": "Good", "Price": "Poor" } } }
/// ```
///
/// Records of other surveys in the same file are left untouched.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<IndexMap<String, SurveyData>, StoreError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(IndexMap::new()),
            Err(err) => return Err(err.into()),
        };
        if json.trim().is_empty() {
            return Ok(IndexMap::new());
        }
        Ok(serde_json::from_str(&json)?)
    }
}

impl SurveyStore for JsonFileStore {
    fn load(&self, survey_id: &str) -> Result<Option<SurveyData>, StoreError> {
        Ok(self.read_all()?.shift_remove(survey_id))
    }

    fn save(&self, survey_id: &str, record: &SurveyData) -> Result<(), StoreError> {
        let mut all = self.read_all()?;
        all.entry(survey_id.to_string())
            .or_default()
            .merge(record.clone());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&all)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), survey = survey_id, "Record written");
        Ok(())
    }
}
