//! JSON document I/O.
//!
//! Documents are UTF-8, written pretty-printed with two-space indentation and
//! non-ASCII text kept verbatim. Writes go to a temporary file in the target
//! directory which is then persisted over the destination, so a failed write
//! never leaves a truncated document behind.

use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use enquete_core::{AnswerRecord, SurveyDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::{PathLayout, StoreError};

/// The three document operations the annotation batch needs per survey id.
pub trait DocumentStore {
    fn read_survey(&self, survey_id: &str) -> Result<SurveyDefinition, StoreError>;
    fn read_answers(&self, survey_id: &str) -> Result<Vec<AnswerRecord>, StoreError>;
    fn write_answers(&self, survey_id: &str, answers: &[AnswerRecord]) -> Result<(), StoreError>;
}

/// [`DocumentStore`] over a [`PathLayout`] of `<survey_id>.json` files.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    layout: PathLayout,
}

impl JsonDirStore {
    pub fn new(layout: PathLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &PathLayout {
        &self.layout
    }
}

impl DocumentStore for JsonDirStore {
    fn read_survey(&self, survey_id: &str) -> Result<SurveyDefinition, StoreError> {
        read_json(&self.layout.enquete_path(survey_id))
    }

    fn read_answers(&self, survey_id: &str) -> Result<Vec<AnswerRecord>, StoreError> {
        read_json(&self.layout.answer_path(survey_id))
    }

    fn write_answers(&self, survey_id: &str, answers: &[AnswerRecord]) -> Result<(), StoreError> {
        write_json_pretty(&self.layout.answer_path(survey_id), answers)
    }
}

/// Read and decode a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
        _ => StoreError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    serde_json::from_slice(&bytes).map_err(|e| StoreError::decode(path.to_path_buf(), e))
}

/// Write `value` as pretty JSON, replacing `path` in one step.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let failed = |reason: String| StoreError::Serialization {
        path: path.to_path_buf(),
        reason,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| failed(e.to_string()))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, value).map_err(|e| failed(e.to_string()))?;
        writer.flush().map_err(|e| failed(e.to_string()))?;
    }
    tmp.persist(path).map_err(|e| failed(e.error.to_string()))?;
    debug!(path = %path.display(), "wrote document");
    Ok(())
}
