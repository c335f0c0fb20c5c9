//! Where survey documents live and which survey ids a batch covers.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::StoreError;

/// Directory pair holding `<survey_id>.json` answer and enquete documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLayout {
    pub answers_dir: PathBuf,
    pub enquete_dir: PathBuf,
}

impl PathLayout {
    pub fn new(answers_dir: impl Into<PathBuf>, enquete_dir: impl Into<PathBuf>) -> Self {
        Self {
            answers_dir: answers_dir.into(),
            enquete_dir: enquete_dir.into(),
        }
    }

    pub fn answer_path(&self, survey_id: &str) -> PathBuf {
        self.answers_dir.join(format!("{survey_id}.json"))
    }

    pub fn enquete_path(&self, survey_id: &str) -> PathBuf {
        self.enquete_dir.join(format!("{survey_id}.json"))
    }
}

/// Source of the survey ids a batch processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyIds {
    /// Exactly these ids, in this order.
    Explicit(Vec<String>),
    /// `prefix` + zero-padded number for each number in `from..=to`,
    /// e.g. `SURVEY_001` ..= `SURVEY_030`.
    Range {
        prefix: String,
        from: u32,
        to: u32,
        width: usize,
    },
    /// Sorted stems of `<dir>/<prefix>*.json`.
    Discover { dir: PathBuf, prefix: String },
}

impl SurveyIds {
    pub fn resolve(&self) -> Result<Vec<String>, StoreError> {
        match self {
            SurveyIds::Explicit(ids) => Ok(ids.clone()),
            SurveyIds::Range {
                prefix,
                from,
                to,
                width,
            } => Ok((*from..=*to)
                .map(|n| format!("{prefix}{n:0width$}", width = *width))
                .collect()),
            SurveyIds::Discover { dir, prefix } => discover(dir, prefix),
        }
    }
}

fn discover(dir: &Path, prefix: &str) -> Result<Vec<String>, StoreError> {
    let entries = std::fs::read_dir(dir).map_err(|source| match source.kind() {
        ErrorKind::NotFound => StoreError::NotFound(dir.to_path_buf()),
        _ => StoreError::Io {
            path: dir.to_path_buf(),
            source,
        },
    })?;

    let mut ids = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            && stem.starts_with(prefix)
        {
            ids.push(stem.to_string());
        }
    }
    ids.sort();
    debug!(dir = %dir.display(), count = ids.len(), "discovered survey ids");
    Ok(ids)
}
