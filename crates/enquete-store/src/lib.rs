//! Storage layer: survey/answer JSON documents on disk and the batch that annotates them.

pub mod batch;
mod documents;
mod error;
pub mod layout;

pub use batch::{BatchReport, Outcome, ProcessError, annotate_survey, run_batch};
pub use documents::{DocumentStore, JsonDirStore, read_json, write_json_pretty};
pub use error::StoreError;
pub use layout::{PathLayout, SurveyIds};
