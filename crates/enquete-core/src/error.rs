use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnnotateError {
    /// Indices are zero-based positions in the answer document.
    #[error("answer record {record}, detail {detail}: missing field `{field}`")]
    MissingField {
        record: usize,
        detail: usize,
        field: &'static str,
    },
}
