//! Survey and answer documents, and the question type annotator that joins them.

pub mod annotate;
pub mod error;
pub mod survey;

pub use annotate::{AnnotateSummary, MissingQuestion, annotate, infer_type, question_index};
pub use error::AnnotateError;
pub use survey::{
    AnswerDetail, AnswerRecord, MULTI_ANSWER, QuestionDefinition, SINGLE_ANSWER, SurveyDefinition,
};
