//! Question type annotation.
//!
//! Joins an answer document against its survey definition by exact question
//! text and writes a `type` tag onto every answer detail. Questions the survey
//! does not define get a tag inferred from the answer's shape.
//!
//! The annotator mutates the answer records it is given. There is no copying
//! variant; callers that need the unannotated records must clone first.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::AnnotateError;
use crate::survey::{
    AnswerRecord, MULTI_ANSWER, QuestionDefinition, SINGLE_ANSWER, SurveyDefinition,
};

/// What to do with an answer detail that has no `question`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingQuestion {
    /// Fail the whole document. Nothing is mutated.
    #[default]
    Strict,
    /// Log a warning and leave that detail's `type` as it was.
    Lenient,
}

/// Counts from one [`annotate`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotateSummary {
    pub records: usize,
    pub records_without_details: usize,
    /// Details whose question was found in the survey definition.
    pub matched: usize,
    /// Details typed from the shape of their answer.
    pub inferred: usize,
    /// Details skipped under [`MissingQuestion::Lenient`].
    pub skipped: usize,
}

impl AnnotateSummary {
    pub fn details(&self) -> usize {
        self.matched + self.inferred + self.skipped
    }
}

/// Index a survey's questions by text. On duplicate text the last definition wins.
pub fn question_index(survey: &SurveyDefinition) -> HashMap<&str, &QuestionDefinition> {
    survey
        .details
        .iter()
        .map(|q| (q.text.as_str(), q))
        .collect()
}

/// Type tag for an answer with no matching question: lists are multi-answer,
/// anything else (including an absent answer) is single-answer.
pub fn infer_type(answer: Option<&Value>) -> &'static str {
    match answer {
        Some(Value::Array(_)) => MULTI_ANSWER,
        _ => SINGLE_ANSWER,
    }
}

/// Annotate every answer detail in `answers` with a type tag from `survey`.
///
/// Records without `details` are counted and left untouched. Re-running with
/// the same survey produces the same tags.
pub fn annotate(
    answers: &mut [AnswerRecord],
    survey: &SurveyDefinition,
    policy: MissingQuestion,
) -> Result<AnnotateSummary, AnnotateError> {
    if policy == MissingQuestion::Strict {
        check_questions(answers)?;
    }

    let index = question_index(survey);
    let mut summary = AnnotateSummary {
        records: answers.len(),
        ..Default::default()
    };

    for (r, record) in answers.iter_mut().enumerate() {
        let Some(details) = record.details.as_mut() else {
            summary.records_without_details += 1;
            continue;
        };

        for (d, detail) in details.iter_mut().enumerate() {
            let Some(question) = detail.question.as_deref() else {
                warn!(record = r, detail = d, "answer detail has no question, skipped");
                summary.skipped += 1;
                continue;
            };

            let kind = match index.get(question) {
                Some(def) => {
                    summary.matched += 1;
                    def.kind.clone()
                }
                None => {
                    summary.inferred += 1;
                    infer_type(detail.answer()).to_string()
                }
            };
            detail.set_kind(kind);
        }
    }

    debug!(
        records = summary.records,
        matched = summary.matched,
        inferred = summary.inferred,
        skipped = summary.skipped,
        "annotated answer document"
    );
    Ok(summary)
}

fn check_questions(answers: &[AnswerRecord]) -> Result<(), AnnotateError> {
    for (r, record) in answers.iter().enumerate() {
        let Some(details) = record.details.as_ref() else {
            continue;
        };
        if let Some(d) = details.iter().position(|detail| detail.question.is_none()) {
            return Err(AnnotateError::MissingField {
                record: r,
                detail: d,
                field: "question",
            });
        }
    }
    Ok(())
}
