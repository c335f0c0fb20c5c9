//! Per-survey annotation batch.
//!
//! Each survey id is read, annotated and written independently. A failure on
//! one id is recorded as that id's [`Outcome`] and the batch moves on.

use enquete_core::{AnnotateError, AnnotateSummary, MissingQuestion, annotate};
use thiserror::Error;
use tracing::{debug, info};

use crate::{DocumentStore, StoreError};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Annotate(#[from] AnnotateError),
}

/// Result of processing one survey id.
#[derive(Debug)]
pub enum Outcome {
    Annotated(AnnotateSummary),
    /// An input document was absent; nothing was written.
    Skipped(StoreError),
    Failed(ProcessError),
}

impl Outcome {
    fn from_result(result: Result<AnnotateSummary, ProcessError>) -> Self {
        match result {
            Ok(summary) => Outcome::Annotated(summary),
            Err(ProcessError::Store(e)) if e.is_not_found() => Outcome::Skipped(e),
            Err(e) => Outcome::Failed(e),
        }
    }
}

/// Outcomes of a batch, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<(String, Outcome)>,
}

impl BatchReport {
    pub fn annotated(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Annotated(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Read, annotate and write back the answers of one survey id.
///
/// The answer document is only written when annotation succeeded.
pub fn annotate_survey<S: DocumentStore + ?Sized>(
    store: &S,
    survey_id: &str,
    policy: MissingQuestion,
) -> Result<AnnotateSummary, ProcessError> {
    let survey = store.read_survey(survey_id)?;
    let mut answers = store.read_answers(survey_id)?;
    let summary = annotate(&mut answers, &survey, policy)?;
    store.write_answers(survey_id, &answers)?;
    Ok(summary)
}

/// Annotate every id in `survey_ids`, calling `on_outcome` as each one finishes.
pub fn run_batch<S: DocumentStore + ?Sized>(
    store: &S,
    survey_ids: &[String],
    policy: MissingQuestion,
    mut on_outcome: impl FnMut(&str, &Outcome),
) -> BatchReport {
    let mut report = BatchReport::default();

    for survey_id in survey_ids {
        let outcome = Outcome::from_result(annotate_survey(store, survey_id, policy));
        // Per-id status is reported by `on_outcome`; these only show at debug level.
        match &outcome {
            Outcome::Annotated(s) => debug!(
                survey_id = %survey_id,
                records = s.records,
                details = s.details(),
                "annotated survey answers"
            ),
            Outcome::Skipped(e) => debug!(survey_id = %survey_id, reason = %e, "skipped survey"),
            Outcome::Failed(e) => debug!(survey_id = %survey_id, error = %e, "survey failed"),
        }
        on_outcome(survey_id, &outcome);
        report.outcomes.push((survey_id.clone(), outcome));
    }

    info!(
        annotated = report.annotated(),
        skipped = report.skipped(),
        failed = report.failed(),
        "batch complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JsonDirStore, PathLayout};
    use enquete_core::{AnswerRecord, SurveyDefinition};
    use serde_json::{Value, json};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::{self, Write};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// In-memory store. `read_only` makes every write fail.
    #[derive(Default)]
    struct MemoryStore {
        surveys: HashMap<String, Value>,
        answers: RefCell<HashMap<String, Value>>,
        read_only: bool,
    }

    impl DocumentStore for MemoryStore {
        fn read_survey(&self, id: &str) -> Result<SurveyDefinition, StoreError> {
            let doc = self
                .surveys
                .get(id)
                .ok_or_else(|| StoreError::NotFound(PathBuf::from(id)))?;
            serde_json::from_value(doc.clone()).map_err(|e| StoreError::decode(id.into(), e))
        }

        fn read_answers(&self, id: &str) -> Result<Vec<AnswerRecord>, StoreError> {
            let doc = self
                .answers
                .borrow()
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(PathBuf::from(id)))?;
            serde_json::from_value(doc).map_err(|e| StoreError::decode(id.into(), e))
        }

        fn write_answers(&self, id: &str, answers: &[AnswerRecord]) -> Result<(), StoreError> {
            if self.read_only {
                return Err(StoreError::Serialization {
                    path: id.into(),
                    reason: "read-only".into(),
                });
            }
            let doc = serde_json::to_value(answers).map_err(|e| StoreError::Serialization {
                path: id.into(),
                reason: e.to_string(),
            })?;
            self.answers.borrow_mut().insert(id.to_string(), doc);
            Ok(())
        }
    }

    fn survey_doc() -> Value {
        json!({ "details": [{ "text": "Do you like X?", "type": "boolean" }] })
    }

    fn answers_doc() -> Value {
        json!([{
            "answerId": "ANS_1",
            "details": [{ "question": "Do you like X?", "answer": "yes" }]
        }])
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let mut store = MemoryStore::default();
        store.surveys.insert("ok".into(), survey_doc());
        store.answers.get_mut().insert("ok".into(), answers_doc());
        store.surveys.insert("bad".into(), json!({ "title": "no details" }));
        store.answers.get_mut().insert("bad".into(), answers_doc());
        store.answers.get_mut().insert("orphan".into(), answers_doc());
        store.surveys.insert("last".into(), survey_doc());
        store.answers.get_mut().insert("last".into(), answers_doc());

        let mut seen = Vec::new();
        let report = run_batch(
            &store,
            &ids(&["bad", "orphan", "missing", "ok", "last"]),
            MissingQuestion::Strict,
            |id, _| seen.push(id.to_string()),
        );

        assert_eq!(seen, ["bad", "orphan", "missing", "ok", "last"]);
        assert_eq!(report.annotated(), 2);
        assert_eq!(report.skipped(), 2);
        assert_eq!(report.failed(), 1);
        assert!(matches!(
            report.outcomes[0].1,
            Outcome::Failed(ProcessError::Store(StoreError::Schema { .. }))
        ));

        let written = store.answers.borrow();
        assert_eq!(written["last"][0]["details"][0]["type"], "boolean");
        drop(written);
        // Untouched on schema failure.
        assert_eq!(store.answers.borrow()["bad"], answers_doc());
    }

    /// Log sink shared between the test and the subscriber.
    #[derive(Clone, Default)]
    struct LogSink(Arc<Mutex<Vec<u8>>>);

    impl Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn info_log_is_one_summary_line_per_batch() {
        let mut store = MemoryStore::default();
        store.surveys.insert("ok".into(), survey_doc());
        store.answers.get_mut().insert("ok".into(), answers_doc());
        store.surveys.insert("bad".into(), json!({}));
        store.answers.get_mut().insert("bad".into(), answers_doc());

        let sink = LogSink::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            run_batch(&store, &ids(&["ok", "missing", "bad"]), MissingQuestion::Strict, |_, _| {})
        });

        let logged = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<_> = logged.lines().collect();
        assert_eq!(lines.len(), 1, "{logged}");
        assert!(lines[0].contains("batch complete"));
    }

    #[test]
    fn missing_question_fails_strict_and_writes_nothing() {
        let mut store = MemoryStore::default();
        let doc = json!([{ "details": [{ "answer": "orphan" }] }]);
        store.surveys.insert("sv".into(), survey_doc());
        store.answers.get_mut().insert("sv".into(), doc.clone());

        let report = run_batch(&store, &ids(&["sv"]), MissingQuestion::Strict, |_, _| {});
        assert!(matches!(
            report.outcomes[0].1,
            Outcome::Failed(ProcessError::Annotate(AnnotateError::MissingField { .. }))
        ));
        assert_eq!(store.answers.borrow()["sv"], doc);

        let report = run_batch(&store, &ids(&["sv"]), MissingQuestion::Lenient, |_, _| {});
        assert!(matches!(report.outcomes[0].1, Outcome::Annotated(s) if s.skipped == 1));
    }

    #[test]
    fn write_failure_is_reported() {
        let mut store = MemoryStore {
            read_only: true,
            ..Default::default()
        };
        store.surveys.insert("sv".into(), survey_doc());
        store.answers.get_mut().insert("sv".into(), answers_doc());

        let report = run_batch(&store, &ids(&["sv"]), MissingQuestion::Strict, |_, _| {});
        assert!(matches!(
            report.outcomes[0].1,
            Outcome::Failed(ProcessError::Store(StoreError::Serialization { .. }))
        ));
    }

    #[test]
    fn annotates_files_on_disk() {
        let tmp = TempDir::new().unwrap();
        let layout = PathLayout::new(tmp.path().join("answers"), tmp.path().join("enquete"));
        std::fs::create_dir_all(&layout.answers_dir).unwrap();
        std::fs::create_dir_all(&layout.enquete_dir).unwrap();
        std::fs::write(
            layout.enquete_path("sv_0001_25060"),
            survey_doc().to_string(),
        )
        .unwrap();
        std::fs::write(
            layout.answer_path("sv_0001_25060"),
            json!([
                {
                    "answerId": "ANS_sv_0001_25060_001",
                    "details": [
                        { "question": "Do you like X?", "answer": "yes" },
                        { "question": "好きな色は？", "answer": ["赤", "青"] }
                    ],
                    "businessCard": { "group2": { "lastName": "佐藤" } }
                },
                { "answerId": "ANS_sv_0001_25060_002" }
            ])
            .to_string(),
        )
        .unwrap();

        let store = JsonDirStore::new(layout.clone());
        let summary = annotate_survey(&store, "sv_0001_25060", MissingQuestion::Strict).unwrap();
        assert_eq!(summary.matched, 1);
        assert_eq!(summary.inferred, 1);
        assert_eq!(summary.records_without_details, 1);

        let text = std::fs::read_to_string(layout.answer_path("sv_0001_25060")).unwrap();
        assert!(text.contains("好きな色は？"), "non-ASCII must be written verbatim");
        let written: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(written[0]["details"][0]["type"], "boolean");
        assert_eq!(written[0]["details"][1]["type"], "multi_answer");
        assert_eq!(written[0]["businessCard"]["group2"]["lastName"], "佐藤");
        assert_eq!(written[1], json!({ "answerId": "ANS_sv_0001_25060_002" }));
    }

    #[test]
    fn missing_enquete_on_disk_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let layout = PathLayout::new(tmp.path(), tmp.path().join("enquete"));
        std::fs::write(layout.answer_path("sv"), answers_doc().to_string()).unwrap();

        let store = JsonDirStore::new(layout);
        let report = run_batch(&store, &ids(&["sv"]), MissingQuestion::Strict, |_, _| {});
        assert_eq!(report.skipped(), 1);
    }
}
