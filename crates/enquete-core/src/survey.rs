//! Survey definition ("enquete") and answer document types.
//!
//! Only the fields the annotator reads are typed. Everything else on an
//! answer record or answer detail is kept in a flattened map so that a
//! read-annotate-write cycle passes unknown fields through untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Fallback tag for an unmatched question whose answer is a single value.
pub const SINGLE_ANSWER: &str = "single_answer";
/// Fallback tag for an unmatched question whose answer is a list.
pub const MULTI_ANSWER: &str = "multi_answer";

/// One question of a survey definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    /// Literal question text, the join key against [`AnswerDetail::question`].
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl QuestionDefinition {
    pub fn new(text: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: kind.into(),
        }
    }
}

/// A survey definition document: `{ "details": [ { "text", "type" }, ... ] }`.
///
/// `details` is required. Other top-level fields of the document are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurveyDefinition {
    pub details: Vec<QuestionDefinition>,
}

/// One question/answer pair inside an [`AnswerRecord`].
///
/// Serialises as `question`, then the pass-through fields (normally just
/// `answer`), then `type`. A `"type": null` on input stays in `fields` until a
/// tag is set with [`AnswerDetail::set_kind`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawDetail")]
pub struct AnswerDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl AnswerDetail {
    pub fn new(question: impl Into<String>, answer: impl Into<Value>) -> Self {
        let mut fields = Map::new();
        fields.insert("answer".to_string(), answer.into());
        Self {
            question: Some(question.into()),
            fields,
            kind: None,
        }
    }

    /// The `answer` value, if the detail carries one.
    pub fn answer(&self) -> Option<&Value> {
        self.fields.get("answer")
    }

    /// Set the type tag, replacing an explicit `null` carried over from input.
    pub fn set_kind(&mut self, kind: impl Into<String>) {
        self.fields.shift_remove("type");
        self.kind = Some(kind.into());
    }
}

/// One respondent's submission. Records without `details` are valid.
///
/// `"details": null` reads as no details; the `null` itself is kept in
/// `fields` so the record is written back as it was read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawRecord")]
pub struct AnswerRecord {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<AnswerDetail>>,
}

impl AnswerRecord {
    pub fn with_details(details: Vec<AnswerDetail>) -> Self {
        Self {
            fields: Map::new(),
            details: Some(details),
        }
    }
}

// Input shapes that tell an absent key apart from an explicit `null`.

#[derive(Deserialize)]
struct RawDetail {
    #[serde(default)]
    question: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
    #[serde(rename = "type", default, deserialize_with = "present")]
    kind: Option<Option<String>>,
}

impl From<RawDetail> for AnswerDetail {
    fn from(raw: RawDetail) -> Self {
        let mut fields = raw.fields;
        let kind = keep_null(&mut fields, "type", raw.kind);
        Self {
            question: raw.question,
            fields,
            kind,
        }
    }
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(flatten)]
    fields: Map<String, Value>,
    #[serde(default, deserialize_with = "present")]
    details: Option<Option<Vec<AnswerDetail>>>,
}

impl From<RawRecord> for AnswerRecord {
    fn from(raw: RawRecord) -> Self {
        let mut fields = raw.fields;
        let details = keep_null(&mut fields, "details", raw.details);
        Self { fields, details }
    }
}

/// Wraps a present field in `Some`, so `null` reads as `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn keep_null<T>(
    fields: &mut Map<String, Value>,
    key: &str,
    value: Option<Option<T>>,
) -> Option<T> {
    if let Some(None) = value {
        fields.insert(key.to_string(), Value::Null);
    }
    value.flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn survey_ignores_unknown_fields() {
        let survey: SurveyDefinition = serde_json::from_value(json!({
            "id": "sv_0001_25060",
            "title": "製品アンケート",
            "details": [{ "text": "Q1", "type": "single_answer", "options": ["a"] }]
        }))
        .unwrap();
        assert_eq!(survey.details, vec![QuestionDefinition::new("Q1", "single_answer")]);
    }

    #[test]
    fn survey_without_details_is_rejected() {
        let err = serde_json::from_value::<SurveyDefinition>(json!({ "title": "x" })).unwrap_err();
        assert!(err.to_string().contains("details"));
    }

    #[test]
    fn record_keeps_pass_through_fields() {
        let input = json!({
            "answerId": "ANS_1",
            "isTest": false,
            "details": [{ "question": "Q1", "answer": ["a", "b"], "note": 3 }],
            "businessCard": { "group1": { "email": "a@example.com" } }
        });
        let record: AnswerRecord = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(record.fields.len(), 3);

        let details = record.details.as_ref().unwrap();
        assert_eq!(details[0].question.as_deref(), Some("Q1"));
        assert_eq!(details[0].answer(), Some(&json!(["a", "b"])));
        assert_eq!(details[0].fields["note"], json!(3));

        assert_eq!(serde_json::to_value(&record).unwrap(), input);
    }

    #[test]
    fn pass_through_keys_keep_order_before_typed_keys() {
        let text = r#"{"details":[{"type":"x","question":"Q","answer":"a"}],"b":1,"a":2}"#;
        let record: AnswerRecord = serde_json::from_str(text).unwrap();
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"b":1,"a":2,"details":[{"question":"Q","answer":"a","type":"x"}]}"#
        );
    }

    #[test]
    fn record_without_details_serialises_without_details() {
        let input = json!({ "answerId": "ANS_2" });
        let record: AnswerRecord = serde_json::from_value(input.clone()).unwrap();
        assert!(record.details.is_none());
        assert_eq!(serde_json::to_value(&record).unwrap(), input);
    }

    #[test]
    fn detail_type_is_written_last() {
        let mut detail = AnswerDetail::new("Q1", "はい");
        detail.kind = Some(SINGLE_ANSWER.to_string());
        let text = serde_json::to_string(&detail).unwrap();
        assert_eq!(
            text,
            r#"{"question":"Q1","answer":"はい","type":"single_answer"}"#
        );
    }

    #[test]
    fn null_details_and_null_type_are_written_back() {
        let input = json!({ "answerId": "A1", "details": null });
        let record: AnswerRecord = serde_json::from_value(input.clone()).unwrap();
        assert!(record.details.is_none());
        assert_eq!(serde_json::to_value(&record).unwrap(), input);

        let input = json!({ "question": "Q1", "answer": "a", "type": null });
        let mut detail: AnswerDetail = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(detail.kind, None);
        assert_eq!(serde_json::to_value(&detail).unwrap(), input);

        detail.set_kind(SINGLE_ANSWER);
        assert_eq!(
            serde_json::to_string(&detail).unwrap(),
            r#"{"question":"Q1","answer":"a","type":"single_answer"}"#
        );
    }

    #[test]
    fn question_definition_needs_text_and_type() {
        let no_type = json!({ "details": [{ "text": "Q1" }] });
        let no_text = json!({ "details": [{ "type": "boolean" }] });
        for doc in [no_type, no_text] {
            let err = serde_json::from_value::<SurveyDefinition>(doc).unwrap_err();
            assert!(err.is_data(), "got {err}");
        }
    }

    #[test]
    fn null_answer_is_preserved() {
        let input = json!({ "question": "Q1", "answer": null });
        let detail: AnswerDetail = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(detail.answer(), Some(&Value::Null));
        assert_eq!(serde_json::to_value(&detail).unwrap(), input);
    }
}
