use enquete_core::{
    AnswerDetail, AnswerRecord, MULTI_ANSWER, MissingQuestion, QuestionDefinition, SINGLE_ANSWER,
    SurveyDefinition, annotate,
};
use proptest::prelude::*;
use proptest::test_runner::Config;
use serde_json::{Value, json};

fn answer_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z]{0,6}".prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        prop::collection::vec("[a-z]{1,4}", 0..4).prop_map(|v| json!(v)),
    ]
}

fn survey() -> impl Strategy<Value = SurveyDefinition> {
    prop::collection::vec(("Q[0-9]", "[a-z_]{1,8}"), 0..8).prop_map(|pairs| SurveyDefinition {
        details: pairs
            .into_iter()
            .map(|(text, kind)| QuestionDefinition::new(text, kind))
            .collect(),
    })
}

fn answers() -> impl Strategy<Value = Vec<AnswerRecord>> {
    let detail = ("Q[0-9]|U[0-9]", answer_value()).prop_map(|(q, a)| AnswerDetail::new(q, a));
    let record = prop::option::of(prop::collection::vec(detail, 0..6)).prop_map(|details| {
        AnswerRecord {
            details,
            ..Default::default()
        }
    });
    prop::collection::vec(record, 0..6)
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn every_detail_gets_the_joined_or_inferred_type(
        survey in survey(),
        mut data in answers(),
    ) {
        annotate(&mut data, &survey, MissingQuestion::Strict).unwrap();

        for record in &data {
            for detail in record.details.iter().flatten() {
                let question = detail.question.as_deref().unwrap();
                let expected = match survey.details.iter().rev().find(|q| q.text == question) {
                    Some(q) => q.kind.as_str(),
                    None if detail.answer().is_some_and(Value::is_array) => MULTI_ANSWER,
                    None => SINGLE_ANSWER,
                };
                prop_assert_eq!(detail.kind.as_deref(), Some(expected));
            }
        }
    }

    #[test]
    fn annotation_is_idempotent(survey in survey(), mut data in answers()) {
        annotate(&mut data, &survey, MissingQuestion::Strict).unwrap();
        let once = data.clone();
        annotate(&mut data, &survey, MissingQuestion::Strict).unwrap();
        prop_assert_eq!(once, data);
    }

    #[test]
    fn details_are_never_dropped(survey in survey(), mut data in answers()) {
        let before: Vec<Option<usize>> =
            data.iter().map(|r| r.details.as_ref().map(Vec::len)).collect();
        annotate(&mut data, &survey, MissingQuestion::Strict).unwrap();
        let after: Vec<Option<usize>> =
            data.iter().map(|r| r.details.as_ref().map(Vec::len)).collect();
        prop_assert_eq!(before, after);
    }
}
