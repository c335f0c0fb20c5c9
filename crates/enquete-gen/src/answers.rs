//! Dummy answer documents for a survey, with business card data per respondent.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use enquete_core::AnswerDetail;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::pools::{
    CARD_FIRST_NAMES, CARD_LAST_NAMES, COMPANY_NAMES, DEPARTMENTS, EMAIL_USERS, POSITIONS, YES_NO,
};
use crate::{GenError, pick, pools};

/// Answers are stamped inside this many hours after midnight UTC (09:00–17:00 JST).
const BUSINESS_HOURS: i64 = 8;

/// A question and the answers a dummy respondent may give to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPool {
    text: String,
    options: Vec<String>,
}

impl QuestionPool {
    /// An empty option list falls back to yes/no.
    pub fn new<I, S>(text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options: Vec<String> = options.into_iter().map(Into::into).collect();
        if options.is_empty() {
            options = YES_NO.iter().map(|s| s.to_string()).collect();
        }
        Self {
            text: text.into(),
            options,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }
}

#[derive(Debug, Clone)]
pub struct AnswerGenConfig {
    pub survey_id: String,
    pub count: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub questions: Vec<QuestionPool>,
}

impl AnswerGenConfig {
    /// 500 answers over November 2025 against the default question bank.
    pub fn new(survey_id: impl Into<String>) -> Self {
        let day = |d| NaiveDate::from_ymd_opt(2025, 11, d).unwrap_or_default();
        Self {
            survey_id: survey_id.into(),
            count: 500,
            start: day(1).and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()),
            end: day(30).and_time(NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default()),
            questions: pools::default_question_bank(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DummyAnswer {
    pub answer_id: String,
    pub survey_id: String,
    /// `%Y-%m-%dT%H:%M:%SZ`
    pub answered_at: String,
    pub is_test: bool,
    pub details: Vec<AnswerDetail>,
    pub business_card: BusinessCard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCard {
    pub group1: ContactGroup,
    pub group2: NameGroup,
    pub group3: CompanyGroup,
    pub group5: PhoneGroup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactGroup {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameGroup {
    pub last_name: String,
    pub first_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyGroup {
    pub company_name: String,
    pub department: String,
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneGroup {
    pub mobile: String,
    pub tel1: String,
}

/// Generate `config.count` answers, sorted by `answeredAt`.
pub fn generate_answers<R: Rng + ?Sized>(
    rng: &mut R,
    config: &AnswerGenConfig,
) -> Result<Vec<DummyAnswer>, GenError> {
    if config.start > config.end {
        return Err(GenError::DateRange {
            start: config.start.to_string(),
            end: config.end.to_string(),
        });
    }

    let mut answers: Vec<DummyAnswer> = (1..=config.count)
        .map(|i| {
            let details = config
                .questions
                .iter()
                .map(|q| {
                    let answer = &q.options[rng.gen_range(0..q.options.len())];
                    AnswerDetail::new(q.text.as_str(), answer.as_str())
                })
                .collect();

            DummyAnswer {
                answer_id: format!("ANS_{}_{i:03}", config.survey_id),
                survey_id: config.survey_id.clone(),
                answered_at: answered_at(rng, config.start, config.end)
                    .format("%Y-%m-%dT%H:%M:%SZ")
                    .to_string(),
                is_test: false,
                details,
                business_card: business_card(rng, i),
            }
        })
        .collect();

    answers.sort_by(|a, b| a.answered_at.cmp(&b.answered_at));
    Ok(answers)
}

/// A random day in `[start, end]` at a random second within business hours,
/// pulled back an hour before `end` if it lands past it.
fn answered_at<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> NaiveDateTime {
    let days = (end - start).num_days();
    let day = start.date() + TimeDelta::days(rng.gen_range(0..=days));
    let at = day.and_time(NaiveTime::MIN)
        + TimeDelta::seconds(rng.gen_range(0..=BUSINESS_HOURS * 3600));
    if at > end { end - TimeDelta::hours(1) } else { at }
}

fn business_card<R: Rng + ?Sized>(rng: &mut R, index: usize) -> BusinessCard {
    let last_name = pick(rng, CARD_LAST_NAMES).to_string();
    let first_name = pick(rng, CARD_FIRST_NAMES).to_string();
    BusinessCard {
        group1: ContactGroup {
            email: format!("{}{index}@example.com", pick(rng, EMAIL_USERS)),
        },
        group2: NameGroup {
            last_name,
            first_name,
        },
        group3: CompanyGroup {
            company_name: pick(rng, COMPANY_NAMES).to_string(),
            department: pick(rng, DEPARTMENTS).to_string(),
            position: pick(rng, POSITIONS).to_string(),
        },
        group5: PhoneGroup {
            mobile: format!(
                "090-{}-{}",
                rng.gen_range(1000..=9999),
                rng.gen_range(1000..=9999)
            ),
            tel1: format!(
                "03-{}-{}",
                rng.gen_range(1000..=9999),
                rng.gen_range(1000..=9999)
            ),
        },
    }
}
