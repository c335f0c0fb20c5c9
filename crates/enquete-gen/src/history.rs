//! Daily processing history, and extension of an existing dashboard with it.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{GenError, round1};

const DAY_OFF_PROBABILITY: f64 = 0.1;
const LOW_ERROR_PROBABILITY: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    /// `%Y-%m-%d`
    pub date: String,
    pub processed: u32,
    /// Percent, one decimal.
    pub error_rate: f64,
}

/// One stat per day in `[start, end]`. Roughly one day in ten is a day off.
pub fn generate_daily_history<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<DailyStat> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| {
            let mut processed = rng.gen_range(20..=70);
            let error_rate = if rng.gen_bool(DAY_OFF_PROBABILITY) {
                processed = 0;
                0.0
            } else if rng.gen_bool(LOW_ERROR_PROBABILITY) {
                round1(rng.gen_range(0.0..=1.5))
            } else {
                round1(rng.gen_range(1.5..=5.0))
            };
            DailyStat {
                date: day.format("%Y-%m-%d").to_string(),
                processed,
                error_rate,
            }
        })
        .collect()
}

/// Append fresh daily history for `[start, end]` to every operator of a
/// performance document, creating `history` where it is missing.
///
/// Everything else in the document is left as it is; the summary figures are
/// recomputed by the consumer from the filtered history. Returns the number of
/// operators extended.
pub fn extend_history<R: Rng + ?Sized>(
    doc: &mut Value,
    rng: &mut R,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<usize, GenError> {
    if start > end {
        return Err(GenError::DateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let root = doc
        .as_object_mut()
        .ok_or_else(|| GenError::Shape("performance document is not an object".into()))?;
    let Some(operators) = root.get_mut("operators") else {
        return Ok(0);
    };
    let operators = operators
        .as_array_mut()
        .ok_or_else(|| GenError::Shape("`operators` is not an array".into()))?;

    let mut extended = 0;
    for (i, op) in operators.iter_mut().enumerate() {
        let Some(op) = op.as_object_mut() else {
            warn!(index = i, "operator entry is not an object, skipped");
            continue;
        };
        let history = op
            .entry("history")
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()
            .ok_or_else(|| GenError::Shape(format!("operator {i}: `history` is not an array")))?;
        for stat in generate_daily_history(rng, start, end) {
            history.push(serde_json::to_value(stat)?);
        }
        extended += 1;
    }

    debug!(operators = extended, %start, %end, "extended operator history");
    Ok(extended)
}
