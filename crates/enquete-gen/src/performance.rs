//! Operator performance dashboard (`performance.json`).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::history::DailyStat;
use crate::pools::{OPERATOR_FIRST_NAMES, OPERATOR_GROUPS, OPERATOR_LAST_NAMES};
use crate::{pick, round1, round2};

const STATUS_MET: &str = "達成";
const STATUS_MISSED: &str = "未達";
const MIN_PROCESSED: u32 = 350;
const MAX_ERROR_RATE: f64 = 0.02;
const BASE_AVG_TIME: f64 = 250.0;
/// Capacity assumed per active operator when sizing a group.
const CAPACITY_PER_OPERATOR: u32 = 450;

struct OperatorTemplate {
    last_name: &'static str,
    first_name: &'static str,
    group: &'static str,
    base_processed: f64,
    base_error_rate: f64,
}

const TEMPLATES: [OperatorTemplate; 3] = [
    OperatorTemplate {
        last_name: "山田",
        first_name: "向日葵",
        group: "展示会Aチーム",
        base_processed: 420.0,
        base_error_rate: 0.012,
    },
    OperatorTemplate {
        last_name: "鈴木",
        first_name: "蒼",
        group: "展示会Aチーム",
        base_processed: 315.0,
        base_error_rate: 0.038,
    },
    OperatorTemplate {
        last_name: "佐藤",
        first_name: "健太",
        group: "セミナーBチーム",
        base_processed: 510.0,
        base_error_rate: 0.006,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceDashboard {
    pub summary: Summary,
    pub parameters: Parameters,
    pub operators: Vec<Operator>,
    pub groups: Vec<GroupSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_payment: u64,
    pub last_month_comparison: f64,
    pub active_users: u32,
    pub total_users: u32,
    pub total_processed: u64,
    pub error_rate: f64,
    pub avg_time: u32,
    pub max_capacity: u64,
    pub cost_performance: f64,
    pub on_time_rate: f64,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            total_payment: 1_250_000,
            last_month_comparison: 5.2,
            active_users: 42,
            total_users: 50,
            total_processed: 15_600,
            error_rate: 1.2,
            avg_time: 245,
            max_capacity: 18_000,
            cost_performance: 0.85,
            on_time_rate: 98.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    pub target_processed: u32,
    pub target_error_rate: f64,
    pub target_avg_time: u32,
    pub unit_price: u64,
    pub correction_cost: u64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            target_processed: 400,
            target_error_rate: 1.5,
            target_avg_time: 250,
            unit_price: 100,
            correction_cost: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub id: String,
    pub name: String,
    pub group: String,
    pub processed: u32,
    pub errors: u32,
    pub valid: u32,
    /// `HH:MM:SS` of `avg_time * processed` seconds.
    pub work_time: String,
    pub avg_time: u32,
    pub est_payment: u64,
    pub status: String,
    pub on_time_rate: f64,
    pub error_types: ErrorTypes,
    pub history: Vec<DailyStat>,
}

/// Error share per business card field, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorTypes {
    pub name: f64,
    pub company: f64,
    pub address: f64,
    pub phone: f64,
    pub email: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub id: String,
    pub name: String,
    pub active_users: u32,
    pub total_users: u32,
    pub max_capacity: u32,
    pub avg_time: u32,
    pub quality_variance: f64,
    pub cost_performance: f64,
    pub on_time_rate: f64,
    pub operators: Vec<GroupOperator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupOperator {
    pub name: String,
    pub avg_time: u32,
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub operator_count: u32,
    pub summary: Summary,
    pub parameters: Parameters,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            operator_count: 42,
            summary: Summary::default(),
            parameters: Parameters::default(),
        }
    }
}

pub fn generate_dashboard<R: Rng + ?Sized>(
    rng: &mut R,
    config: &DashboardConfig,
) -> PerformanceDashboard {
    let operators: Vec<Operator> = (1..=config.operator_count)
        .map(|i| generate_operator(rng, i, config.parameters.unit_price))
        .collect();

    let groups = OPERATOR_GROUPS
        .iter()
        .enumerate()
        .filter_map(|(g, name)| summarise_group(rng, g, name, &operators))
        .collect();

    PerformanceDashboard {
        summary: config.summary.clone(),
        parameters: config.parameters.clone(),
        operators,
        groups,
    }
}

fn generate_operator<R: Rng + ?Sized>(rng: &mut R, index: u32, unit_price: u64) -> Operator {
    let template = &TEMPLATES[index as usize % TEMPLATES.len()];
    let (name, group) = if index <= 3 {
        (
            format!("{} {}", template.last_name, template.first_name),
            template.group,
        )
    } else {
        (
            format!(
                "{} {}",
                pick(rng, OPERATOR_LAST_NAMES),
                pick(rng, OPERATOR_FIRST_NAMES)
            ),
            pick(rng, OPERATOR_GROUPS),
        )
    };

    let processed = (template.base_processed * rng.gen_range(0.8..=1.2)) as u32;
    let error_rate = template.base_error_rate * rng.gen_range(0.5..=1.5);
    let errors = (processed as f64 * error_rate) as u32;
    let valid = processed - errors;
    let avg_time = (BASE_AVG_TIME * rng.gen_range(0.8..=1.2)) as u32;

    let status = if processed < MIN_PROCESSED || error_rate > MAX_ERROR_RATE {
        STATUS_MISSED
    } else {
        STATUS_MET
    };
    let on_time_rate = round1(rng.gen_range(90.0..=100.0));

    let mut error_type = || round1(rng.gen_range(0.0..=2.0));
    let error_types = ErrorTypes {
        name: error_type(),
        company: error_type(),
        address: error_type(),
        phone: error_type(),
        email: error_type(),
    };

    let history = (1..=5)
        .map(|day| DailyStat {
            date: format!("2025-09-{day:02}"),
            processed: (processed as f64 / 10.0 * rng.gen_range(0.8..=1.2)) as u32,
            error_rate: round1(error_rate * 100.0 * rng.gen_range(0.8..=1.2)),
        })
        .collect();

    Operator {
        id: format!("OP{index:03}"),
        name,
        group: group.to_string(),
        processed,
        errors,
        valid,
        work_time: work_time(avg_time as u64 * processed as u64),
        avg_time,
        est_payment: valid as u64 * unit_price,
        status: status.to_string(),
        on_time_rate,
        error_types,
        history,
    }
}

fn summarise_group<R: Rng + ?Sized>(
    rng: &mut R,
    index: usize,
    name: &str,
    operators: &[Operator],
) -> Option<GroupSummary> {
    let members: Vec<&Operator> = operators.iter().filter(|op| op.group == name).collect();
    if members.is_empty() {
        return None;
    }

    let active = members.len() as u32;
    let avg_time = members.iter().map(|op| op.avg_time).sum::<u32>() / active;

    Some(GroupSummary {
        id: format!("GR{:03}", index + 1),
        name: name.to_string(),
        active_users: active,
        total_users: (active as f64 * 1.2) as u32,
        max_capacity: active * CAPACITY_PER_OPERATOR,
        avg_time,
        quality_variance: round1(rng.gen_range(0.5..=2.0)),
        cost_performance: round2(rng.gen_range(0.8..=1.1)),
        on_time_rate: round1(rng.gen_range(95.0..=100.0)),
        operators: members
            .iter()
            .map(|op| GroupOperator {
                name: op.name.clone(),
                avg_time: op.avg_time,
                accuracy: accuracy(op),
            })
            .collect(),
    })
}

fn accuracy(op: &Operator) -> f64 {
    if op.processed == 0 {
        return 100.0;
    }
    round1(100.0 - op.errors as f64 / op.processed as f64 * 100.0)
}

fn work_time(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
