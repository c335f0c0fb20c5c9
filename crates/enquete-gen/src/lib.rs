//! Fixture generators. Every generator takes its random source explicitly so a
//! seeded `StdRng` reproduces the same documents.

pub mod answers;
pub mod csv_json;
mod error;
pub mod history;
pub mod images;
pub mod performance;
mod pools;

pub use answers::{AnswerGenConfig, BusinessCard, DummyAnswer, QuestionPool, generate_answers};
pub use csv_json::{csv_to_json, csv_to_rows};
pub use error::GenError;
pub use history::{DailyStat, extend_history, generate_daily_history};
pub use images::{ImageKind, ImageSetConfig, ImageSetSummary, generate_images, render};
pub use performance::{DashboardConfig, PerformanceDashboard, generate_dashboard};
pub use pools::default_question_bank;

use rand::Rng;

/// Uniform pick from a non-empty pool.
pub(crate) fn pick<'a, T: ?Sized, R: Rng + ?Sized>(rng: &mut R, pool: &'a [&'a T]) -> &'a T {
    pool[rng.gen_range(0..pool.len())]
}

/// Round to one decimal place.
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Round to two decimal places.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
