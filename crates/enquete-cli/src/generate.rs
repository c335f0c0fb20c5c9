//! Fixture generator subcommands.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use clap::Args;
use enquete_gen::{AnswerGenConfig, DashboardConfig, ImageSetConfig};
use enquete_store::{StoreError, read_json, write_json_pretty};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;
use tracing::{info, warn};

/// Random seed; a fresh one is drawn and logged when omitted.
#[derive(Args, Debug, Clone, Copy)]
pub struct SeedArg {
    #[arg(long, env = "ENQUETE_SEED")]
    pub seed: Option<u64>,
}

impl SeedArg {
    fn rng(self) -> StdRng {
        let seed = self.seed.unwrap_or_else(rand::random);
        info!(seed, "random seed");
        StdRng::seed_from_u64(seed)
    }
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
}

fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
}

// ── dummy-answers ──

#[derive(Args, Debug)]
pub struct DummyAnswersArgs {
    /// Output answer document (overwritten)
    #[arg(long)]
    pub output: PathBuf,

    #[arg(long, default_value = "sv_0001_25060")]
    pub survey_id: String,

    #[arg(long, default_value_t = 500)]
    pub count: usize,

    /// Earliest answer time, `YYYY-MM-DDTHH:MM:SS`
    #[arg(long, default_value = "2025-11-01T09:00:00", value_parser = parse_datetime)]
    pub start: NaiveDateTime,

    /// Latest answer time, `YYYY-MM-DDTHH:MM:SS`
    #[arg(long, default_value = "2025-11-30T18:00:00", value_parser = parse_datetime)]
    pub end: NaiveDateTime,

    #[command(flatten)]
    pub seed: SeedArg,
}

pub fn dummy_answers(args: DummyAnswersArgs) -> anyhow::Result<()> {
    match read_json::<Vec<Value>>(&args.output) {
        Ok(existing) => info!(records = existing.len(), "loaded existing records"),
        Err(StoreError::NotFound(_)) => {}
        Err(e) => warn!(error = %e, "existing answer file unreadable, overwriting"),
    }

    let config = AnswerGenConfig {
        count: args.count,
        start: args.start,
        end: args.end,
        ..AnswerGenConfig::new(args.survey_id)
    };
    let answers = enquete_gen::generate_answers(&mut args.seed.rng(), &config)
        .context("generating answers")?;
    write_json_pretty(&args.output, &answers)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!(
        "Successfully generated {} records to {}",
        answers.len(),
        args.output.display()
    );
    Ok(())
}

// ── performance ──

#[derive(Args, Debug)]
pub struct PerformanceArgs {
    /// Output dashboard document (overwritten)
    #[arg(long, default_value = "data/admin/performance.json")]
    pub output: PathBuf,

    #[arg(long, default_value_t = 42)]
    pub operators: u32,

    #[command(flatten)]
    pub seed: SeedArg,
}

pub fn performance(args: PerformanceArgs) -> anyhow::Result<()> {
    let config = DashboardConfig {
        operator_count: args.operators,
        ..Default::default()
    };
    let dashboard = enquete_gen::generate_dashboard(&mut args.seed.rng(), &config);
    write_json_pretty(&args.output, &dashboard)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!(
        "Generated {} operators in {}",
        dashboard.operators.len(),
        args.output.display()
    );
    Ok(())
}

// ── extend-history ──

#[derive(Args, Debug)]
pub struct ExtendHistoryArgs {
    /// Dashboard document to extend in place
    #[arg(long, default_value = "data/admin/performance.json")]
    pub input: PathBuf,

    /// First day, `YYYY-MM-DD`
    #[arg(long, default_value = "2026-01-01", value_parser = parse_date)]
    pub from: NaiveDate,

    /// Last day (inclusive), `YYYY-MM-DD`
    #[arg(long, default_value = "2026-01-31", value_parser = parse_date)]
    pub to: NaiveDate,

    #[command(flatten)]
    pub seed: SeedArg,
}

pub fn extend_history(args: ExtendHistoryArgs) -> anyhow::Result<()> {
    let mut doc: Value =
        read_json(&args.input).with_context(|| format!("loading {}", args.input.display()))?;

    println!("Generating data for period: {} to {}", args.from, args.to);
    let extended = enquete_gen::extend_history(&mut doc, &mut args.seed.rng(), args.from, args.to)
        .context("extending operator history")?;
    write_json_pretty(&args.input, &doc)
        .with_context(|| format!("writing {}", args.input.display()))?;

    println!(
        "Successfully updated {} ({extended} operators) with {}..{} data.",
        args.input.display(),
        args.from,
        args.to
    );
    Ok(())
}

// ── csv-to-json ──

#[derive(Args, Debug)]
pub struct CsvToJsonArgs {
    /// CSV file to read [default: stdin]
    #[arg(long)]
    pub input: Option<PathBuf>,
}

pub fn csv_to_json(args: CsvToJsonArgs) -> anyhow::Result<()> {
    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    println!("{}", enquete_gen::csv_to_json(&text).context("converting CSV")?);
    Ok(())
}

// ── images ──

#[derive(Args, Debug)]
pub struct ImagesArgs {
    /// Base directory; images go to `<output-dir>/<survey-id>/`
    #[arg(long, default_value = "media/generated")]
    pub output_dir: PathBuf,

    #[arg(long, default_value = "sv_0001_26009")]
    pub survey_id: String,

    #[arg(long, default_value_t = 900)]
    pub count: u32,

    #[command(flatten)]
    pub seed: SeedArg,
}

pub fn images(args: ImagesArgs) -> anyhow::Result<()> {
    let config = ImageSetConfig {
        count: args.count,
        ..ImageSetConfig::new(args.survey_id, args.output_dir)
    };
    println!("Generating images for {}...", config.survey_id);
    let summary = enquete_gen::generate_images(&mut args.seed.rng(), &config)
        .context("generating images")?;
    println!(
        "Done! {} sets ({} files) in {}",
        summary.sets,
        summary.files,
        summary.target_dir.display()
    );
    Ok(())
}
