//! `enquete annotate`: add question types to every survey's answer file.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Args;
use enquete_core::MissingQuestion;
use enquete_store::{JsonDirStore, Outcome, PathLayout, SurveyIds, run_batch};

#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Directory of `<survey_id>.json` answer files (rewritten in place)
    #[arg(long, env = "ENQUETE_ANSWERS_DIR")]
    pub answers_dir: PathBuf,

    /// Directory of `<survey_id>.json` enquete (survey definition) files
    #[arg(long, env = "ENQUETE_ENQUETE_DIR")]
    pub enquete_dir: PathBuf,

    /// Survey ids to process (comma separated or repeated)
    #[arg(long = "id", value_delimiter = ',', conflicts_with_all = ["discover", "range"])]
    pub ids: Vec<String>,

    /// Discover survey ids from `<prefix>*.json` files in this directory
    /// [default: the answers directory]
    #[arg(long, conflicts_with = "range")]
    pub discover: Option<PathBuf>,

    /// Id prefix for --discover and --range
    #[arg(long, default_value = "sv_")]
    pub prefix: String,

    /// Numbered ids, e.g. `1..=30` with `--prefix SURVEY_` gives SURVEY_001..SURVEY_030
    #[arg(long)]
    pub range: Option<IdRange>,

    /// Zero-padding width for --range numbers
    #[arg(long, default_value_t = 3)]
    pub width: usize,

    /// Skip answer details without a question instead of failing the survey
    #[arg(long)]
    pub lenient: bool,
}

impl AnnotateArgs {
    fn survey_ids(&self) -> SurveyIds {
        if !self.ids.is_empty() {
            return SurveyIds::Explicit(self.ids.clone());
        }
        if let Some(range) = self.range {
            return SurveyIds::Range {
                prefix: self.prefix.clone(),
                from: range.from,
                to: range.to,
                width: self.width,
            };
        }
        SurveyIds::Discover {
            dir: self.discover.clone().unwrap_or_else(|| self.answers_dir.clone()),
            prefix: self.prefix.clone(),
        }
    }

    fn policy(&self) -> MissingQuestion {
        if self.lenient {
            MissingQuestion::Lenient
        } else {
            MissingQuestion::Strict
        }
    }
}

/// Inclusive numeric range written `FROM..=TO` or `FROM-TO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    pub from: u32,
    pub to: u32,
}

impl FromStr for IdRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .split_once("..=")
            .or_else(|| s.split_once('-'))
            .ok_or_else(|| format!("expected FROM..=TO, got {s:?}"))?;
        let parse = |n: &str| {
            n.trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid number {n:?}: {e}"))
        };
        let range = IdRange {
            from: parse(from)?,
            to: parse(to)?,
        };
        if range.from > range.to {
            return Err(format!("range start {} is after end {}", range.from, range.to));
        }
        Ok(range)
    }
}

pub fn run(args: AnnotateArgs) -> anyhow::Result<()> {
    let ids = args
        .survey_ids()
        .resolve()
        .context("resolving survey ids")?;
    if ids.is_empty() {
        println!("No survey ids to process.");
        return Ok(());
    }

    let policy = args.policy();
    let store = JsonDirStore::new(PathLayout::new(args.answers_dir, args.enquete_dir));
    let report = run_batch(&store, &ids, policy, |id, outcome| {
        println!("{}", status_line(id, outcome));
    });

    println!(
        "{} processed, {} skipped, {} failed",
        report.annotated(),
        report.skipped(),
        report.failed()
    );
    Ok(())
}

fn status_line(survey_id: &str, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Annotated(s) => format!(
            "Successfully processed {survey_id}.json ({} records, {} details)",
            s.records,
            s.details()
        ),
        Outcome::Skipped(_) => format!("Skipping {survey_id}: missing files"),
        Outcome::Failed(e) => format!("Error processing {survey_id}.json: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enquete_core::AnnotateSummary;
    use enquete_store::StoreError;

    fn args() -> AnnotateArgs {
        AnnotateArgs {
            answers_dir: "answers".into(),
            enquete_dir: "enquete".into(),
            ids: Vec::new(),
            discover: None,
            prefix: "sv_".into(),
            range: None,
            width: 3,
            lenient: false,
        }
    }

    #[test]
    fn range_parses_both_spellings() {
        assert_eq!("1..=30".parse::<IdRange>().unwrap(), IdRange { from: 1, to: 30 });
        assert_eq!("5-7".parse::<IdRange>().unwrap(), IdRange { from: 5, to: 7 });
        assert!("30..=1".parse::<IdRange>().is_err());
        assert!("x..=3".parse::<IdRange>().is_err());
        assert!("12".parse::<IdRange>().is_err());
    }

    #[test]
    fn defaults_to_discovering_in_answers_dir() {
        assert_eq!(
            args().survey_ids(),
            SurveyIds::Discover {
                dir: "answers".into(),
                prefix: "sv_".into()
            }
        );
        assert_eq!(args().policy(), MissingQuestion::Strict);
    }

    #[test]
    fn range_uses_prefix_and_width() {
        let a = AnnotateArgs {
            range: Some(IdRange { from: 1, to: 30 }),
            prefix: "SURVEY_".into(),
            ..args()
        };
        let ids = a.survey_ids().resolve().unwrap();
        assert_eq!(ids.first().map(String::as_str), Some("SURVEY_001"));
        assert_eq!(ids.last().map(String::as_str), Some("SURVEY_030"));
    }

    #[test]
    fn status_lines() {
        let summary = AnnotateSummary {
            records: 2,
            matched: 3,
            inferred: 1,
            ..Default::default()
        };
        assert_eq!(
            status_line("sv_1", &Outcome::Annotated(summary)),
            "Successfully processed sv_1.json (2 records, 4 details)"
        );
        assert_eq!(
            status_line("sv_2", &Outcome::Skipped(StoreError::NotFound("x".into()))),
            "Skipping sv_2: missing files"
        );
    }
}
