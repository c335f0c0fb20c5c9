mod annotate;
mod generate;

use clap::{Parser, Subcommand};

/// Generate and patch survey test fixtures.
#[derive(Parser)]
#[command(name = "enquete", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tag every answer detail with its question type from the enquete file
    Annotate(annotate::AnnotateArgs),
    /// Generate a dummy answer document for one survey
    DummyAnswers(generate::DummyAnswersArgs),
    /// Generate an operator performance dashboard
    Performance(generate::PerformanceArgs),
    /// Append daily history for a date range to a performance dashboard
    ExtendHistory(generate::ExtendHistoryArgs),
    /// Convert CSV (stdin or file) to a JSON array on stdout
    CsvToJson(generate::CsvToJsonArgs),
    /// Generate placeholder business card, handwriting and attachment images
    Images(generate::ImagesArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("enquete v{}", env!("CARGO_PKG_VERSION"));

    match Cli::parse().command {
        Command::Annotate(args) => annotate::run(args),
        Command::DummyAnswers(args) => generate::dummy_answers(args),
        Command::Performance(args) => generate::performance(args),
        Command::ExtendHistory(args) => generate::extend_history(args),
        Command::CsvToJson(args) => generate::csv_to_json(args),
        Command::Images(args) => generate::images(args),
    }
}
