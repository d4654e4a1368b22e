use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use coachscore::config::ScoringConfig;
use coachscore::events::ConsoleSink;
use coachscore::pipeline::{GeminiClient, ScoringError, ScoringRunner};
use coachscore::rubric::Rubric;
use coachscore::suggestions::generate_suggestions;
use coachscore::table::{InputTable, ScoredWriter};

#[derive(Parser)]
#[command(
    name = "coachscore",
    version,
    about = "Score 1:1 dialogue transcripts against a coaching rubric via Gemini"
)]
struct Cli {
    /// Input CSV with one transcript per row
    input: PathBuf,

    /// Output CSV path (overwritten if present)
    #[arg(short, long, default_value = "1on1_analysis.csv")]
    output: PathBuf,

    /// Records per outbound request
    #[arg(long, default_value_t = 10)]
    batch_size: usize,

    /// Model handle passed to the generation service
    #[arg(long, default_value = "gemini-1.5-flash")]
    model: String,

    /// Literal marker separating per-record replies
    #[arg(long, default_value = "-----")]
    delimiter: String,

    /// Seconds to sleep between batches
    #[arg(long, default_value_t = 1)]
    pacing_secs: u64,

    /// HTTP timeout per generation call, in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Print coaching suggestions for low-score items after the run
    #[arg(long)]
    suggestions: bool,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("coachscore v{}", env!("CARGO_PKG_VERSION"));

    let config = ScoringConfig {
        batch_size: cli.batch_size,
        delimiter: cli.delimiter,
        pacing: Duration::from_secs(cli.pacing_secs),
        model: cli.model,
        timeout_secs: cli.timeout_secs,
    };

    let api_key = cli
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .ok_or(ScoringError::MissingApiKey)?;
    let client = GeminiClient::new(api_key, config.timeout_secs);

    let events = ConsoleSink;
    let rubric = Rubric::default();
    let runner = ScoringRunner::new(config.clone(), rubric.clone())?;

    let table = InputTable::read(&cli.input)?;
    let column = table.select_dialogue_column(&events);
    tracing::info!(
        column = %table.headers.get(column).map(String::as_str).unwrap_or(""),
        rows = table.rows.len(),
        "using transcript column"
    );
    let dialogues = table.dialogues(column);

    let mut writer = ScoredWriter::create(&cli.output, &table.headers, &rubric)?;
    let rows = &table.rows;
    let mut all_results = Vec::with_capacity(dialogues.len());

    let summary = runner.score_all(&dialogues, &client, &events, |start, results| {
        let end = (start + results.len()).min(rows.len());
        writer.append_batch(&rows[start..end], results)?;
        all_results.extend_from_slice(results);
        Ok(())
    })?;

    tracing::info!(
        rows = summary.rows_processed,
        batches = summary.batches_completed,
        degraded = summary.batches_degraded,
        duration_ms = summary.duration_ms,
        "scoring complete, results written to {}",
        cli.output.display()
    );

    if cli.suggestions {
        let advice = generate_suggestions(&all_results, &rubric, &config, &client, &events);
        println!("{advice}");
    }

    Ok(())
}
