//! Run a survey definition in the terminal.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use survey_runner::{Controller, ElementRegistry, JsonFileStore, Survey, SurveyDefinition};
use survey_runner_dialoguer::{DialoguerError, DialoguerPrompter, TerminalHost, run};
use tracing_subscriber::EnvFilter;

const SANDBOX_DEFINITION: &str = include_str!("../sandbox.json");

#[derive(Parser)]
#[command(name = "survey-sandbox", version, about = "Run a paged survey in the terminal")]
struct Cli {
    /// Path to a JSON survey definition (default: the built-in sandbox survey)
    #[arg(short, long)]
    definition: Option<PathBuf>,

    /// File that answers are saved to and restored from
    #[arg(short, long, default_value = "survey-data.json")]
    store: PathBuf,

    /// Fixed seed for row, column and option shuffling
    #[arg(long)]
    seed: Option<u64>,

    /// Use prompts without colors
    #[arg(long)]
    plain: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let json = match &cli.definition {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading survey definition {}", path.display()))?,
        None => SANDBOX_DEFINITION.to_string(),
    };
    let definition = SurveyDefinition::from_json(&json).context("parsing survey definition")?;
    let survey = Survey::from_definition(&definition, &ElementRegistry::new())
        .context("building survey")?;
    tracing::info!(survey = %survey.id(), pages = survey.pages().len(), "Loaded survey");

    if let Some(title) = &definition.title {
        println!("{title}");
    }

    let store = JsonFileStore::new(cli.store.clone());
    let mut controller = Controller::new(survey, TerminalHost::stdout(), store);
    if let Some(seed) = cli.seed {
        controller = controller.with_seed(seed);
    }

    let prompter = if cli.plain {
        DialoguerPrompter::plain()
    } else {
        DialoguerPrompter::new()
    };

    match run(&mut controller, &prompter) {
        Ok(record) => {
            println!("Answers saved to {}", cli.store.display());
            tracing::debug!(answers = record.len(), "Survey complete");
            Ok(())
        }
        Err(DialoguerError::Cancelled) => {
            println!("Survey cancelled. Answers from completed pages are kept.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
