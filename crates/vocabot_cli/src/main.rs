//! Scheduled entry point: learn one word per invocation.
//!
//! # Responsibility
//! - Resolve configuration from flags and `VOCABOT_*` environment variables.
//! - Run one learning step and print exactly one status line.
//! - Map each terminal state to a distinct process exit code.

use chrono::Local;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use vocabot_core::config::{
    DEFAULT_ARCHIVE_PATH, DEFAULT_DOCUMENT_PATH, DEFAULT_LOOKUP_ENDPOINT,
    DEFAULT_LOOKUP_TIMEOUT_SECS, DEFAULT_SEED_PATH,
};
use vocabot_core::document::DEFAULT_STATUS_LINE;
use vocabot_core::{
    default_log_level, init_logging, DailyWordService, DictionaryLookup, JishoClient,
    LogTarget, LookupConfig, LookupResult, RunConfig, RunError, RunOutcome, WordEntry,
};

const EXIT_LOGGING_FAILED: u8 = 1;
const EXIT_SEED_EXHAUSTED: u8 = 10;
const EXIT_SEED_MISSING: u8 = 20;
const EXIT_LOOKUP_NOT_FOUND: u8 = 30;
const EXIT_LOOKUP_FAILED: u8 = 31;
const EXIT_MALFORMED_DOCUMENT: u8 = 40;
const EXIT_STORAGE_FAILED: u8 = 50;

#[derive(Debug, Parser)]
#[command(name = "vocabot")]
#[command(about = "Learn one vocabulary word per run and record it", long_about = None)]
#[command(version)]
struct Cli {
    /// Seed vocabulary, one word per line
    #[arg(long, global = true, env = "VOCABOT_SEED", default_value = DEFAULT_SEED_PATH)]
    seed: PathBuf,

    /// JSON archive of learned words
    #[arg(long, global = true, env = "VOCABOT_ARCHIVE", default_value = DEFAULT_ARCHIVE_PATH)]
    archive: PathBuf,

    /// Status document holding the vocabulary marker region
    #[arg(long, global = true, env = "VOCABOT_DOCUMENT", default_value = DEFAULT_DOCUMENT_PATH)]
    document: PathBuf,

    /// Text shown on the status line of the rendered section
    #[arg(long, global = true, env = "VOCABOT_STATUS_LINE", default_value = DEFAULT_STATUS_LINE)]
    status_line: String,

    /// Dictionary word-search endpoint
    #[arg(long, global = true, env = "VOCABOT_ENDPOINT", default_value = DEFAULT_LOOKUP_ENDPOINT)]
    endpoint: String,

    /// Dictionary request timeout in seconds (at least 1)
    #[arg(
        long,
        global = true,
        env = "VOCABOT_TIMEOUT_SECS",
        default_value_t = DEFAULT_LOOKUP_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "VOCABOT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rotating log files; logs go to stderr when omitted
    #[arg(long, global = true, env = "VOCABOT_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Learn one new word (default)
    Run,
    /// Show how many seed words are archived and remaining
    Status,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            seed_path: self.seed.clone(),
            archive_path: self.archive.clone(),
            document_path: self.document.clone(),
            status_line: self.status_line.clone(),
            lookup: LookupConfig {
                endpoint: self.endpoint.clone(),
                timeout: Duration::from_secs(self.timeout_secs),
                ..LookupConfig::default()
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level, LogTarget::resolve(cli.log_dir.as_deref())) {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::from(EXIT_LOGGING_FAILED);
    }

    let config = cli.run_config();
    match cli.command.unwrap_or(Command::Run) {
        Command::Run => run(&config),
        Command::Status => status(&config),
    }
}

fn run(config: &RunConfig) -> ExitCode {
    let lookup = match JishoClient::new(&config.lookup) {
        Ok(lookup) => lookup,
        Err(err) => {
            println!("Failed to build dictionary client: {err}");
            return ExitCode::from(EXIT_LOOKUP_FAILED);
        }
    };
    let service = DailyWordService::new(config, lookup);
    let today = Local::now().date_naive();
    let result = service.run(&mut rand::rng(), today);
    let code = exit_code(&result);
    match result {
        Ok(outcome) => println!("{outcome}"),
        Err(err) => println!("{err}"),
    }
    info!("event=cli_exit module=cli status=ok code={code}");
    ExitCode::from(code)
}

/// Never builds an HTTP client; the lookup is unused when only reporting.
fn status(config: &RunConfig) -> ExitCode {
    let service = DailyWordService::new(config, NoLookup);
    match service.progress() {
        Ok(progress) => {
            println!("{progress}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{err}");
            ExitCode::from(error_exit_code(&err))
        }
    }
}

fn exit_code(result: &Result<RunOutcome, RunError>) -> u8 {
    match result {
        Ok(RunOutcome::Learned { .. }) | Ok(RunOutcome::AlreadyArchived { .. }) => 0,
        Ok(RunOutcome::SeedExhausted { .. }) => EXIT_SEED_EXHAUSTED,
        Err(err) => error_exit_code(err),
    }
}

fn error_exit_code(err: &RunError) -> u8 {
    match err {
        RunError::SeedMissing(_) | RunError::Seed(_) => EXIT_SEED_MISSING,
        RunError::LookupNotFound(_) => EXIT_LOOKUP_NOT_FOUND,
        RunError::LookupFailed { .. } => EXIT_LOOKUP_FAILED,
        RunError::MalformedDocument { .. } => EXIT_MALFORMED_DOCUMENT,
        RunError::InvalidRecord(_) | RunError::Storage(_) => EXIT_STORAGE_FAILED,
    }
}

struct NoLookup;

impl DictionaryLookup for NoLookup {
    fn lookup(&self, _word: &str) -> LookupResult<Option<WordEntry>> {
        Ok(None)
    }
}
