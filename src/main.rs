use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use compliance_engine::api::{AppState, RosterRequest, create_router, resolve_today};
use compliance_engine::compliance::{assess_roster, parse_date};
use compliance_engine::config::ConfigLoader;
use compliance_engine::error::EngineError;
use compliance_engine::models::{EvaluationRecord, Worker};
use compliance_engine::telemetry::{self, DEFAULT_LOG_LEVEL, TelemetryError};
use thiserror::Error;
use tracing::info;

const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[derive(Parser, Debug)]
#[command(
    name = "compliance-engine",
    about = "Track employee evaluation cycles and report their compliance status",
    version
)]
struct Cli {
    /// Log level or filter directive (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Assess a roster file and print the worklist as JSON
    Assess(AssessArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Directory containing policy.yaml
    #[arg(long, default_value = DEFAULT_CONFIG_DIR)]
    config: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_DIR),
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Args, Debug)]
struct AssessArgs {
    /// JSON file shaped like a POST /roster body
    #[arg(long)]
    input: PathBuf,
    /// Directory containing policy.yaml
    #[arg(long, default_value = DEFAULT_CONFIG_DIR)]
    config: PathBuf,
    /// Assessment date, overriding the file's `today`
    #[arg(long, value_parser = parse_today)]
    today: Option<NaiveDate>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error("invalid listen address {addr}: {source}")]
    Address {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

fn parse_today(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("'{}' is not a calendar date", value))
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("compliance-engine: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    telemetry::init(&cli.log_level)?;

    match cli.command {
        Some(Command::Serve(args)) => serve(args).await,
        Some(Command::Assess(args)) => assess_file(args),
        None => serve(ServeArgs::default()).await,
    }
}

async fn serve(args: ServeArgs) -> Result<(), CliError> {
    let config = ConfigLoader::load(&args.config)?;
    info!(
        config = %args.config.display(),
        annual_alert_days = config.policy().annual_alert_days,
        phases = config.policy().onboarding_phases.len(),
        "Loaded compliance policy"
    );

    let addr_text = format!("{}:{}", args.host, args.port);
    let addr: SocketAddr = addr_text.parse().map_err(|source| CliError::Address {
        addr: addr_text.clone(),
        source,
    })?;

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(CliError::Serve)?;
    info!(%addr, "Compliance engine listening");

    axum::serve(listener, router).await.map_err(CliError::Serve)
}

fn assess_file(args: AssessArgs) -> Result<(), CliError> {
    let config = ConfigLoader::load(&args.config)?;
    let path = args.input.display().to_string();

    let content = std::fs::read_to_string(&args.input).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    let request: RosterRequest =
        serde_json::from_str(&content).map_err(|source| CliError::Json {
            path: path.clone(),
            source,
        })?;

    let today = match args.today {
        Some(today) => today,
        None => resolve_today(request.today.as_deref())?,
    };

    let records = request
        .evaluations
        .into_iter()
        .enumerate()
        .map(|(index, evaluation)| evaluation.into_record(index))
        .collect::<Result<Vec<EvaluationRecord>, _>>()?;
    let workers: Vec<Worker> = request.workers.into_iter().map(Into::into).collect();

    let report = assess_roster(&workers, &records, today, config.policy());
    info!(
        input = %path,
        assessed = report.assessments.len(),
        skipped_inactive = report.skipped_inactive,
        "Roster assessed"
    );

    let rendered = serde_json::to_string_pretty(&report).map_err(|source| CliError::Json {
        path: "report".to_string(),
        source,
    })?;
    println!("{rendered}");
    Ok(())
}
