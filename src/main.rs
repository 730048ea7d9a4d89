mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod store;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};

use crate::error::AppError;
use crate::input::InputError;
use crate::pipeline::{UpdateOutcome, UpdateRequest, run_update};
use crate::report::json::render_rank_json;
use crate::report::text::render_rank_text;
use crate::report::{RankQuery, SortDirection, SortKey, rank_rows};
use crate::store::Leaderboard;

const DEFAULT_STORE: &str = "leaderboard/leaderboard.csv";

#[derive(Debug, Parser)]
#[command(
    name = "proven-leaderboard",
    version,
    about = "Append a PROVEN-GNN submission to the shared leaderboard, or print the ranked board",
    subcommand_negates_reqs = true
)]
struct Cli {
    /// Leaderboard CSV file
    #[arg(long, env = "LEADERBOARD_CSV", default_value = DEFAULT_STORE, global = true)]
    store: PathBuf,

    #[arg(short, long, global = true)]
    verbose: bool,

    /// First line holds `macro_f1,accuracy,precision,recall`
    #[arg(value_name = "SCORE_FILE", required = true)]
    score_file: Option<PathBuf>,

    /// JSON object with optional team, run_id, type and model
    #[arg(value_name = "METADATA_FILE", required = true)]
    metadata_file: Option<PathBuf>,

    #[arg(value_name = "USERNAME", required = true)]
    username: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    /// `rank` is matched as a subcommand wherever it appears, so a trailing
    /// `rank` after update arguments is rejected rather than run.
    fn check_command_position(&self) -> Result<(), clap::Error> {
        let has_update_args =
            self.score_file.is_some() || self.metadata_file.is_some() || self.username.is_some();
        if self.command.is_some() && has_update_args {
            return Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "update arguments cannot be combined with `rank`; \
                 pass a username named `rank` after `--`",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the leaderboard filtered, sorted and ranked
    Rank(RankArgs),
}

#[derive(Debug, clap::Args)]
struct RankArgs {
    #[arg(long, value_enum, default_value_t = SortKey::MacroF1)]
    sort: SortKey,

    #[arg(long, conflicts_with = "desc")]
    asc: bool,

    #[arg(long)]
    desc: bool,

    /// Keep only this model (case-insensitive)
    #[arg(long)]
    model: Option<String>,

    /// Keep only submissions at most this many days old
    #[arg(long, value_name = "DAYS")]
    since_days: Option<u32>,

    /// Substring match over team, type, model and timestamp
    #[arg(long)]
    search: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = cli.check_command_position() {
        err.exit();
    }
    logging::init_logging(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Some(Command::Rank(args)) => run_rank(&cli.store, &args),
        None => {
            let request = build_update_request(
                cli.score_file,
                cli.metadata_file,
                cli.username,
                cli.store,
            )?;
            run_update_command(&request)
        }
    }
}

fn build_update_request(
    score_file: Option<PathBuf>,
    metadata_file: Option<PathBuf>,
    username: Option<String>,
    store: PathBuf,
) -> Result<UpdateRequest, InputError> {
    let missing = |what: &str| InputError::MissingInput(what.to_string());
    Ok(UpdateRequest {
        score_path: score_file.ok_or_else(|| missing("SCORE_FILE"))?,
        metadata_path: metadata_file.ok_or_else(|| missing("METADATA_FILE"))?,
        username: username.ok_or_else(|| missing("USERNAME"))?,
        store_path: store,
    })
}

fn run_update_command(request: &UpdateRequest) -> Result<(), AppError> {
    let outcome = run_update(request, Utc::now())?;
    let mut stdout = std::io::stdout().lock();
    match outcome {
        UpdateOutcome::Created => {
            tracing::info!(store = %request.store_path.display(), "leaderboard created");
            writeln!(stdout, "Leaderboard updated: {}", request.store_path.display())?;
        }
        UpdateOutcome::Appended { rows } => {
            tracing::info!(store = %request.store_path.display(), rows, "row appended");
            writeln!(stdout, "Leaderboard updated: {}", request.store_path.display())?;
        }
        UpdateOutcome::AlreadyExists { username } => {
            tracing::warn!(%username, "username already on the leaderboard; nothing written");
            writeln!(
                stdout,
                "Username '{username}' already exists in leaderboard. No update performed."
            )?;
        }
    }
    Ok(())
}

fn run_rank(store: &Path, args: &RankArgs) -> Result<(), AppError> {
    let board = Leaderboard::open(store)?;
    let query = RankQuery {
        sort: args.sort,
        direction: rank_direction(args),
        model: args.model.clone(),
        since_days: args.since_days,
        search: args.search.clone(),
    };
    let report = rank_rows(board.rows(), &query, Utc::now());
    tracing::debug!(total = board.len(), shown = report.count, "leaderboard ranked");

    let rendered = match args.format {
        OutputFormat::Text => render_rank_text(&report),
        OutputFormat::Json => render_rank_json(&report)?,
    };
    std::io::stdout().lock().write_all(rendered.as_bytes())?;
    Ok(())
}

fn rank_direction(args: &RankArgs) -> Option<SortDirection> {
    if args.asc {
        Some(SortDirection::Asc)
    } else if args.desc {
        Some(SortDirection::Desc)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
