use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt};

/// Logs go to stderr so stdout stays reserved for results. `RUST_LOG`
/// overrides the level picked from `--verbose`. Colors only when stderr is
/// a terminal.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .try_init();
}
