//! CLI mode

use crate::cli::Commands;
use crate::interfaces::cli::{CliError, run_cli_command};

/// Run a one-shot CLI command
pub async fn run_cli(cmd: Commands) -> Result<(), CliError> {
    run_cli_command(cmd).await
}
