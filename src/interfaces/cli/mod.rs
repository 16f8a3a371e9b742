//! CLI interface module

pub mod commands;

use std::fmt;
use std::sync::Arc;

use crate::cli::{Commands, ConfigCommands};
use crate::config::get_config;
use crate::errors::MukaError;
use crate::services::{LinkService, QuestionCatalog};
use crate::storage::{SeaOrmStorage, StorageFactory};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    CommandError(String),
}

impl CliError {
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<MukaError> for CliError {
    fn from(err: MukaError) -> Self {
        if err.is_client_error() {
            CliError::CommandError(err.to_string())
        } else {
            CliError::StorageError(err.to_string())
        }
    }
}

async fn open_storage() -> Result<Arc<SeaOrmStorage>, CliError> {
    let config = get_config();
    StorageFactory::create(&config.database)
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))
}

fn link_service(storage: Arc<SeaOrmStorage>) -> LinkService {
    let config = get_config();
    LinkService::new(
        storage,
        config.app.base_url(),
        config.links.max_hash_attempts,
    )
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    // config generate 不需要数据库
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return commands::config_generate(output_path, force);
    }

    let storage = open_storage().await?;

    let result = match cmd {
        Commands::Seed => commands::seed_questions(&QuestionCatalog::new(storage.clone())).await,
        Commands::Questions => {
            commands::list_questions(&QuestionCatalog::new(storage.clone())).await
        }
        Commands::Show { hash } => commands::show_link(&link_service(storage.clone()), &hash).await,
        Commands::MarkUsed { hash } => {
            commands::mark_used(&link_service(storage.clone()), &hash).await
        }
        Commands::Serve | Commands::Config { .. } => Err(CliError::CommandError(
            "command is not handled by the CLI runner".to_string(),
        )),
    };

    if let Err(e) = storage.close().await {
        tracing::debug!("Failed to close storage after CLI command: {}", e);
    }

    result
}
