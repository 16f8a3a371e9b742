//! Config generate command

use colored::Colorize;
use std::path::Path;

use crate::config::StaticConfig;
use crate::interfaces::cli::CliError;

pub fn config_generate(output_path: Option<String>, force: bool) -> Result<(), CliError> {
    let path = output_path.unwrap_or_else(|| "config.example.toml".to_string());

    if !force && Path::new(&path).exists() {
        return Err(CliError::CommandError(format!(
            "{} already exists, pass --force to overwrite",
            path
        )));
    }

    StaticConfig::default()
        .save_to_file(&path)
        .map_err(|e| CliError::CommandError(format!("Failed to write {}: {}", path, e)))?;

    println!(
        "{} {}",
        "Configuration file generated:".green(),
        path.blue()
    );
    Ok(())
}
