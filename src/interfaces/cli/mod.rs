//! CLI interface module

pub mod commands;

use std::fmt;

use crate::cli::Commands;
use crate::config::StaticConfig;
use crate::storage::StorageFactory;

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    InputError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::InputError(msg) => format!("Input error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::InputError(msg) => {
                format!("{} {}", "Input error:".yellow().bold(), msg.white())
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

impl From<crate::errors::TrackerError> for CliError {
    fn from(err: crate::errors::TrackerError) -> Self {
        CliError::StorageError(err.to_string())
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::CommandError(format!("{:#}", err))
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    match cmd {
        // 不需要数据库
        Commands::GenerateConfig { output_path, force } => {
            commands::config_generate(output_path, force)
        }
        Commands::Seed { sample } => {
            let storage = StorageFactory::create(&config.database).await?;
            commands::run_seed(&storage, &config.bootstrap, sample).await
        }
        Commands::ResetAdminPassword {
            username,
            password,
            stdin,
        } => {
            let storage = StorageFactory::create(&config.database).await?;
            commands::run_reset_password(&storage, &username, password, stdin).await
        }
        Commands::Serve => Err(CliError::CommandError(
            "serve is not a CLI command".to_string(),
        )),
    }
}
