//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

/// Employee activity tracker backend
#[derive(Parser)]
#[command(name = "employee-tracker")]
#[command(version)]
#[command(about = "Employee activity tracking backend", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Create the bootstrap admin account
    Seed {
        /// Also insert a sample employee with today's session, usage and settings
        #[arg(long)]
        sample: bool,
    },

    /// Reset an admin password
    ResetAdminPassword {
        /// Admin username
        username: String,

        /// New password (if not provided, will prompt interactively)
        #[arg(long, conflicts_with = "stdin")]
        password: Option<String>,

        /// Read password from stdin (for scripting)
        #[arg(long)]
        stdin: bool,
    },

    /// Generate an example configuration file
    GenerateConfig {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["employee-tracker"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, DEFAULT_CONFIG_PATH);
    }

    #[test]
    fn test_parse_reset_admin_password() {
        let cli = Cli::try_parse_from([
            "employee-tracker",
            "-c",
            "custom.toml",
            "reset-admin-password",
            "admin",
            "--stdin",
        ])
        .unwrap();
        assert_eq!(cli.config, "custom.toml");
        assert_eq!(
            cli.command,
            Some(Commands::ResetAdminPassword {
                username: "admin".to_string(),
                password: None,
                stdin: true,
            })
        );
    }

    #[test]
    fn test_password_and_stdin_conflict() {
        let result = Cli::try_parse_from([
            "employee-tracker",
            "reset-admin-password",
            "admin",
            "--password",
            "x",
            "--stdin",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_seed_sample() {
        let cli = Cli::try_parse_from(["employee-tracker", "seed", "--sample"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Seed { sample: true }));
    }
}
