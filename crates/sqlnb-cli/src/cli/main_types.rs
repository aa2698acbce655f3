use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sqlnb")]
#[command(about = "Replay recorded SQL statement batches through the notebook result renderer")]
#[command(version)]
#[command(after_help = "Examples:
  sqlnb render --input batch.json                  # Print the plain-text fallback
  sqlnb render --input batch.json --format html    # Print the interactive fragments
  sqlnb render --input batch.json --format csv     # Export tabular results as CSV
  sqlnb config show                                # Show current configuration
  sqlnb config set active_connection local         # Select a connection

Environment Variables:
  SQLNB_CONNECTION   Connection id used when none is configured")]
pub struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Custom configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a recorded statement batch
    Render(RenderArgs),
    /// Configuration management (show, path, set)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Print the configuration file location
    Path,
    /// Set a configuration value
    #[command(after_help = "Examples:
  sqlnb config set active_connection local
  sqlnb config set connections.local.server localhost
  sqlnb config set render.page_size 50
  sqlnb config set render.default_mode json
  sqlnb config set active_database \"\"      # Clear the selection")]
    Set {
        /// Dotted key, e.g. render.page_size
        key: String,
        /// New value; empty clears optional settings
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Interactive view fragments
    Html,
    /// Plain-text fallback
    Text,
    /// Structured result sets
    Json,
    /// Tabular result sets as CSV
    Csv,
    /// Every output item with its MIME type
    All,
}

/// Arguments for replaying one recorded batch
#[derive(Args, Debug)]
#[command(after_help = "The input file holds either a batch
  {\"resultSets\": [...], \"messages\": [...], \"rowsAffected\": [...]}
or a failure
  {\"error\": \"...\"}")]
pub struct RenderArgs {
    /// Recorded batch file (JSON)
    #[arg(short, long)]
    pub input: PathBuf,

    /// SQL text of the cell; only used to decide whether the cell is blank
    #[arg(long)]
    pub sql: Option<String>,

    /// Connection id, overriding the configured one
    #[arg(long, help_heading = "Connection Options")]
    pub connection: Option<String>,

    /// Database name, overriding the configured one
    #[arg(long, help_heading = "Connection Options")]
    pub database: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", help_heading = "Output Options")]
    pub format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long, help_heading = "Output Options")]
    pub output: Option<PathBuf>,
}
