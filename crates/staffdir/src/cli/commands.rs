//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show employees whose first or last name contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Employee id
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Note command arguments.
#[derive(Debug, Args)]
pub struct NoteCommand {
    /// Employee id
    pub id: String,

    /// Note text (remaining words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub content: Vec<String>,
}

impl NoteCommand {
    /// The note text as one string.
    #[must_use]
    pub fn text(&self) -> String {
        self.content.join(" ")
    }
}

/// Favorite toggle arguments.
#[derive(Debug, Args)]
pub struct FavoriteCommand {
    /// Employee id
    pub id: String,
}

/// Favorites listing arguments.
#[derive(Debug, Args)]
pub struct FavoritesCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
