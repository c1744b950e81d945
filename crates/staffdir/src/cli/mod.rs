//! Command-line interface for the `staffdir` binary.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, FavoriteCommand, FavoritesCommand, ListCommand, NoteCommand, OutputFormat,
    ShowCommand,
};

/// staffdir - Browse the employee directory
///
/// Lists employees, shows details and notes, and keeps a local set of
/// favorites.
#[derive(Debug, Parser)]
#[command(name = "staffdir")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List employees, optionally filtered by name
    List(ListCommand),

    /// Show one employee with notes
    Show(ShowCommand),

    /// Add a note to an employee
    Note(NoteCommand),

    /// Toggle an employee as favorite
    Favorite(FavoriteCommand),

    /// List favorite employees
    Favorites(FavoritesCommand),

    /// Start an interactive session
    Shell,

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "staffdir");
    }

    #[test]
    fn test_verbosity_flags() {
        use crate::logging::Verbosity;

        assert_eq!(parse(&["staffdir", "shell"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["staffdir", "-v", "shell"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["staffdir", "-vv", "shell"]).verbosity(), Verbosity::Trace);
        assert_eq!(parse(&["staffdir", "-q", "shell"]).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_parse_list_with_search() {
        let cli = parse(&["staffdir", "list", "--search", "ada", "-f", "json"]);
        let Command::List(cmd) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(cmd.search.as_deref(), Some("ada"));
        assert_eq!(cmd.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_list_defaults_to_table() {
        let Command::List(cmd) = parse(&["staffdir", "list"]).command else {
            panic!("expected list");
        };
        assert!(cmd.search.is_none());
        assert_eq!(cmd.format, OutputFormat::Table);
    }

    #[test]
    fn test_parse_show() {
        let Command::Show(cmd) = parse(&["staffdir", "show", "e-9"]).command else {
            panic!("expected show");
        };
        assert_eq!(cmd.id, "e-9");
        assert_eq!(cmd.format, OutputFormat::Plain);
    }

    #[test]
    fn test_parse_note_collects_words() {
        let Command::Note(cmd) = parse(&["staffdir", "note", "7", "call", "back", "Monday"]).command
        else {
            panic!("expected note");
        };
        assert_eq!(cmd.id, "7");
        assert_eq!(cmd.text(), "call back Monday");
    }

    #[test]
    fn test_parse_note_requires_content() {
        assert!(Cli::try_parse_from(["staffdir", "note", "7"]).is_err());
    }

    #[test]
    fn test_parse_favorite_and_favorites() {
        assert!(matches!(
            parse(&["staffdir", "favorite", "3"]).command,
            Command::Favorite(FavoriteCommand { ref id }) if id == "3"
        ));
        assert!(matches!(
            parse(&["staffdir", "favorites"]).command,
            Command::Favorites(_)
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["staffdir", "-c", "/custom/config.toml", "shell"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(matches!(cli.command, Command::Shell));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = parse(&["staffdir", "config", "validate", "--file", "x.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}
