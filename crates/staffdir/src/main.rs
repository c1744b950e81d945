//! `staffdir` - CLI for the employee directory
//!
//! This binary lists employees, shows their details and notes, and manages the
//! locally persisted favorites.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};

use clap::Parser;
use tokio::io::BufReader;
use tracing::warn;

use staffdir::cli::{
    render, Cli, Command, ConfigCommand, FavoriteCommand, FavoritesCommand, ListCommand,
    NoteCommand, OutputFormat, ShowCommand,
};
use staffdir::views::{EmployeeDetailView, EmployeeListView, FavoritesView, SubmitOutcome};
use staffdir::{init_logging, Config, Directory, Shell};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> CliResult {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::List(cmd) => handle_list(&config, &cmd).await,
        Command::Show(cmd) => handle_show(&config, &cmd).await,
        Command::Note(cmd) => handle_note(&config, &cmd).await,
        Command::Favorite(cmd) => handle_favorite(&config, &cmd).await,
        Command::Favorites(cmd) => handle_favorites(&config, &cmd).await,
        Command::Shell => handle_shell(&config).await,
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

async fn handle_list(config: &Config, cmd: &ListCommand) -> CliResult {
    let mut directory = Directory::open(config)?;
    let mut view = EmployeeListView::new(&directory.favorites);
    view.load(&mut directory.employees).await;
    if let Some(message) = view.error() {
        return Err(message.into());
    }
    if let Some(term) = &cmd.search {
        view.set_search_term(term);
    }

    let mut out = io::stdout().lock();
    render::employees(
        &mut out,
        view.filtered(),
        &directory.favorites.get_favorites(),
        cmd.format,
    )?;
    Ok(())
}

async fn handle_show(config: &Config, cmd: &ShowCommand) -> CliResult {
    let mut directory = Directory::open(config)?;
    let mut view = EmployeeDetailView::new(cmd.id.as_str(), &directory.favorites);
    view.load(&mut directory.employees, &directory.notes).await;
    if let Some(message) = view.error() {
        return Err(message.into());
    }
    let Some(employee) = view.employee() else {
        return Err(staffdir::views::detail::NOT_FOUND.into());
    };

    let mut out = io::stdout().lock();
    render::employee_detail(
        &mut out,
        employee,
        view.notes(),
        view.is_favorite(),
        cmd.format,
    )?;
    Ok(())
}

async fn handle_note(config: &Config, cmd: &NoteCommand) -> CliResult {
    let mut directory = Directory::open(config)?;
    let mut view = EmployeeDetailView::new(cmd.id.as_str(), &directory.favorites);
    view.load(&mut directory.employees, &directory.notes).await;
    if let Some(message) = view.error() {
        return Err(message.into());
    }

    view.set_draft(&cmd.text());
    match view.submit_note(&directory.notes).await {
        SubmitOutcome::Created(note) => {
            let mut out = io::stdout().lock();
            let name = view
                .employee()
                .map_or_else(|| cmd.id.clone(), |employee| employee.full_name());
            writeln!(out, "Note added for {name}.")?;
            render::note(&mut out, &note)?;
            Ok(())
        }
        SubmitOutcome::Skipped => {
            println!("Nothing to add.");
            Ok(())
        }
        SubmitOutcome::Failed(message) => Err(message.into()),
    }
}

async fn handle_favorite(config: &Config, cmd: &FavoriteCommand) -> CliResult {
    let mut directory = Directory::open(config)?;
    let now_favorite = directory.favorites.toggle_favorite(&cmd.id)?;

    let name = match directory.employees.get_employees().await {
        Ok(employees) => employees
            .iter()
            .find(|employee| employee.id == cmd.id)
            .map(staffdir::model::Employee::full_name),
        Err(err) => {
            warn!("Could not look up employee name: {err}");
            None
        }
    }
    .unwrap_or_else(|| cmd.id.clone());

    if now_favorite {
        println!("★ {name} added to favorites");
    } else {
        println!("☆ {name} removed from favorites");
    }
    Ok(())
}

async fn handle_favorites(config: &Config, cmd: &FavoritesCommand) -> CliResult {
    let mut directory = Directory::open(config)?;
    let mut view = FavoritesView::new(&directory.favorites);
    view.load(&mut directory.employees).await;
    if let Some(message) = view.error() {
        return Err(message.into());
    }

    if view.employees().is_empty() && cmd.format != OutputFormat::Json {
        println!("No favorite employees yet.");
        return Ok(());
    }
    let mut out = io::stdout().lock();
    render::employees(
        &mut out,
        view.employees(),
        &directory.favorites.get_favorites(),
        cmd.format,
    )?;
    Ok(())
}

async fn handle_shell(config: &Config) -> CliResult {
    let directory = Directory::open(config)?;
    println!("staffdir {} - type 'help' for commands", env!("CARGO_PKG_VERSION"));

    let mut shell = Shell::new(directory);
    let input = BufReader::new(tokio::io::stdin());
    shell.run(input, &mut io::stdout()).await?;
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> CliResult {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[API]");
                println!("  Base URL:           {}", config.api.base_url);
                println!("  Timeout (secs):     {}", config.api.timeout_secs);
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
