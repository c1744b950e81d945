//! Interactive session over the directory.
//!
//! The session keeps one [`Directory`] alive, so the employee cache and the
//! favorites subscriptions behave as they would across page navigations:
//! the list is fetched once and every screen sees favorite toggles.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error};

use crate::cli::render;
use crate::cli::OutputFormat;
use crate::directory::Directory;
use crate::error::Result;
use crate::views::{detail, EmployeeDetailView, EmployeeListView, FavoritesView, Route, SubmitOutcome};

const HELP: &str = "\
Commands:
  list                 Show all employees
  search <term>        Filter the list by first or last name
  show <id>            Show an employee with notes
  fav <id>             Toggle an employee as favorite
  favorites            Show favorite employees
  note <id> <text>     Add a note to an employee
  go <path>            Open a path such as /employee/42 or /favorites
  back                 Return to the previous screen
  refresh              Reload employees from the server
  help                 Show this help
  quit                 Leave the session";

/// One line of input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Blank line.
    Empty,
    /// Open the employee list.
    List,
    /// Filter the list. An empty term shows everyone.
    Search(String),
    /// Open an employee's detail screen.
    Show(String),
    /// Toggle a favorite.
    Favorite(String),
    /// Open the favorites screen.
    Favorites,
    /// Add a note to an employee.
    Note {
        /// Employee id
        id: String,
        /// Note text
        content: String,
    },
    /// Open a route by path.
    Go(Route),
    /// Return to the previous screen.
    Back,
    /// Drop the employee cache and reload the current screen.
    Refresh,
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

impl ShellCommand {
    /// Parse a line. The error is a message for the user.
    ///
    /// # Errors
    ///
    /// Returns a usage message for unknown commands or missing arguments.
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        let command = match word {
            "" => Self::Empty,
            "list" | "ls" => Self::List,
            "search" => Self::Search(rest.to_string()),
            "show" => Self::Show(required(rest, "show <id>")?),
            "fav" | "favorite" => Self::Favorite(required(rest, "fav <id>")?),
            "favorites" | "favs" => Self::Favorites,
            "note" => {
                let (id, content) = rest
                    .split_once(char::is_whitespace)
                    .map(|(id, content)| (id, content.trim()))
                    .filter(|(_, content)| !content.is_empty())
                    .ok_or_else(|| "Usage: note <id> <text>".to_string())?;
                Self::Note {
                    id: id.to_string(),
                    content: content.to_string(),
                }
            }
            "go" => Self::Go(Route::parse(rest)),
            "back" => Self::Back,
            "refresh" => Self::Refresh,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => {
                return Err(format!(
                    "Unknown command: {other}. Type 'help' for commands."
                ))
            }
        };
        Ok(command)
    }
}

fn required(arg: &str, usage: &str) -> std::result::Result<String, String> {
    if arg.is_empty() {
        Err(format!("Usage: {usage}"))
    } else {
        Ok(arg.to_string())
    }
}

#[derive(Debug)]
enum Screen {
    List(EmployeeListView),
    Detail(EmployeeDetailView),
    Favorites(FavoritesView),
}

/// An interactive session.
#[derive(Debug)]
pub struct Shell {
    directory: Directory,
    format: OutputFormat,
    screen: Screen,
    history: Vec<Route>,
}

impl Shell {
    /// Start a session on the employee list.
    #[must_use]
    pub fn new(directory: Directory) -> Self {
        let screen = Screen::List(EmployeeListView::new(&directory.favorites));
        Self {
            directory,
            format: OutputFormat::Table,
            screen,
            history: Vec::new(),
        }
    }

    /// Use `format` for lists and details.
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// The screen currently shown.
    #[must_use]
    pub fn route(&self) -> Route {
        match &self.screen {
            Screen::List(_) => Route::List,
            Screen::Detail(view) => Route::Employee(view.employee_id().to_string()),
            Screen::Favorites(_) => Route::Favorites,
        }
    }

    /// The directory behind the session.
    #[must_use]
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Read commands from `input` until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        self.navigate(Route::List, false, out).await?;

        let mut lines = input.lines();
        loop {
            write!(out, "staffdir:{}> ", self.route())?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };
            match ShellCommand::parse(&line) {
                Ok(command) => {
                    if !self.execute(command, out).await? {
                        break;
                    }
                }
                Err(message) => writeln!(out, "{message}")?,
            }
        }
        Ok(())
    }

    /// Run one command. Returns `false` when the session should end.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails.
    pub async fn execute<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> Result<bool> {
        debug!(?command, route = %self.route(), "Executing shell command");
        match command {
            ShellCommand::Empty => {}
            ShellCommand::List => self.navigate(Route::List, true, out).await?,
            ShellCommand::Search(term) => {
                if !matches!(self.screen, Screen::List(_)) {
                    self.switch(Route::List, true).await;
                }
                if let Screen::List(view) = &mut self.screen {
                    view.set_search_term(&term);
                }
                self.render(out)?;
            }
            ShellCommand::Show(id) => self.navigate(Route::Employee(id), true, out).await?,
            ShellCommand::Go(route) => self.navigate(route, true, out).await?,
            ShellCommand::Favorites => self.navigate(Route::Favorites, true, out).await?,
            ShellCommand::Favorite(id) => self.toggle_favorite(&id, out)?,
            ShellCommand::Note { id, content } => self.add_note(id, &content, out).await?,
            ShellCommand::Back => match self.history.pop() {
                Some(route) => self.navigate(route, false, out).await?,
                None => writeln!(out, "Already at the first screen.")?,
            },
            ShellCommand::Refresh => {
                self.directory.employees.clear_cache();
                let route = self.route();
                self.navigate(route, false, out).await?;
            }
            ShellCommand::Help => writeln!(out, "{HELP}")?,
            ShellCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    async fn navigate<W: Write>(&mut self, route: Route, remember: bool, out: &mut W) -> Result<()> {
        self.switch(route, remember).await;
        self.render(out)
    }

    async fn switch(&mut self, route: Route, remember: bool) {
        if remember {
            self.history.push(self.route());
        }
        let directory = &mut self.directory;
        self.screen = match route {
            Route::List => {
                let mut view = EmployeeListView::new(&directory.favorites);
                view.load(&mut directory.employees).await;
                Screen::List(view)
            }
            Route::Employee(id) => {
                let mut view = EmployeeDetailView::new(id, &directory.favorites);
                view.load(&mut directory.employees, &directory.notes).await;
                Screen::Detail(view)
            }
            Route::Favorites => {
                let mut view = FavoritesView::new(&directory.favorites);
                view.load(&mut directory.employees).await;
                Screen::Favorites(view)
            }
        };
    }

    fn toggle_favorite<W: Write>(&mut self, id: &str, out: &mut W) -> Result<()> {
        let store = &mut self.directory.favorites;
        let result = match &mut self.screen {
            Screen::Favorites(view) => view.toggle_favorite(store, id),
            _ => store.toggle_favorite(id),
        };

        let name = self
            .directory
            .employees
            .get_employee_by_id(id)
            .map_or_else(|| id.to_string(), |employee| employee.full_name());
        match result {
            Ok(true) => writeln!(out, "★ {name} added to favorites")?,
            Ok(false) => writeln!(out, "☆ {name} removed from favorites")?,
            Err(err) => {
                error!("Error saving favorites: {err}");
                writeln!(out, "Failed to update favorites: {err}")?;
            }
        }
        if matches!(self.screen, Screen::Favorites(_)) {
            self.render(out)?;
        }
        Ok(())
    }

    async fn add_note<W: Write>(&mut self, id: String, content: &str, out: &mut W) -> Result<()> {
        let on_employee = matches!(&self.screen, Screen::Detail(view) if view.employee_id() == id);
        if !on_employee {
            self.switch(Route::Employee(id), true).await;
        }

        let Screen::Detail(view) = &mut self.screen else {
            return Ok(());
        };
        if let Some(message) = view.error() {
            writeln!(out, "{message}")?;
            return Ok(());
        }

        view.set_draft(content);
        match view.submit_note(&self.directory.notes).await {
            SubmitOutcome::Created(note) => {
                writeln!(out, "Note added.")?;
                render::note(out, &note)?;
            }
            SubmitOutcome::Skipped => writeln!(out, "Nothing to add.")?,
            SubmitOutcome::Failed(message) => writeln!(out, "{message}")?,
        }
        Ok(())
    }

    fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        let favorites = self.directory.favorites.get_favorites();
        match &self.screen {
            Screen::List(view) => match view.error() {
                Some(message) => writeln!(out, "{message}")?,
                None => render::employees(out, view.filtered(), &favorites, self.format)?,
            },
            Screen::Detail(view) => match (view.error(), view.employee()) {
                (Some(message), _) => writeln!(out, "{message}")?,
                (None, Some(employee)) => render::employee_detail(
                    out,
                    employee,
                    view.notes(),
                    view.is_favorite(),
                    self.format,
                )?,
                (None, None) => writeln!(out, "{}", detail::NOT_FOUND)?,
            },
            Screen::Favorites(view) => match view.error() {
                Some(message) => writeln!(out, "{message}")?,
                None if view.employees().is_empty() && self.format != OutputFormat::Json => {
                    writeln!(out, "No favorite employees yet.")?;
                }
                None => render::employees(out, view.employees(), &favorites, self.format)?,
            },
        }
        Ok(())
    }
}
