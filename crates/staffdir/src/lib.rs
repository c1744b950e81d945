//! `staffdir` - A command-line client for the employee directory
//!
//! This library provides the employee cache, the locally persisted favorites,
//! employee notes, and the screen state behind the list, detail and favorites
//! views.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod api;
pub mod cli;
pub mod config;
pub mod directory;
pub mod employees;
pub mod error;
pub mod favorites;
pub mod logging;
pub mod model;
pub mod notes;
pub mod shell;
pub mod storage;
pub mod views;

pub use api::{DirectoryApi, HttpDirectoryApi};
pub use config::Config;
pub use directory::Directory;
pub use employees::{EmployeeList, EmployeeService};
pub use error::{Error, Result};
pub use favorites::{FavoriteSet, FavoritesStore};
pub use logging::init_logging;
pub use model::{Address, CreateNoteRequest, Employee, Note};
pub use notes::NotesService;
pub use shell::Shell;
pub use storage::Storage;
