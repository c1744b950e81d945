//! Screen state for the list, detail and favorites screens.
//!
//! Each view owns a subscription to the favorites store, so a toggle on any
//! screen is visible on every other one.

pub mod detail;
pub mod favorites;
pub mod list;
pub mod route;

pub use detail::{EmployeeDetailView, SubmitOutcome};
pub use favorites::FavoritesView;
pub use list::EmployeeListView;
pub use route::Route;
