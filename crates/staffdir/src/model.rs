//! Directory record types.
//!
//! These mirror the JSON the directory API speaks (camelCase keys).

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// An employee as returned by `GET /employees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Directory identifier.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Work email address.
    pub email: String,
    /// Phone number, free-form.
    pub phone: String,
    /// URL of the profile picture.
    pub picture_url: String,
    /// Postal address, when the directory has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Postal address of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street and number.
    pub street: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Country.
    pub country: String,
    /// Postal code.
    pub postal_code: String,
}

impl Employee {
    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match of `term` against first or last name.
    ///
    /// `term` is expected to be lowercased and trimmed already; see
    /// [`normalize_search_term`].
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        self.first_name.to_lowercase().contains(term)
            || self.last_name.to_lowercase().contains(term)
    }
}

impl Address {
    /// Single-line rendering: `street, city, state postal, country`.
    #[must_use]
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}, {}",
            self.street, self.city, self.state, self.postal_code, self.country
        )
    }
}

/// Lowercase and trim a raw search term.
#[must_use]
pub fn normalize_search_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Filter employees by a raw search term. An empty term keeps everyone.
#[must_use]
pub fn filter_employees(employees: &[Employee], raw_term: &str) -> Vec<Employee> {
    let term = normalize_search_term(raw_term);
    if term.is_empty() {
        return employees.to_vec();
    }
    employees
        .iter()
        .filter(|employee| employee.matches_search(&term))
        .cloned()
        .collect()
}

/// A note attached to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Note identifier, assigned by the server.
    pub id: String,
    /// Owning employee.
    pub employee_id: String,
    /// Note text.
    pub content: String,
    /// When the server created the note, as the server sent it.
    pub created_at: String,
}

impl Note {
    /// Parse `created_at`. RFC 3339 with an offset, or without one (taken as
    /// UTC). `None` for anything else.
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|at| at.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }
}

/// Body of `POST /employees/{id}/notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    /// Note text.
    pub content: String,
}

impl CreateNoteRequest {
    /// Build a request for the given content.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
