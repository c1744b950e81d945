//! Remote directory API.
//!
//! [`DirectoryApi`] is the seam between the services and the network.
//! [`HttpDirectoryApi`] talks plain REST/JSON:
//!
//! - `GET  {base}/employees`
//! - `GET  {base}/employees/{id}/notes`
//! - `POST {base}/employees/{id}/notes` with `{"content": ...}`

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{CreateNoteRequest, Employee, Note};

/// Operations the directory server offers.
#[async_trait::async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Fetch every employee.
    async fn fetch_employees(&self) -> Result<Vec<Employee>>;

    /// Fetch the notes attached to one employee.
    async fn fetch_notes(&self, employee_id: &str) -> Result<Vec<Note>>;

    /// Create a note and return it as stored by the server.
    async fn create_note(&self, employee_id: &str, request: &CreateNoteRequest) -> Result<Note>;
}

/// reqwest-backed [`DirectoryApi`].
#[derive(Debug, Clone)]
pub struct HttpDirectoryApi {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpDirectoryApi {
    /// Build a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let raw = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(raw)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| Error::ConfigValidation {
                message: format!("api.base_url is not a usable base URL: '{raw}'"),
            })?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("staffdir/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::ClientBuild)?;

        Ok(Self { base_url, client })
    }

    /// Build a client from the `[api]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api.base_url, config.request_timeout())
    }

    /// The parsed base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base can always take segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }

    fn employees_url(&self) -> String {
        self.endpoint(&["employees"])
    }

    fn notes_url(&self, employee_id: &str) -> String {
        self.endpoint(&["employees", employee_id, "notes"])
    }

    /// Check the status and decode a JSON body.
    async fn decode<T: DeserializeOwned>(url: &str, resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::ApiStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await.map_err(|e| Error::http(url, e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait::async_trait]
impl DirectoryApi for HttpDirectoryApi {
    #[instrument(skip(self))]
    async fn fetch_employees(&self) -> Result<Vec<Employee>> {
        let url = self.employees_url();
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::http(&url, e))?;
        let employees: Vec<Employee> = Self::decode(&url, resp).await?;
        debug!(count = employees.len(), "Fetched employees");
        Ok(employees)
    }

    #[instrument(skip(self))]
    async fn fetch_notes(&self, employee_id: &str) -> Result<Vec<Note>> {
        let url = self.notes_url(employee_id);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::http(&url, e))?;
        let notes: Vec<Note> = Self::decode(&url, resp).await?;
        debug!(count = notes.len(), "Fetched notes");
        Ok(notes)
    }

    #[instrument(skip(self, request))]
    async fn create_note(&self, employee_id: &str, request: &CreateNoteRequest) -> Result<Note> {
        let url = self.notes_url(employee_id);
        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::http(&url, e))?;
        Self::decode(&url, resp).await
    }
}
