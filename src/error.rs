//! Error taxonomy shared by the scraper and analysis tools.
//!
//! Score and schema errors are row-scoped: they are collected as
//! [`RowIssue`]s and the batch keeps going. Fetch, persist and notify errors
//! belong to a single pipeline step.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("score {raw:?} has {parts} part(s), expected home and away")]
    Schema { raw: String, parts: usize },
    #[error("score {raw:?} has non-numeric token {token:?}")]
    Parse { raw: String, token: String },
    #[error("row is missing the {column} value")]
    MissingTeam { column: &'static str },
}

impl ScoreError {
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. } | Self::MissingTeam { .. })
    }
}

/// A row that could not contribute to numeric aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}: {error}")]
pub struct RowIssue {
    pub row: usize,
    pub raw_score: String,
    pub error: ScoreError,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http client unavailable: {0}")]
    Client(String),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered http {status}")]
    Status { url: String, status: u16 },
    #[error("no match rows found at {url}")]
    EmptyTable { url: String },
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("cannot prepare database directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification transport not configured: missing {0}")]
    NotConfigured(&'static str),
    #[error("http client unavailable: {0}")]
    Client(String),
    #[error("notification request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("notification endpoint answered http {0}")]
    Status(u16),
}
