use std::time::Duration;

use thiserror::Error;

/// The raw performance document could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or TLS failure from the underlying HTTP client. The request URL
    /// is stripped so the service key never reaches logs.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {resource}")]
    UnexpectedStatus { status: u16, resource: String },

    #[error("empty response body from {resource}")]
    EmptyBody { resource: String },

    /// KOPIS answered 200 but the envelope carries a non-zero `returncode`.
    #[error("KOPIS API error {code}: {message}")]
    Api { code: String, message: String },

    #[error("request to {resource} timed out after {after:?}")]
    Timeout { resource: String, after: Duration },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// A dotted date did not match `YYYY.MM.DD`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date {input:?}: expected YYYY.MM.DD")]
pub struct FormatError {
    pub input: String,
}

/// The fetched document is structurally invalid or lacks mandatory fields.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("XML deserialization error: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("document has no <db> performance element")]
    MissingElement,

    #[error("mandatory field <{0}> is missing or blank")]
    MissingField(&'static str),

    #[error("field <{field}> holds an invalid date: {source}")]
    Date {
        field: &'static str,
        #[source]
        source: FormatError,
    },

    #[error("start date {start} is after end date {end}")]
    DateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("unknown performance state {0:?}")]
    UnknownState(String),
}

/// The venue could not be geocoded. Recovered by the ingestor as a warning.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("facility lookup failed: {0}")]
    Lookup(#[from] FetchError),

    #[error("facility XML deserialization error: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("no facility matches venue {venue:?}")]
    NotFound { venue: String },

    #[error("facility field <{field}> has unusable value {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("geocode lookup for {venue:?} timed out after {after:?}")]
    Timeout { venue: String, after: Duration },
}

/// Fatal failure of one ingestion call.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
}
