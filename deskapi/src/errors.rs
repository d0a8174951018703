//! Errors for this crate.

use reqwest::header::InvalidHeaderValue;
use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum InvalidSiteUrl {
    #[error("Given URL does not start with \"http://\" or \"https://\": {0}")]
    Protocol(String),

    #[error("Given URL must not end with \"/\": {0}")]
    TrailingSlash(String),
}

aliri_braid::from_infallible!(InvalidSiteUrl);

/// Errors representing failed interactions with desk.com, or with the
/// data it sent back.
#[derive(thiserror::Error, Debug)]
pub enum DeskError {
    /// Any response with a status code of 400 or above. The body is not inspected.
    #[error("Desk error: {}", .0.as_u16())]
    Status(StatusCode),

    /// Request could not be sent, or the response could not be read.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[error("Could not encode request body: {0}")]
    Encode(serde_json::Error),

    #[error("\"{0}\" not found")]
    MissingField(String),

    #[error("Field \"{field}\" is not a {expected}")]
    FieldType {
        field: String,
        expected: &'static str,
    },

    #[error("No \"{0}\" link")]
    MissingLink(String),

    #[error("Index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No translation for locale \"{0}\"")]
    UnknownLocale(String),

    /// An entry must be a JSON object carrying a `_links` block.
    #[error("Not an entry: {0}")]
    NotAnEntry(String),

    #[error("Cannot parse an ID from \"{0}\"")]
    InvalidId(String),

    #[error("Collection at \"{href}\" is not a {expected} collection")]
    CollectionKind {
        href: String,
        expected: &'static str,
    },

    #[error("Could not sign request: {0}")]
    Signing(String),

    #[error(transparent)]
    Header(#[from] InvalidHeaderValue),
}

impl DeskError {
    /// The HTTP status code, if this error came from an error response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(status) => Some(*status),
            _ => None,
        }
    }
}

/// Turn error responses into [DeskError::Status].
pub(crate) fn check(
    res: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, DeskError> {
    let status = res.status();
    if status.as_u16() >= 400 {
        Err(DeskError::Status(status))
    } else {
        Ok(res)
    }
}
