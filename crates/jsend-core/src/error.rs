//! Error types for envelope construction and parsing.

use std::convert::Infallible;

use thiserror::Error;

/// JSendError is returned by every fallible envelope operation.
#[derive(Debug, Error)]
pub enum JSendError {
    #[error("illegal status '{0}' given; must be one of success, fail, error")]
    InvalidStatus(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("could not encode envelope: {0}")]
    Encode(serde_json::Error),
}

/// ParseError describes why a document is not a valid JSend envelope.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("could not parse data; required element '{0}' missing")]
    MissingField(&'static str),

    #[error("could not parse data; element '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("could not parse data; expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("could not decode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl JSendError {
    pub fn is_invalid_status(&self) -> bool {
        matches!(self, JSendError::InvalidStatus(_))
    }

    /// Name of the required element that was missing, if that is what failed.
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            JSendError::Parse(ParseError::MissingField(field)) => Some(field),
            _ => None,
        }
    }
}

// Lets generic status arguments accept an already-typed `Status`.
impl From<Infallible> for JSendError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
