//! Status: the three JSend outcome kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::JSendError;

/// The outcome kind of a JSend response.
///
/// - `success`: the call worked; `data` carries the result.
/// - `fail`: the request was rejected (bad input, precondition); `data` explains why.
/// - `error`: processing broke on the server side; `message` explains it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Success,
    Fail,
    Error,
}

impl Status {
    /// Every status an envelope may carry, in wire order of the convention.
    pub const ALL: [Status; 3] = [Status::Success, Status::Fail, Status::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Fail => "fail",
            Status::Error => "error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = JSendError;

    // Exact, case-sensitive match: "Success" is not a status.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| JSendError::InvalidStatus(s.to_string()))
    }
}

impl TryFrom<&str> for Status {
    type Error = JSendError;

    fn try_from(value: &str) -> Result<Self, JSendError> {
        value.parse()
    }
}
