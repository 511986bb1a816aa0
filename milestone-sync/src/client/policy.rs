//! What a primitive does with a failed request.

use super::RequestError;
use std::fmt;
use std::str::FromStr;

/// Caller-chosen handling for failed requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log the failure and carry on with an empty result.
    #[default]
    Log,
    /// Return the failure to the caller, ending the run.
    Fatal,
}

impl ErrorPolicy {
    /// Applies the policy to a failure that has already been logged.
    pub(crate) fn settle<T>(self, error: RequestError) -> Result<Option<T>, RequestError> {
        match self {
            Self::Log => Ok(None),
            Self::Fatal => Err(error),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Log => f.write_str("log"),
            Self::Fatal => f.write_str("fatal"),
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "log" => Ok(Self::Log),
            "fatal" => Ok(Self::Fatal),
            other => Err(format!("unknown error policy '{other}', expected log or fatal")),
        }
    }
}
