//! Request failure classification.

use thiserror::Error;

/// Why a single REST call did not produce a usable response.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Server answered with a non-2xx status.
    #[error("{method} {url} returned {status}: {message}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        message: String,
    },

    /// Connection, TLS or timeout failure before a status was received.
    #[error("{method} {url} failed: {message}")]
    Transport {
        method: &'static str,
        url: String,
        message: String,
    },

    /// Response body could not be decoded.
    #[error("{method} {url} returned an unreadable body: {message}")]
    Decode {
        method: &'static str,
        url: String,
        message: String,
    },
}

impl RequestError {
    /// Classifies an octocrab error for the given request.
    pub(crate) fn classify(method: &'static str, url: &str, error: octocrab::Error) -> Self {
        let url = url.to_string();
        match error {
            octocrab::Error::GitHub { source, .. } => Self::Status {
                method,
                url,
                status: source.status_code.as_u16(),
                message: source.message.clone(),
            },
            octocrab::Error::Serde { source, .. } => Self::Decode {
                method,
                url,
                message: source.to_string(),
            },
            octocrab::Error::Json { source, .. } => Self::Decode {
                method,
                url,
                message: source.to_string(),
            },
            other => Self::Transport {
                method,
                url,
                message: other.to_string(),
            },
        }
    }

    /// Returns true for a 404 status.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// URL of the failed request.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. } | Self::Transport { url, .. } | Self::Decode { url, .. } => {
                url
            }
        }
    }
}
