use thiserror::Error;

/// Failures surfaced by [`IndraClient`](crate::IndraClient) operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The payload is missing keys the operation needs. Raised before any I/O.
    #[error("{operation} requires {requirement}: {}", .missing.join(", "))]
    Validation {
        operation: &'static str,
        requirement: &'static str,
        missing: Vec<String>,
    },
    /// The server could not be reached or did not answer in time.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The server answered with a non-"ok" envelope.
    #[error("{operation} failed: {message}")]
    Remote {
        operation: &'static str,
        message: String,
    },
    /// The server answered, but the body was not a JSON object.
    #[error("{operation} returned an unreadable response (HTTP {status}): {reason}")]
    InvalidResponse {
        operation: &'static str,
        status: u16,
        reason: String,
    },
}

impl ClientError {
    /// Server-supplied message for [`ClientError::Remote`].
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            ClientError::Remote { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not connect to {url}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),
}

impl TransportError {
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_timeout() {
            TransportError::Timeout { url, source }
        } else if source.is_connect() {
            TransportError::Connect { url, source }
        } else {
            TransportError::Request { url, source }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("timeout must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_operation_and_keys() {
        let error = ClientError::Validation {
            operation: "render",
            requirement: "keys",
            missing: vec!["input".to_string(), "output".to_string()],
        };
        assert_eq!(error.to_string(), "render requires keys: input, output");
    }

    #[test]
    fn remote_message_is_exposed_verbatim() {
        let error = ClientError::Remote {
            operation: "capture",
            message: "boom".to_string(),
        };
        assert_eq!(error.remote_message(), Some("boom"));
        assert_eq!(error.to_string(), "capture failed: boom");
    }
}
