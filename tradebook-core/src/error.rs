//! Error types shared across the entry workflow.

use std::collections::HashMap;

use thiserror::Error;

/// Failure talking to a collaborator endpoint.
///
/// Carries enough to show the operator a general message and, for rejected
/// submissions, the field-level errors the endpoint returned. Nothing here
/// is fatal; every variant is recoverable by correcting input or retrying
/// the request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request never produced a usable response.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: anyhow::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("{endpoint} returned {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
        field_errors: HashMap<String, String>,
    },

    /// The response body could not be decoded.
    #[error("could not decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: anyhow::Error,
    },
}

impl RequestError {
    pub fn transport(endpoint: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        RequestError::Transport {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    pub fn api(
        endpoint: impl Into<String>,
        status: u16,
        message: impl Into<String>,
        field_errors: HashMap<String, String>,
    ) -> Self {
        RequestError::Api {
            endpoint: endpoint.into(),
            status,
            message: message.into(),
            field_errors,
        }
    }

    pub fn decode(endpoint: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        RequestError::Decode {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    /// Field-level errors returned by the endpoint, if it sent any.
    pub fn field_errors(&self) -> Option<&HashMap<String, String>> {
        match self {
            RequestError::Api { field_errors, .. } if !field_errors.is_empty() => {
                Some(field_errors)
            }
            _ => None,
        }
    }
}

/// Error surfaced by session-level operations, which can fail either on
/// local validation or on a collaborator call.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl EntryError {
    /// The field-scoped validation errors, when this is a validation failure.
    pub fn validation(&self) -> Option<&validator::ValidationErrors> {
        match self {
            EntryError::Validation(errors) => Some(errors),
            EntryError::Request(_) => None,
        }
    }
}
