//! Typed failures for the poll cycle.
//!
//! Each stage of a cycle fails with its own error type so the driver can log
//! and report the failure without guessing where it came from. `CycleError`
//! is the union the driver catches at the top of a cycle.
use thiserror::Error;

/// Startup configuration problems. Fatal: the poll loop never starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required variable {name} is missing")]
    Missing { name: &'static str },

    #[error("required variable {name} is empty")]
    Empty { name: &'static str },
}

/// The status endpoint could not be queried or did not answer with JSON.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: ureq::Error,
    },

    #[error("endpoint {endpoint} answered with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("response from {endpoint} is not valid JSON: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: ureq::Error,
    },
}

/// The response decoded but does not have the expected top-level shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseError {
    #[error("{field} has type {found}, expected {expected}")]
    DataType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("response has no \"homeworks\" key")]
    NoKey,
}

/// The review item is missing a field or carries an unknown status code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("review item has no \"{0}\" field")]
    MissingField(&'static str),

    #[error("unknown review status {0:?}")]
    UnknownStatus(String),
}

/// A message could not be handed to the messaging transport.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to send message to chat {chat_id}: {source}")]
    Transport {
        chat_id: String,
        #[source]
        source: ureq::Error,
    },

    #[error("telegram rejected message for chat {chat_id} (status {status}): {description}")]
    Rejected {
        chat_id: String,
        status: u16,
        description: String,
    },
}

/// Any non-fatal failure inside one poll cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
