//! Runner error types.

use std::path::PathBuf;

use checkout::{CheckoutError, ServiceError};
use thiserror::Error;

/// Errors that stop the runner.
#[derive(Debug, Error)]
pub enum AppError {
    /// No scenario path was given on the command line.
    #[error("usage: place-order <scenario.json>")]
    Usage,

    /// A data file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A scenario file is not valid JSON of the expected shape.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A catalog or currency file was rejected by its collaborator.
    #[error("Invalid data in {}: {source}", path.display())]
    Data {
        path: PathBuf,
        #[source]
        source: ServiceError,
    },

    /// The Prometheus recorder could not be installed.
    #[error("Failed to install metrics recorder: {0}")]
    Metrics(String),

    /// Order placement failed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// A shutdown signal arrived before the order completed.
    #[error("Interrupted before the order was placed")]
    Interrupted,

    /// The order result could not be encoded.
    #[error("Failed to encode order result: {0}")]
    Encode(#[source] serde_json::Error),
}
