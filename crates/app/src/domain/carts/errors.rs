//! Carts manager errors.

use std::time::Duration;

use thiserror::Error;

use crate::domain::carts::{codec::DecodeError, repositories::RecordsRepositoryError};

#[derive(Debug, Error)]
pub enum CartsManagerError {
    /// The bulk listing found no stored carts at all.
    #[error("no cart data found")]
    NotFound,

    #[error("invalid cart data: {0}")]
    Decode(#[from] DecodeError),

    #[error("failed to encode cart payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(#[from] RecordsRepositoryError),

    #[error("storage did not respond within {}ms", .0.as_millis())]
    Timeout(Duration),
}
