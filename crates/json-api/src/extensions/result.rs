//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use tracing::warn;

use crate::carts::errors::CartApiError;

/// Map any error to a logged bad request carrying `error <operation>: <message>`.
pub(crate) trait ResultExt<T> {
    fn or_400(self, operation: &str) -> Result<T, CartApiError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_400(self, operation: &str) -> Result<T, CartApiError> {
        self.map_err(|error| {
            warn!("error {operation}: {error}");

            CartApiError::bad_request(operation, &error)
        })
    }
}
