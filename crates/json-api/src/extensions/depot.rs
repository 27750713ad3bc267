//! Depot helper extensions.

use std::{any::Any, sync::Arc};

use cart_app::domain::carts::CartsManager;
use salvo::prelude::{Depot, StatusError};

use crate::state::State;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// The carts manager from the injected application state.
    fn carts_or_500(&self) -> Result<Arc<dyn CartsManager>, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn carts_or_500(&self) -> Result<Arc<dyn CartsManager>, StatusError> {
        Ok(self.obtain_or_500::<Arc<State>>()?.app.carts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_state_is_internal_server_error() {
        let depot = Depot::new();

        let result = depot.carts_or_500();

        assert!(
            matches!(result, Err(ref error) if error.code.is_server_error()),
            "expected 500 without injected state"
        );
    }
}
