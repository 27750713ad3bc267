//! All Carts Handler

use salvo::prelude::*;

use crate::{
    carts::{
        errors::{CartApiError, into_status_error},
        responses::CartResponse,
    },
    extensions::*,
};

/// All Carts Handler
///
/// Returns every stored cart. Fails when no carts are stored at all.
#[endpoint(
    tags("carts"),
    summary = "All Carts",
    responses(
        (status_code = StatusCode::OK, description = "Every stored cart", body = Vec<CartResponse>),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "No carts stored, or Internal Server Error"),
        (status_code = StatusCode::GATEWAY_TIMEOUT, description = "Datastore Timeout"),
    ),
)]
#[tracing::instrument(
    name = "carts.all",
    skip(depot),
    fields(count = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CartResponse>>, CartApiError> {
    let carts = depot.carts_or_500()?;

    let all = carts
        .all_carts()
        .await
        .map_err(|error| into_status_error("getting carts", error))?;

    tracing::Span::current().record("count", all.len());

    Ok(Json(all.into_iter().map(CartResponse::from).collect()))
}
