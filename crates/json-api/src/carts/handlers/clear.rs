//! Clear Cart Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use cart_app::domain::carts::models::UserId;

use crate::{
    carts::errors::{CartApiError, into_status_error},
    extensions::*,
};

/// Clear Cart Handler
///
/// Empties the user's cart. The cart itself is kept.
#[endpoint(
    tags("carts"),
    summary = "Clear Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
        (status_code = StatusCode::GATEWAY_TIMEOUT, description = "Datastore Timeout"),
    ),
)]
#[tracing::instrument(
    name = "carts.clear",
    skip(userid, depot),
    fields(user_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    userid: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, CartApiError> {
    let carts = depot.carts_or_500()?;
    let user = UserId::new(userid.into_inner());

    tracing::Span::current().record("user_id", tracing::field::display(&user));

    carts
        .clear_cart(user.clone())
        .await
        .map_err(|error| into_status_error("clearing cart", error))?;

    tracing::info!(user_id = %user, "cleared cart");

    Ok(StatusCode::OK)
}
