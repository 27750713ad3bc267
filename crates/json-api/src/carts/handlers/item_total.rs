//! Cart Item Total Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use cart_app::domain::carts::models::{CartItemTotal, UserId};

use crate::{
    carts::{
        errors::{CartApiError, into_status_error},
        responses::CartItemTotalResponse,
    },
    extensions::*,
};

/// Cart Item Total Handler
///
/// Returns the sum of item quantities in the user's cart.
#[endpoint(
    tags("carts"),
    summary = "Cart Item Total",
    responses(
        (status_code = StatusCode::OK, description = "Item count", body = CartItemTotalResponse),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
        (status_code = StatusCode::GATEWAY_TIMEOUT, description = "Datastore Timeout"),
    ),
)]
#[tracing::instrument(
    name = "carts.items_in_cart",
    skip(userid, depot),
    fields(user_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    userid: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartItemTotalResponse>, CartApiError> {
    let carts = depot.carts_or_500()?;
    let user = UserId::new(userid.into_inner());

    tracing::Span::current().record("user_id", tracing::field::display(&user));

    let total_items = carts
        .items_in_cart(user.clone())
        .await
        .map_err(|error| into_status_error("counting items", error))?;

    Ok(Json(
        CartItemTotal {
            user_id: user,
            total_items,
        }
        .into(),
    ))
}
