//! Cart Value Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use cart_app::domain::carts::models::{CartValueTotal, UserId};

use crate::{
    carts::{
        errors::{CartApiError, into_status_error},
        responses::CartValueTotalResponse,
    },
    extensions::*,
};

/// Cart Value Handler
///
/// Returns the sum of `quantity * price` over the user's cart.
#[endpoint(
    tags("carts"),
    summary = "Cart Value",
    responses(
        (status_code = StatusCode::OK, description = "Cart value", body = CartValueTotalResponse),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
        (status_code = StatusCode::GATEWAY_TIMEOUT, description = "Datastore Timeout"),
    ),
)]
#[tracing::instrument(
    name = "carts.value_in_cart",
    skip(userid, depot),
    fields(user_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    userid: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartValueTotalResponse>, CartApiError> {
    let carts = depot.carts_or_500()?;
    let user = UserId::new(userid.into_inner());

    tracing::Span::current().record("user_id", tracing::field::display(&user));

    let total_value = carts
        .value_in_cart(user.clone())
        .await
        .map_err(|error| into_status_error("totalling cart", error))?;

    Ok(Json(
        CartValueTotal {
            user_id: user,
            total_value,
        }
        .into(),
    ))
}
