//! Get Cart Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use cart_app::domain::carts::models::{Cart, UserId};

use crate::{
    carts::{
        errors::{CartApiError, into_status_error},
        responses::CartResponse,
    },
    extensions::*,
};

/// Get Cart Handler
///
/// Returns the user's cart. A user without a stored cart gets an empty one.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "The user's cart", body = CartResponse),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
        (status_code = StatusCode::GATEWAY_TIMEOUT, description = "Datastore Timeout"),
    ),
)]
#[tracing::instrument(
    name = "carts.get_items",
    skip(userid, depot),
    fields(user_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    userid: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, CartApiError> {
    let carts = depot.carts_or_500()?;
    let user = UserId::new(userid.into_inner());

    tracing::Span::current().record("user_id", tracing::field::display(&user));

    let items = carts
        .get_items(user.clone())
        .await
        .map_err(|error| into_status_error("getting items", error))?;

    Ok(Json(
        Cart {
            user_id: user,
            items,
        }
        .into(),
    ))
}
