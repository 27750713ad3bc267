//! Replace Cart Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use cart_app::domain::carts::models::{Cart, UserId};

use crate::{
    carts::{
        errors::{CartApiError, into_status_error},
        responses::UserIdResponse,
    },
    extensions::*,
};

/// Replace Cart Handler
///
/// Overwrites the user's cart with the submitted items. The user is taken
/// from the path; any `userid` in the body is ignored.
#[endpoint(
    tags("carts"),
    summary = "Replace Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
        (status_code = StatusCode::GATEWAY_TIMEOUT, description = "Datastore Timeout"),
    ),
)]
#[tracing::instrument(
    name = "carts.replace",
    skip(userid, req, depot),
    fields(user_id = tracing::field::Empty, items = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    userid: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<UserIdResponse>, CartApiError> {
    let carts = depot.carts_or_500()?;
    let user = UserId::new(userid.into_inner());

    let body = req.payload().await.or_400("unmarshaling cart")?;
    let cart = Cart::from_json(body).or_400("unmarshaling cart")?;

    let span = tracing::Span::current();

    span.record("user_id", tracing::field::display(&user));
    span.record("items", cart.items.len());

    carts
        .store_items(user.clone(), cart.items)
        .await
        .map_err(|error| into_status_error("storing items", error))?;

    Ok(Json(user.into()))
}
