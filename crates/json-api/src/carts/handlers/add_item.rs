//! Add Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use cart_app::domain::carts::models::{Item, UserId};

use crate::{
    carts::{
        errors::{CartApiError, into_status_error},
        responses::UserIdResponse,
    },
    extensions::*,
};

/// Add Item Handler
///
/// Appends an item to the user's cart. An item whose id is already in the
/// cart is added again rather than merged.
#[endpoint(
    tags("carts"),
    summary = "Add Item",
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
        (status_code = StatusCode::GATEWAY_TIMEOUT, description = "Datastore Timeout"),
    ),
)]
#[tracing::instrument(
    name = "carts.add_item",
    skip(userid, req, depot),
    fields(user_id = tracing::field::Empty, item_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    userid: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<UserIdResponse>, CartApiError> {
    let carts = depot.carts_or_500()?;
    let user = UserId::new(userid.into_inner());

    let body = req.payload().await.or_400("unmarshaling item")?;
    let item = Item::from_json(body).or_400("unmarshaling item")?;

    let span = tracing::Span::current();

    span.record("user_id", tracing::field::display(&user));
    span.record("item_id", tracing::field::display(&item.id));

    carts
        .add_item(user.clone(), item)
        .await
        .map_err(|error| into_status_error("adding item", error))?;

    Ok(Json(user.into()))
}
