//! Modify Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use cart_app::domain::carts::{
    modify_item,
    models::{Item, UserId},
};

use crate::{
    carts::{
        errors::{CartApiError, into_status_error},
        responses::UserIdResponse,
    },
    extensions::*,
};

/// Modify Item Handler
///
/// Replaces every item in the user's cart that has the same id as the
/// submitted item. When no item matches, the cart is left unchanged.
#[endpoint(
    tags("carts"),
    summary = "Modify Item",
    responses(
        (status_code = StatusCode::OK, description = "Cart stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
        (status_code = StatusCode::GATEWAY_TIMEOUT, description = "Datastore Timeout"),
    ),
)]
#[tracing::instrument(
    name = "carts.modify_item",
    skip(userid, req, depot),
    fields(
        user_id = tracing::field::Empty,
        item_id = tracing::field::Empty,
        replaced = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    userid: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<UserIdResponse>, CartApiError> {
    let carts = depot.carts_or_500()?;
    let user = UserId::new(userid.into_inner());

    let body = req.payload().await.or_400("unmarshaling item data")?;
    let item = Item::from_json(body).or_400("unmarshaling item data")?;

    let span = tracing::Span::current();

    span.record("user_id", tracing::field::display(&user));
    span.record("item_id", tracing::field::display(&item.id));

    let replaced = modify_item(carts.as_ref(), user.clone(), item)
        .await
        .map_err(|error| into_status_error("storing modified data", error))?;

    span.record("replaced", replaced);

    Ok(Json(user.into()))
}
