//! App Router

use salvo::Router;

use crate::carts::handlers;

/// Cart routes. Every user-scoped route takes the user id as its last segment.
pub(crate) fn app_router() -> Router {
    Router::with_path("cart")
        .push(Router::with_path("all").get(handlers::all::handler))
        .push(
            Router::with_path("item")
                .push(Router::with_path("add/{userid}").post(handlers::add_item::handler))
                .push(Router::with_path("modify/{userid}").post(handlers::modify_item::handler)),
        )
        .push(Router::with_path("modify/{userid}").post(handlers::replace::handler))
        .push(Router::with_path("clear/{userid}").get(handlers::clear::handler))
        .push(
            Router::with_path("items")
                .push(Router::with_path("total/{userid}").get(handlers::item_total::handler))
                .push(Router::with_path("{userid}").get(handlers::items::handler)),
        )
        .push(Router::with_path("total/{userid}").get(handlers::value_total::handler))
}
