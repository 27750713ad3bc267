//! Route templates for span fields and metric labels.

const USER_ID_PLACEHOLDER: &str = "{userid}";

/// Cart routes whose final segment is a user id.
const USER_ROUTES: [&str; 7] = [
    "/cart/item/add/",
    "/cart/item/modify/",
    "/cart/modify/",
    "/cart/clear/",
    "/cart/items/total/",
    "/cart/items/",
    "/cart/total/",
];

/// Replace the user id in a cart path with a placeholder so that metric
/// labels stay bounded.
pub(super) fn route_template(path: &str) -> String {
    let path = path.trim_end_matches('/');

    USER_ROUTES
        .iter()
        .find_map(|prefix| {
            path.strip_prefix(prefix)
                .filter(|user| !user.is_empty() && !user.contains('/'))
                .map(|_user| format!("{prefix}{USER_ID_PLACEHOLDER}"))
        })
        .unwrap_or_else(|| {
            if path.is_empty() {
                "/".to_owned()
            } else {
                path.to_owned()
            }
        })
}
