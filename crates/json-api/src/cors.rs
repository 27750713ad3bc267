//! Cross-origin response headers.

use salvo::{
    http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue},
    prelude::*,
};

/// Let browsers on any origin read every response, errors included.
#[handler]
pub(crate) async fn allow_any_origin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    ctrl.call_next(req, depot, res).await;

    res.headers_mut().insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
}
