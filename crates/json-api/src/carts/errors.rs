//! Errors

use salvo::{
    http::StatusError,
    oapi::{Components, EndpointOutRegister, Operation},
    prelude::*,
};
use thiserror::Error;
use tracing::{error, warn};

use cart_app::domain::carts::CartsManagerError;

use crate::observability::observe_cart_failure;

/// A failed cart request, written as a plain-text body reading
/// `error <operation>: <message>`.
#[derive(Debug, Error)]
#[error("{message}")]
pub(crate) struct CartApiError {
    status: StatusCode,
    message: String,
}

impl CartApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(operation: &str, error: &impl std::fmt::Display) -> Self {
        Self::new(StatusCode::BAD_REQUEST, format!("error {operation}: {error}"))
    }

    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }

    pub(crate) fn message(&self) -> &str {
        &self.message
    }
}

impl From<StatusError> for CartApiError {
    fn from(error: StatusError) -> Self {
        Self::new(error.code, error.brief)
    }
}

impl Scribe for CartApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Text::Plain(self.message));
    }
}

impl EndpointOutRegister for CartApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        <StatusError as EndpointOutRegister>::register(components, operation);
    }
}

/// Map a carts manager failure to an HTTP error whose body reads
/// `error <operation>: <message>`.
pub(crate) fn into_status_error(operation: &str, error: CartsManagerError) -> CartApiError {
    let brief = format!("error {operation}: {error}");

    let (status, kind) = match &error {
        CartsManagerError::NotFound => {
            warn!("{brief}");

            (StatusCode::INTERNAL_SERVER_ERROR, "not_found")
        }
        CartsManagerError::Decode(_) => {
            error!("{brief}");

            (StatusCode::INTERNAL_SERVER_ERROR, "decode")
        }
        CartsManagerError::Encode(_) => {
            error!("{brief}");

            (StatusCode::INTERNAL_SERVER_ERROR, "encode")
        }
        CartsManagerError::Storage(_) => {
            error!("{brief}");

            (StatusCode::INTERNAL_SERVER_ERROR, "storage")
        }
        CartsManagerError::Timeout(_) => {
            error!("{brief}");

            (StatusCode::GATEWAY_TIMEOUT, "timeout")
        }
    };

    observe_cart_failure(operation, kind);

    CartApiError::new(status, brief)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cart_app::domain::carts::codec::DecodeError;
    use salvo::{
        http::header::CONTENT_TYPE,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[test]
    fn not_found_is_a_server_error() {
        let error = into_status_error("getting carts", CartsManagerError::NotFound);

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), "error getting carts: no cart data found");
    }

    #[test]
    fn corrupt_stored_cart_is_a_server_error() {
        let error = into_status_error(
            "getting items",
            CartsManagerError::Decode(DecodeError::Empty),
        );

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            error.message().starts_with("error getting items: "),
            "unexpected message: {}",
            error.message()
        );
    }

    #[test]
    fn timeout_is_a_gateway_timeout() {
        let error = into_status_error(
            "clearing cart",
            CartsManagerError::Timeout(Duration::from_millis(10)),
        );

        assert_eq!(error.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            error.message(),
            "error clearing cart: storage did not respond within 10ms"
        );
    }

    #[test]
    fn status_error_keeps_code_and_brief() {
        let error = CartApiError::from(StatusError::internal_server_error().brief("no state"));

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), "no state");
    }

    #[handler]
    async fn failing() -> Result<&'static str, CartApiError> {
        Err(CartApiError::new(
            StatusCode::GATEWAY_TIMEOUT,
            "error totalling cart: storage did not respond within 10ms",
        ))
    }

    #[tokio::test]
    async fn renders_message_as_the_whole_plain_text_body() -> TestResult {
        let service = Service::new(Router::with_path("fail").get(failing));

        let mut res = TestClient::get("http://example.com/fail")
            .add_header("accept", "text/html", true)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::GATEWAY_TIMEOUT));
        assert!(
            res.headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .is_some_and(|value| value.starts_with("text/plain")),
            "expected a text/plain content type"
        );
        assert_eq!(
            res.take_string().await?,
            "error totalling cart: storage did not respond within 10ms"
        );

        Ok(())
    }
}
