//! `x-request-id` propagation.
//!
//! An upstream ID is reused when it is a short printable token; otherwise a
//! UUID v4 is generated. The ID is recorded on the current span, tagged on
//! the Sentry scope, stored in request extensions and echoed in the response.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// The ID assigned to the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Reuse `upstream` if acceptable, else generate a fresh ID.
    #[must_use]
    pub fn resolve(upstream: Option<&HeaderValue>) -> Self {
        upstream
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|id| is_acceptable(id))
            .map_or_else(|| Self(Uuid::new_v4().to_string()), |id| Self(id.to_string()))
    }
}

fn is_acceptable(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LEN
        && id.bytes().all(|b| b.is_ascii_graphic())
}

/// Middleware that ensures every request has a request ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::resolve(request.headers().get(REQUEST_ID_HEADER));

    Span::current().record("request_id", request_id.0.as_str());
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id.0);
    });

    let header = HeaderValue::from_str(&request_id.0).ok();
    request.extensions_mut().insert(request_id);

    let mut response = next.run(request).await;
    if let Some(value) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_id_is_reused() {
        let header = HeaderValue::from_static("abc-123");
        assert_eq!(RequestId::resolve(Some(&header)).0, "abc-123");
    }

    #[test]
    fn test_missing_or_unusable_id_is_generated() {
        let generated = RequestId::resolve(None);
        assert!(Uuid::parse_str(&generated.0).is_ok());

        let spaced = HeaderValue::from_static("has space");
        assert!(Uuid::parse_str(&RequestId::resolve(Some(&spaced)).0).is_ok());

        let long = HeaderValue::from_str(&"x".repeat(MAX_REQUEST_ID_LEN + 1)).unwrap();
        assert!(Uuid::parse_str(&RequestId::resolve(Some(&long)).0).is_ok());
    }
}
