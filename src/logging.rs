//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;

use crate::Error;

/// The maximum number of bytes of a request or response body that is logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body, in bytes, that is read into memory.
///
/// Matches the default body limit of axum's `Json` extractor.
pub const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
///
/// Requests with bodies larger than [MAX_REQUEST_BODY_BYTES] are answered with
/// 413 Payload Too Large without being passed on.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match buffer_request_body(body).await {
        Ok(bytes) => bytes,
        Err(error) => {
            log_request(&parts, "");
            return error.into_response();
        }
    };
    log_request(&parts, &String::from_utf8_lossy(&body_bytes));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

async fn buffer_request_body(body: Body) -> Result<Bytes, Error> {
    axum::body::to_bytes(body, MAX_REQUEST_BODY_BYTES)
        .await
        .map_err(|error| {
            let error = error.into_inner();

            if error.downcast_ref::<LengthLimitError>().is_some() {
                Error::RequestRejected {
                    status: StatusCode::PAYLOAD_TOO_LARGE,
                    message: format!(
                        "request body must not be larger than {MAX_REQUEST_BODY_BYTES} bytes"
                    ),
                }
            } else {
                Error::MalformedRequest(format!("could not read request body: {error}"))
            }
        })
}

fn truncate(body: &str) -> &str {
    if body.len() <= LOG_BODY_LENGTH_LIMIT {
        return body;
    }

    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {} {}\nbody: {}...",
            parts.method,
            parts.uri,
            truncate(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!(
            "Received request: {} {}\nbody: {body:?}",
            parts.method,
            parts.uri
        );
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {}\nbody: {}...",
            parts.status,
            truncate(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {}\nbody: {body:?}", parts.status);
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Bytes, http::StatusCode};
    use axum_test::TestServer;

    use crate::{
        AppState, build_router, endpoints,
        transaction::{InMemoryTransactionStore, TransactionStore},
    };

    use super::{LOG_BODY_LENGTH_LIMIT, MAX_REQUEST_BODY_BYTES, truncate};

    fn get_test_server() -> (TestServer, InMemoryTransactionStore) {
        let store = InMemoryTransactionStore::new();
        let app = build_router(AppState::new(store.clone()));
        let server = TestServer::new(app).expect("Could not create test server.");

        (server, store)
    }

    #[tokio::test]
    async fn oversized_request_body_is_rejected() {
        let (server, store) = get_test_server();
        let body = vec![b' '; MAX_REQUEST_BODY_BYTES + 1024 * 1024];

        let response = server
            .post(endpoints::TRANSACTIONS)
            .bytes(Bytes::from(body))
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn request_body_within_limit_is_passed_on() {
        let (server, store) = get_test_server();
        let mut body = br#"{"amount": 1.5, "timestamp": "2024-01-15T10:30:00Z"}"#.to_vec();
        body.resize(MAX_REQUEST_BODY_BYTES / 2, b' ');

        server
            .post(endpoints::TRANSACTIONS)
            .bytes(Bytes::from(body))
            .content_type("application/json")
            .await
            .assert_status(StatusCode::CREATED);

        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn short_body_is_not_truncated() {
        let body = "{\"amount\":1}";

        assert_eq!(truncate(body), body);
    }

    #[test]
    fn long_body_is_truncated_to_limit() {
        let body = "a".repeat(LOG_BODY_LENGTH_LIMIT * 2);

        assert_eq!(truncate(&body).len(), LOG_BODY_LENGTH_LIMIT);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let body = "é".repeat(LOG_BODY_LENGTH_LIMIT);

        let truncated = truncate(&body);

        assert!(truncated.len() <= LOG_BODY_LENGTH_LIMIT);
        assert!(truncated.chars().all(|c| c == 'é'));
    }
}
