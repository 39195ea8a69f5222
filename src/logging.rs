//! Middleware for logging requests and responses.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{StatusCode, request, response},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The number of bytes of a response body that is logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// The request line is logged at the `info` level, as is the response status
/// and the start of the response body. If the response body is longer than
/// [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated and the full body is logged
/// at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    log_request(&parts);

    let response = next.run(Request::from_parts(parts, body)).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match to_bytes(body, usize::MAX).await {
        Ok(body_bytes) => body_bytes,
        Err(error) => {
            tracing::error!("could not read response body for logging: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

fn log_request(parts: &request::Parts) {
    tracing::info!("Received request: {} {}", parts.method, parts.uri);
}

fn log_response(parts: &response::Parts, body: &str) {
    let truncated = truncate_body(body, LOG_BODY_LENGTH_LIMIT);

    if truncated.len() < body.len() {
        tracing::info!("Sending response: {}\nbody: {truncated}...", parts.status);
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {}\nbody: {body:?}", parts.status);
    }
}

/// The longest prefix of `body` that fits in `limit` bytes without splitting a character.
fn truncate_body(body: &str, limit: usize) -> &str {
    if body.len() <= limit {
        return body;
    }

    let mut end = limit;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

#[cfg(test)]
mod tests {
    use axum::{Router, middleware, routing::get};
    use axum_test::TestServer;

    use super::{logging_middleware, truncate_body};

    #[test]
    fn short_bodies_are_not_truncated() {
        assert_eq!(truncate_body("{\"total\":3}", 64), "{\"total\":3}");
    }

    #[test]
    fn long_bodies_are_cut_at_the_limit() {
        let body = "a".repeat(100);

        assert_eq!(truncate_body(&body, 64).len(), 64);
    }

    #[test]
    fn truncation_keeps_whole_characters() {
        // Each 'é' is two bytes, so byte 5 falls inside a character.
        let body = "ééééé";

        assert_eq!(truncate_body(body, 5), "éé");
    }

    #[tokio::test]
    async fn middleware_passes_response_through() {
        let app = Router::new()
            .route("/", get(|| async { "x".repeat(200) }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::new(app);

        let response = server.get("/").await;

        response.assert_status_ok();
        response.assert_text("x".repeat(200));
    }
}
