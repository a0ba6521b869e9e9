//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    middleware::Next,
    response::Response,
};

/// Bodies longer than this many bytes are truncated at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the response body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and logged in full at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = read_body(body).await;
    log_body("Received request", &format!("{parts:#?}"), &body);

    let request = Request::from_parts(parts, Body::from(body));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body = read_body(body).await;
    log_body("Sending response", &format!("{parts:#?}"), &body);

    Response::from_parts(parts, Body::from(body))
}

/// Buffer `body`. A body that cannot be read is logged and replaced with an empty one.
async fn read_body(body: Body) -> Bytes {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_else(|error| {
            tracing::error!("Could not read body: {error}");
            Bytes::new()
        })
}

fn log_body(event: &str, head: &str, body: &Bytes) {
    let text = String::from_utf8_lossy(body);

    match truncate(&text, LOG_BODY_LENGTH_LIMIT) {
        Some(truncated) => {
            tracing::info!("{event}: {head}\nbody: {truncated}...");
            tracing::debug!("Full body: {text:?}");
        }
        None => tracing::info!("{event}: {head}\nbody: {text:?}"),
    }
}

/// The longest prefix of `text` that fits in `limit` bytes without splitting
/// a character, or `None` if `text` already fits.
fn truncate(text: &str, limit: usize) -> Option<&str> {
    if text.len() <= limit {
        return None;
    }

    let end = (0..=limit)
        .rev()
        .find(|&index| text.is_char_boundary(index))
        .unwrap_or(0);

    Some(&text[..end])
}

#[cfg(test)]
mod tests {
    use axum::{Router, middleware, routing::post};
    use tokio::net::TcpListener;

    use super::{logging_middleware, truncate};

    #[test]
    fn short_text_is_not_truncated() {
        assert_eq!(truncate("amount=500", 64), None);
    }

    #[test]
    fn truncates_on_char_boundary() {
        // Each character is three bytes long.
        assert_eq!(truncate("朱羅記帳", 7), Some("朱羅"));
        assert_eq!(truncate("abcdef", 3), Some("abc"));
    }

    #[tokio::test]
    async fn body_passes_through_unchanged() {
        let app = Router::new()
            .route("/echo", post(|body: String| async move { body }))
            .layer(middleware::from_fn(logging_middleware));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let body = "description=".to_owned() + &"全聯".repeat(40);

        let response = reqwest::Client::new()
            .post(format!("http://{address}/echo"))
            .body(body.clone())
            .send()
            .await
            .unwrap();

        assert_eq!(response.text().await.unwrap(), body);
    }
}
