// Permissive cross-origin handling for every route on the shared router

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const ALLOWED_METHODS: &str = "GET,POST,OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Answers pre-flight requests directly with an empty body and stamps the
/// CORS headers on every other response.
pub async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        ().into_response()
    } else {
        next.run(request).await
    };

    apply_cors_headers(response.headers_mut());
    response
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use http_body_util::BodyExt;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tower::ServiceExt;

    fn counting_router(calls: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/ping",
                get(move || {
                    let calls = calls.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        "pong"
                    }
                })
                .options(|| async { "handler ran" }),
            )
            .layer(middleware::from_fn(cors))
    }

    fn assert_cors_headers(headers: &HeaderMap) {
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET,POST,OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    #[tokio::test]
    async fn test_options_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/ping")
            .body(Body::empty())
            .unwrap();

        let response = counting_router(calls.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors_headers(response.headers());
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_headers_added_to_handler_response() {
        let calls = Arc::new(AtomicUsize::new(0));
        let request = Request::builder().uri("/ping").body(Body::empty()).unwrap();

        let response = counting_router(calls.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors_headers(response.headers());
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"pong");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_headers_added_to_not_found() {
        let request = Request::builder().uri("/missing").body(Body::empty()).unwrap();

        let response = counting_router(Arc::new(AtomicUsize::new(0)))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_cors_headers(response.headers());
    }
}
