//! Middleware for modifying requests and responses.

use super::{
    error::{ApiResult, ClientError},
    metrics,
};
use axum::{
    body::{Body, Bytes},
    extract::MatchedPath,
    middleware::Next,
    response::IntoResponse,
};
use http::{Request, Response};
use http_body_util::BodyExt;
use std::time::Instant;
use tower_http::trace::MakeSpan;

static X_REQUEST_ID: &str = "x-request-id";

/// Adds the request id to the span of each request.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MakeRequestIdSpan;

impl<B> MakeSpan<B> for MakeRequestIdSpan {
    fn make_span(&mut self, request: &Request<B>) -> tracing::Span {
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|id| id.to_str().ok())
            .unwrap_or("unknown");
        tracing::info_span!(
            "request",
            request_id = request_id,
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}

/// Logs request and response bodies and records request metrics.
pub(crate) async fn log_request_response(
    req: Request<Body>,
    next: Next,
) -> ApiResult<impl IntoResponse> {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let (parts, body) = req.into_parts();
    let body = buffer_and_print("Request", body).await?;
    let req = Request::from_parts(parts, Body::from(body));

    let res = next.run(req).await;

    let (parts, body) = res.into_parts();
    let body = buffer_and_print("Response", body).await?;
    let res = Response::from_parts(parts, Body::from(body));

    metrics::record_request(&method, &path, res.status().as_u16(), start);
    Ok(res)
}

/// Read the entire body stream and store it in memory.
async fn buffer_and_print(direction: &str, body: Body) -> ApiResult<Bytes> {
    let body = body
        .collect()
        .await
        .map_err(|e| ClientError::BadRequest(format!("failed to read {direction} body: {e}")))?
        .to_bytes();

    // Log if valid text
    if let Ok(body) = std::str::from_utf8(&body) {
        tracing::trace!("{} body = {:?}", direction, body);
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Router};
    use http::StatusCode;
    use tower::ServiceExt;

    fn echo_app() -> Router {
        Router::new()
            .route("/echo", post(|body: String| async move { body }))
            .layer(axum::middleware::from_fn(log_request_response))
    }

    #[tokio::test]
    async fn bodies_pass_through_unchanged() {
        let req = Request::post("/echo")
            .body(Body::from("Ciao World!"))
            .unwrap();
        let res = echo_app().oneshot(req).await.unwrap();
        assert_eq!(StatusCode::OK, res.status());
        let body = res.into_body().collect().await.unwrap().to_bytes();
        assert_eq!("Ciao World!".as_bytes(), &body[..]);
    }

    #[tokio::test]
    async fn requests_are_counted_by_matched_path() {
        let handle = metrics::init_metrics();
        let req = Request::post("/echo").body(Body::empty()).unwrap();
        let _ = echo_app().oneshot(req).await.unwrap();
        assert!(metrics::render(&handle).contains(r#"path="/echo""#));
    }

    #[test]
    fn span_tolerates_missing_request_id() {
        let req = Request::get("/greet/").body(()).unwrap();
        let _span = MakeRequestIdSpan.make_span(&req);
    }
}
