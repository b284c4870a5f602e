//! Response construction for intercepted requests.
//!
//! # Responsibilities
//! - Stream fixture files verbatim with their declared content type
//! - Build the empty 404 used by absent table entries
//! - Build the reply for requests no intercept claims
//!
//! # Design Decisions
//! - Fixtures are read at serve time, never at registration time
//! - A fixture read failure becomes a body stream error after the 200 head,
//!   so the client sees a failed body read rather than a status code
//! - Unmatched requests get 501 so they never look like a deliberate 404

use std::path::PathBuf;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, Response, StatusCode};
use futures_util::stream;

/// 200 response whose body is the fixture at `path`.
pub fn fixture(path: PathBuf, content_type: Option<&'static str>) -> Response<Body> {
    let body = stream::once(async move {
        tokio::fs::read(&path).await.map(Bytes::from).map_err(|e| {
            tracing::error!(fixture = %path.display(), error = %e, "Failed to read fixture");
            e
        })
    });

    let mut response = Response::new(Body::from_stream(body));
    if let Some(content_type) = content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
    response
}

/// 404 with an empty body.
pub fn not_found() -> Response<Body> {
    status_only(StatusCode::NOT_FOUND)
}

/// Reply for a request that matched no intercept.
pub fn unmatched(method: &str, path: &str, query: &str) -> Response<Body> {
    let target = if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    };
    let mut response = Response::new(Body::from(format!(
        "No intercept registered for {method} {target}\n"
    )));
    *response.status_mut() = StatusCode::NOT_IMPLEMENTED;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

fn status_only(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}
