//! Request logging middleware

use super::super::state::ServerState;
use axum::extract::State;
use axum::{
    body::Body,
    http::{
        header::{HeaderMap, CONTENT_LENGTH},
        Request, Response, StatusCode, Uri,
    },
    middleware::Next,
    response::IntoResponse,
};
use std::time::Instant;
use tracing::{error, info};

#[derive(PartialEq, PartialOrd, Clone, Debug, clap::ValueEnum)]
pub enum RequestsLoggingLevel {
    None,
    Path,
    Headers,
    Body,
}

impl Default for RequestsLoggingLevel {
    fn default() -> Self {
        Self::Path
    }
}

impl std::fmt::Display for RequestsLoggingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

const MAX_LOGGABLE_BODY_LENGTH: usize = 1024;

/// Query parameters that carry credentials and must never reach the logs.
const SECRET_PARAMS: [&str; 3] = ["p", "t", "s"];

/// The response body size, or why it is unknown.
fn content_length(headers: &HeaderMap) -> Result<usize, &'static str> {
    let value = headers
        .get(CONTENT_LENGTH)
        .ok_or("no content-length header")?;
    value
        .to_str()
        .ok()
        .and_then(|v| v.parse().ok())
        .ok_or("unreadable content-length header")
}

/// The request path and query with credential values masked.
fn redacted_uri(uri: &Uri) -> String {
    let query = match uri.query() {
        Some(q) => q,
        None => return uri.path().to_string(),
    };
    let params: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SECRET_PARAMS.contains(&key) => format!("{}=***", key),
            _ => pair.to_string(),
        })
        .collect();
    format!("{}?{}", uri.path(), params.join("&"))
}

fn log_headers(label: &str, headers: &HeaderMap) {
    info!("  {}:", label);
    for (name, value) in headers {
        info!("    {:?}: {:?}", name, value);
    }
}

/// Logs the body of a small response, handing back an equivalent response.
async fn log_body(response: Response<Body>) -> Response<Body> {
    let size = match content_length(response.headers()) {
        Ok(size) => size,
        Err(reason) => {
            info!("  Resp Body: {}", reason);
            return response;
        }
    };
    if size >= MAX_LOGGABLE_BODY_LENGTH {
        info!("  Resp Body: {:#}", byte_unit::Byte::from(size));
        return response;
    }

    let (parts, body) = response.into_parts();
    match axum::body::to_bytes(body, size).await {
        Ok(bytes) => {
            info!("  Resp Body: {}", String::from_utf8_lossy(&bytes));
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(err) => {
            error!("Failed to buffer response body: {:?}", err);
            let mut failed = Response::new(Body::from("Internal Server Error"));
            *failed.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            failed
        }
    }
}

pub async fn log_requests(
    State(state): State<ServerState>,
    request: Request<Body>,
    next: Next,
) -> impl IntoResponse {
    let level = state.config.requests_logging_level.clone();
    if level == RequestsLoggingLevel::None {
        return next.run(request).await;
    }

    let start = Instant::now();
    info!(">>> {} {}", request.method(), redacted_uri(request.uri()));
    if level >= RequestsLoggingLevel::Headers {
        log_headers("Req Headers", request.headers());
    }

    let mut response = next.run(request).await;

    if level >= RequestsLoggingLevel::Headers {
        log_headers("Resp Headers", response.headers());
    }
    if level >= RequestsLoggingLevel::Body {
        response = log_body(response).await;
    }

    info!(
        "<<< {} ({}ms)",
        response.status().as_u16(),
        start.elapsed().as_millis()
    );
    response
}
