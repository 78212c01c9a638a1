//! Request logging middleware

use std::time::Instant;

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use tracing::{error, field::display, info, warn};

use crate::{error::ErrorKind, middleware::AuthenticatedUser};

/// One log line per request, with the caller and the error kind when present
///
/// Rejections (a conflict of interest, a closed window, a wrong team) are
/// logged at WARN and infrastructure failures at ERROR.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis() as u64;
    let caller = response.extensions().get::<AuthenticatedUser>();
    let user_id = caller.map(|c| display(c.id));
    let role = caller.map(|c| display(c.role));
    let kind = response.extensions().get::<ErrorKind>().map(|k| k.0);

    match kind {
        Some(kind) if status.is_server_error() => error!(
            %method, %path, status = status.as_u16(), elapsed_ms, user_id, role,
            error = kind, "Request failed"
        ),
        Some(kind) => warn!(
            %method, %path, status = status.as_u16(), elapsed_ms, user_id, role,
            error = kind, "Request rejected"
        ),
        None => info!(
            %method, %path, status = status.as_u16(), elapsed_ms, user_id, role,
            "Request completed"
        ),
    }

    response
}
