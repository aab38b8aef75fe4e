use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::response::AppError;
use crate::state::AppState;

/// Rejects requests without a live session; otherwise attaches the
/// `SessionUser` as a request extension.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let session = crate::auth::extract_token(req.headers())
        .and_then(|token| state.sessions().get(&token));

    match session {
        Some(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        None => AppError::unauthorized("Not logged in").into_response(),
    }
}
