mod auth;
mod chat;
mod health;
mod users;
mod words;

use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Router;
use serde::Serialize;

use crate::middleware::auth::require_session;
use crate::response::AppError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct MessageResponse {
    success: bool,
    message: &'static str,
}

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/dashboard", get(users::dashboard))
        .route("/api/session/language/:lang", put(users::set_language))
        .route("/api/word/random", post(words::random_word))
        .route("/api/word/favorite", post(words::toggle_favorite))
        .route("/api/word/learned", post(words::mark_learned))
        .route("/api/word/enhance", post(words::enhance_word))
        .route("/api/word/exercise", post(words::exercise))
        .route("/api/ai/chat", post(chat::chat))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route("/logout", get(auth::logout))
        .nest("/health", health::router())
        .merge(protected)
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    AppError::not_found("Not found").into_response()
}
