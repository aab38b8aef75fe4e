use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::{clear_session_cookie_header, extract_token, session_cookie_header};
use crate::response::AppError;
use crate::routes::MessageResponse;
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
pub struct UserSummary {
    name: String,
    email: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    success: bool,
    message: &'static str,
    user: UserSummary,
}

#[derive(Serialize)]
pub struct LoginResponse {
    success: bool,
    message: &'static str,
    user: UserSummary,
    token: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let name = payload.name.trim();
    let email = payload.email.trim().to_lowercase();

    if name.is_empty() || email.is_empty() || payload.password.is_empty() {
        return Err(AppError::validation("Please fill in all fields"));
    }
    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::validation("Password must be at least 6 characters"));
    }

    let user = state.users().register(name, &email, &payload.password).await?;

    Ok(Json(RegisterResponse {
        success: true,
        message: "Account created successfully!",
        user: UserSummary {
            name: user.name,
            email: user.email,
        },
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || payload.password.is_empty() {
        return Err(AppError::validation("Please fill in all fields"));
    }

    let Some(user) = state.users().authenticate(&email, &payload.password).await? else {
        tracing::debug!(email = %email, "login rejected");
        return Err(AppError::unauthorized("Invalid email or password"));
    };

    let name = user.display_name();
    let session = state.sessions().create(&email, &name);
    tracing::info!(email = %email, "user logged in");

    let mut headers = HeaderMap::new();
    if let Some(cookie) = session_cookie_header(&session.token, state.config().secure_cookies) {
        headers.insert(header::SET_COOKIE, cookie);
    }

    Ok((
        headers,
        Json(LoginResponse {
            success: true,
            message: "Login successful!",
            user: UserSummary { name, email },
            token: session.token,
        }),
    )
        .into_response())
}

/// Always succeeds; a missing or stale session just clears the cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = extract_token(&headers) {
        state.sessions().remove(&token);
    }

    let mut response_headers = HeaderMap::new();
    if let Some(cookie) = clear_session_cookie_header(state.config().secure_cookies) {
        response_headers.insert(header::SET_COOKIE, cookie);
    }

    (
        response_headers,
        Json(MessageResponse {
            success: true,
            message: "Logged out",
        }),
    )
        .into_response()
}
