use std::collections::BTreeMap;

use axum::extract::{Extension, Path, State};
use axum::Json;
use serde::Serialize;

use crate::auth::SessionUser;
use crate::response::AppError;
use crate::services::user_store::Progress;
use crate::state::AppState;

#[derive(Serialize)]
pub struct DashboardResponse {
    success: bool,
    user_name: String,
    language: String,
    study_progress: BTreeMap<String, Progress>,
}

#[derive(Serialize)]
pub struct LanguageResponse {
    success: bool,
    language: String,
}

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
) -> Result<Json<DashboardResponse>, AppError> {
    let study_progress = state
        .users()
        .get(&session.user_id)
        .await?
        .map(|user| user.study_progress)
        .unwrap_or_default();

    Ok(Json(DashboardResponse {
        success: true,
        user_name: session.user_name,
        language: session.language,
        study_progress,
    }))
}

pub async fn set_language(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(lang): Path<String>,
) -> Result<Json<LanguageResponse>, AppError> {
    let lang = lang.trim();
    if lang.is_empty() {
        return Err(AppError::validation("Language is required"));
    }
    if !state.sessions().set_language(&session.token, lang) {
        return Err(AppError::unauthorized("Not logged in"));
    }

    Ok(Json(LanguageResponse {
        success: true,
        language: lang.to_string(),
    }))
}
