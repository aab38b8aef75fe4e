use axum::extract::{Extension, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::SessionUser;
use crate::response::AppError;
use crate::services::catalog::{EnhancedWordRecord, Etymology, Level};
use crate::services::exercise::{custom_exercise, Exercise, ExerciseType};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RandomWordRequest {
    #[serde(default = "default_difficulty")]
    difficulty: String,
    #[serde(default)]
    learned_words: Vec<String>,
}

fn default_difficulty() -> String {
    Level::Medium.as_str().to_string()
}

#[derive(Debug, Deserialize)]
pub struct WordRequest {
    #[serde(default)]
    word: String,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    #[serde(default)]
    word: String,
    #[serde(default)]
    content_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExerciseRequest {
    #[serde(default)]
    word: String,
    exercise_type: ExerciseType,
}

#[derive(Serialize)]
pub struct WordResponse {
    success: bool,
    #[serde(flatten)]
    word: EnhancedWordRecord,
}

#[derive(Serialize)]
pub struct FavoriteResponse {
    success: bool,
    is_favorite: bool,
    message: &'static str,
}

#[derive(Serialize)]
pub struct LearnedResponse {
    success: bool,
    newly_learned: bool,
    message: &'static str,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum EnhancedContent {
    Memory {
        memory_story: String,
        memory_phonetic: String,
        memory_visual: String,
    },
    Etymology {
        etymology: Etymology,
    },
    All {
        enhanced_data: EnhancedWordRecord,
    },
}

impl EnhancedContent {
    fn select(content_type: Option<&str>, record: EnhancedWordRecord) -> Self {
        match content_type {
            Some("memory") => Self::Memory {
                memory_story: record.memory_story,
                memory_phonetic: record.memory_phonetic,
                memory_visual: record.memory_visual,
            },
            Some("etymology") => Self::Etymology {
                etymology: record.etymology,
            },
            _ => Self::All {
                enhanced_data: record,
            },
        }
    }
}

#[derive(Serialize)]
pub struct EnhanceResponse {
    success: bool,
    #[serde(flatten)]
    content: EnhancedContent,
}

#[derive(Serialize)]
pub struct ExerciseResponse {
    success: bool,
    #[serde(flatten)]
    exercise: Exercise,
}

fn required_word(word: &str) -> Result<&str, AppError> {
    let word = word.trim();
    if word.is_empty() {
        return Err(AppError::validation("Word is required"));
    }
    Ok(word)
}

pub async fn random_word(
    State(state): State<AppState>,
    Json(payload): Json<RandomWordRequest>,
) -> Result<Json<WordResponse>, AppError> {
    let level = Level::from_str(&payload.difficulty);
    let record = state
        .catalog()
        .pick_random(level, &payload.learned_words)
        .ok_or_else(|| AppError::not_found("No words available"))?;

    tracing::debug!(word = %record.word, difficulty = %payload.difficulty, "random word selected");
    let word = state.generator().generate(&record.word, record).await;

    Ok(Json(WordResponse {
        success: true,
        word,
    }))
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Json(payload): Json<WordRequest>,
) -> Result<Json<FavoriteResponse>, AppError> {
    let word = required_word(&payload.word)?;
    let is_favorite = state.users().toggle_favorite(&session.user_id, word).await?;

    Ok(Json(FavoriteResponse {
        success: true,
        is_favorite,
        message: "Favorite updated",
    }))
}

pub async fn mark_learned(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Json(payload): Json<WordRequest>,
) -> Result<Json<LearnedResponse>, AppError> {
    let word = required_word(&payload.word)?;
    let newly_learned = state.users().mark_learned(&session.user_id, word).await?;

    Ok(Json(LearnedResponse {
        success: true,
        newly_learned,
        message: "Word marked as learned",
    }))
}

pub async fn enhance_word(
    State(state): State<AppState>,
    Json(payload): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    let word = required_word(&payload.word)?;
    let record = state
        .catalog()
        .find(word)
        .ok_or_else(|| AppError::not_found("Word not found"))?;

    let enhanced = state.generator().generate(word, record).await;

    Ok(Json(EnhanceResponse {
        success: true,
        content: EnhancedContent::select(payload.content_type.as_deref(), enhanced),
    }))
}

pub async fn exercise(Json(payload): Json<ExerciseRequest>) -> Result<Json<ExerciseResponse>, AppError> {
    let word = required_word(&payload.word)?;

    Ok(Json(ExerciseResponse {
        success: true,
        exercise: custom_exercise(word, payload.exercise_type),
    }))
}
