use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

const PASSWORD_HASH_COST: u32 = 10;
const PROGRESS_AREAS: [&str; 4] = ["word", "math", "reading", "writing"];

#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("password hash failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("email already exists")]
    DuplicateEmail,
    #[error("user not found")]
    UserNotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub level: u32,
    pub completed: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            level: 1,
            completed: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    /// bcrypt hash
    pub password: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub study_progress: BTreeMap<String, Progress>,
    #[serde(default)]
    pub favorite_words: Vec<String>,
    #[serde(default)]
    pub learned_words: Vec<String>,
}

impl UserRecord {
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            local_part(&self.email).to_string()
        } else {
            self.name.clone()
        }
    }
}

pub fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

type Users = BTreeMap<String, UserRecord>;

/// Users keyed by email in a single pretty-printed JSON file. Every mutation
/// is a whole-file read-modify-write, serialized within this process.
pub struct UserStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Users, UserStoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Users::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Users::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, users: &Users) -> Result<(), UserStoreError> {
        let bytes = serde_json::to_vec_pretty(users)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }

    pub async fn get(&self, email: &str) -> Result<Option<UserRecord>, UserStoreError> {
        Ok(self.load().await?.remove(email))
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, UserStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.load().await?;
        if users.contains_key(email) {
            return Err(UserStoreError::DuplicateEmail);
        }

        let user = UserRecord {
            name: name.to_string(),
            email: email.to_string(),
            password: bcrypt::hash(password, PASSWORD_HASH_COST)?,
            created_at: Utc::now(),
            study_progress: PROGRESS_AREAS
                .iter()
                .map(|area| (area.to_string(), Progress::default()))
                .collect(),
            favorite_words: Vec::new(),
            learned_words: Vec::new(),
        };

        users.insert(email.to_string(), user.clone());
        self.save(&users).await?;
        tracing::info!(email, "user registered");
        Ok(user)
    }

    /// `None` for an unknown email or a wrong password.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, UserStoreError> {
        let Some(user) = self.get(email).await? else {
            return Ok(None);
        };
        let matches = bcrypt::verify(password, &user.password).unwrap_or(false);
        Ok(matches.then_some(user))
    }

    /// Returns whether the word is a favorite after the toggle.
    pub async fn toggle_favorite(&self, email: &str, word: &str) -> Result<bool, UserStoreError> {
        self.update(email, |user| {
            if let Some(pos) = user.favorite_words.iter().position(|w| w == word) {
                user.favorite_words.remove(pos);
                false
            } else {
                user.favorite_words.push(word.to_string());
                true
            }
        })
        .await
    }

    /// Returns `false` when the word was already learned; progress only moves
    /// on the first call.
    pub async fn mark_learned(&self, email: &str, word: &str) -> Result<bool, UserStoreError> {
        self.update(email, |user| {
            if user.learned_words.iter().any(|w| w == word) {
                return false;
            }
            user.learned_words.push(word.to_string());
            user.study_progress
                .entry("word".to_string())
                .or_default()
                .completed += 1;
            true
        })
        .await
    }

    async fn update<T>(
        &self,
        email: &str,
        apply: impl FnOnce(&mut UserRecord) -> T,
    ) -> Result<T, UserStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.load().await?;
        let user = users.get_mut(email).ok_or(UserStoreError::UserNotFound)?;
        let result = apply(user);
        self.save(&users).await?;
        Ok(result)
    }
}
