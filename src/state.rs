use std::sync::Arc;
use std::time::Instant;

use crate::auth::SessionStore;
use crate::config::Config;
use crate::services::catalog::WordCatalog;
use crate::services::user_store::UserStore;
use crate::services::word_content::ContentGenerator;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    config: Arc<Config>,
    catalog: Arc<WordCatalog>,
    generator: Arc<ContentGenerator>,
    users: Arc<UserStore>,
    sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let generator = ContentGenerator::new(&config.provider);
        let users = UserStore::new(config.users_file.clone());

        Self {
            started_at: Instant::now(),
            config: Arc::new(config),
            catalog: Arc::new(WordCatalog::gre()),
            generator: Arc::new(generator),
            users: Arc::new(users),
            sessions: Arc::new(SessionStore::new()),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    pub fn generator(&self) -> Arc<ContentGenerator> {
        Arc::clone(&self.generator)
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
