use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::connection::registry::SessionRegistry;
use game_core::HeroVocabulary;
use game_persistence::{GameStore, MemoryStore};

/// Services shared by every connection: the game store, the vocabulary
/// secret words come from and the registry of logged-in users.
pub struct GameManager {
    store: Arc<dyn GameStore>,
    vocabulary: HeroVocabulary,
    sessions: SessionRegistry,
    allow_resume_finished: bool,
}

impl GameManager {
    pub fn new(store: Arc<dyn GameStore>, vocabulary: HeroVocabulary) -> Self {
        Self {
            store,
            vocabulary,
            sessions: SessionRegistry::new(),
            allow_resume_finished: true,
        }
    }

    /// Builds an in-memory game manager from the server configuration,
    /// loading the word list if one is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let vocabulary = match &config.words_file {
            Some(path) => {
                info!("Loading heroes from {}", path.display());
                HeroVocabulary::from_file(path)?
            }
            None => HeroVocabulary::default(),
        };
        info!("Playing with {} heroes", vocabulary.len());

        Ok(Self::new(Arc::new(MemoryStore::new()), vocabulary)
            .with_resume_finished(config.allow_resume_finished))
    }

    /// Whether won and game over games may be resumed.
    pub fn with_resume_finished(mut self, allow: bool) -> Self {
        self.allow_resume_finished = allow;
        self
    }

    pub fn store(&self) -> &Arc<dyn GameStore> {
        &self.store
    }

    pub fn vocabulary(&self) -> &HeroVocabulary {
        &self.vocabulary
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn allows_resume_finished(&self) -> bool {
        self.allow_resume_finished
    }
}
