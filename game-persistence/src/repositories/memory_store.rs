use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;
use tracing::debug;

use crate::store::{GameStore, StoreError};
use game_types::{GameId, GameState};

type UserGames = BTreeMap<GameId, GameState>;

/// In-memory implementation of [`GameStore`].
///
/// A single lock guards every user's collection, so reads and writes are
/// fully serialized across all users.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: Mutex<HashMap<String, UserGames>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_game_id(games: &UserGames) -> GameId {
        games.keys().next_back().map_or(1, |last| last + 1)
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn save_new_user(&self, user_id: &str) -> Result<(), StoreError> {
        let mut games = self.games.lock().await;

        if !games.contains_key(user_id) {
            debug!("Registering user {}", user_id);
            games.insert(user_id.to_string(), UserGames::new());
        }

        Ok(())
    }

    async fn save_game(&self, user_id: &str, mut game: GameState) -> Result<GameState, StoreError> {
        let mut games = self.games.lock().await;
        let user_games = games.entry(user_id.to_string()).or_default();

        if !game.is_saved() {
            game.id = Self::next_game_id(user_games);
        }

        debug!("Saving game {} for {} ({})", game.id, user_id, game.status);
        user_games.insert(game.id, game.clone());

        Ok(game)
    }

    async fn get_game_by_id(
        &self,
        user_id: &str,
        game_id: GameId,
    ) -> Result<GameState, StoreError> {
        let games = self.games.lock().await;

        let user_games = games.get(user_id).ok_or_else(|| StoreError::UserNotFound {
            user_id: user_id.to_string(),
        })?;

        user_games
            .get(&game_id)
            .cloned()
            .ok_or(StoreError::GameNotFound { game_id })
    }

    async fn get_games_by_user(&self, user_id: &str) -> Result<Vec<GameState>, StoreError> {
        let games = self.games.lock().await;

        let user_games = games.get(user_id).ok_or_else(|| StoreError::UserNotFound {
            user_id: user_id.to_string(),
        })?;

        Ok(user_games.values().cloned().collect())
    }
}
