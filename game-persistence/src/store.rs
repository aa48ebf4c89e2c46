use async_trait::async_trait;
use game_types::{GameId, GameState};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("user not found")]
    UserNotFound { user_id: String },
    #[error("game not found")]
    GameNotFound { game_id: GameId },
}

/// Operations a data store must expose so games can be saved and queried
/// per user.
///
/// Every call is a single logical operation: implementations must make it
/// atomic with respect to every other call on the same store.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Registers a user with an empty game collection. Registering an
    /// existing user is a no-op.
    async fn save_new_user(&self, user_id: &str) -> Result<(), StoreError>;

    /// Saves a new game or upserts an existing one.
    ///
    /// A game without an id gets the next id in the user's collection;
    /// otherwise the game stored under its id is overwritten. The user's
    /// collection is created if missing.
    async fn save_game(&self, user_id: &str, game: GameState) -> Result<GameState, StoreError>;

    async fn get_game_by_id(&self, user_id: &str, game_id: GameId)
    -> Result<GameState, StoreError>;

    /// All games owned by the user, ordered by id.
    async fn get_games_by_user(&self, user_id: &str) -> Result<Vec<GameState>, StoreError>;
}
