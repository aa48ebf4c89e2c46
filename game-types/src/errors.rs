use thiserror::Error;

use crate::{GameId, GameStatus};

/// Rule violations detected while playing a single game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("you must start a new game or resume a paused game before guessing the hero")]
    NoActiveGame,
    #[error("you must start a new game or resume a paused game before guessing the hero (game is {status})")]
    NotInProgress { status: GameStatus },
    #[error("game {game_id} is already finished ({status}) and cannot be resumed")]
    AlreadyFinished { game_id: GameId, status: GameStatus },
}
