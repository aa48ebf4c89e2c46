use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::connection::registry::{ConnectionId, SessionClaim};
use crate::game_manager::GameManager;
use game_core::{apply_guess, new_game, rules_text};
use game_persistence::StoreError;
use game_types::{GameError, GameId, GameState, GameStatus, PlayerAction, PlayerRequest, ServerResponse};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("you must login before playing")]
    NotLoggedIn,
    #[error("username cannot be empty")]
    EmptyUsername,
    #[error("already logged in as {user_id}")]
    AlreadyLoggedIn { user_id: String },
    #[error("user {user_id} is already connected")]
    UserAlreadyConnected { user_id: String },
    #[error("invalid game id '{value}'")]
    InvalidGameId { value: String },
    #[error("unexpected error: action {action} was not recognized")]
    UnknownAction { action: String },
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The shape of the response an action produces, used to report failures
/// in the same shape the client expects for that action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseKind {
    Info,
    Game,
    Games,
}

impl ResponseKind {
    fn for_action(action: &PlayerAction) -> Self {
        match action {
            PlayerAction::NewGame | PlayerAction::ResumeGame | PlayerAction::Guess => {
                ResponseKind::Game
            }
            PlayerAction::ListGames => ResponseKind::Games,
            PlayerAction::Login | PlayerAction::Help | PlayerAction::Unknown(_) => {
                ResponseKind::Info
            }
        }
    }

    fn error(self, message: String) -> ServerResponse {
        match self {
            ResponseKind::Info => ServerResponse::info_error(message),
            ResponseKind::Game => ServerResponse::game_error(message),
            ResponseKind::Games => ServerResponse::games_error(message),
        }
    }
}

/// Per-connection game controller.
///
/// Holds the authenticated user and the game that user is currently
/// playing. Each request is answered with exactly one response; failures
/// become error responses and leave the session as it was.
pub struct SessionController {
    connection_id: ConnectionId,
    game_manager: Arc<GameManager>,
    user_id: Option<String>,
    active_game: Option<GameState>,
    claim: Option<SessionClaim>,
}

impl SessionController {
    pub fn new(connection_id: ConnectionId, game_manager: Arc<GameManager>) -> Self {
        Self {
            connection_id,
            game_manager,
            user_id: None,
            active_game: None,
            claim: None,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn active_game(&self) -> Option<&GameState> {
        self.active_game.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.claim.is_some()
    }

    /// Dispatches one request and returns the response to send back.
    pub async fn handle(&mut self, request: PlayerRequest) -> ServerResponse {
        let PlayerRequest { action, value } = request.normalized();
        let kind = ResponseKind::for_action(&action);

        let result = match &action {
            PlayerAction::Login => self.handle_login(value).await,
            PlayerAction::NewGame => self.handle_new_game().await,
            PlayerAction::Help => self.handle_help(),
            PlayerAction::ListGames => self.handle_list_games().await,
            PlayerAction::ResumeGame => self.handle_resume_game(&value).await,
            PlayerAction::Guess => self.handle_guess(&value).await,
            PlayerAction::Unknown(tag) => Err(SessionError::UnknownAction {
                action: tag.clone(),
            }),
        };

        result.unwrap_or_else(|e| {
            warn!(
                "Connection {} ({}): {} failed: {}",
                self.connection_id,
                self.user_id().unwrap_or("anonymous"),
                action,
                e
            );
            kind.error(e.to_string())
        })
    }

    fn require_user(&self) -> Result<String, SessionError> {
        self.user_id.clone().ok_or(SessionError::NotLoggedIn)
    }

    async fn handle_login(&mut self, user_name: String) -> Result<ServerResponse, SessionError> {
        if user_name.is_empty() {
            return Err(SessionError::EmptyUsername);
        }

        if let Some(current) = &self.user_id {
            if *current == user_name {
                return Ok(ServerResponse::info(rules_text()));
            }
            return Err(SessionError::AlreadyLoggedIn {
                user_id: current.clone(),
            });
        }

        let claim = self
            .game_manager
            .sessions()
            .claim(&user_name, self.connection_id)?;
        self.game_manager.store().save_new_user(&user_name).await?;

        info!("user authenticated: {} ({})", user_name, self.connection_id);
        self.user_id = Some(user_name);
        self.claim = Some(claim);

        Ok(ServerResponse::info(rules_text()))
    }

    /// Starts a new game after pausing and saving the current one.
    async fn handle_new_game(&mut self) -> Result<ServerResponse, SessionError> {
        let user_id = self.require_user()?;
        info!("{} is starting a new game", user_id);

        self.pause_active_game(&user_id, true).await?;

        let game = new_game(self.game_manager.vocabulary());
        let saved = self.game_manager.store().save_game(&user_id, game).await?;
        let response = ServerResponse::game(&saved);
        self.active_game = Some(saved);

        Ok(response)
    }

    fn handle_help(&self) -> Result<ServerResponse, SessionError> {
        let user_id = self.require_user()?;
        info!("{} is requesting help", user_id);

        Ok(ServerResponse::info(rules_text()))
    }

    /// Lists the user's games. The active game is paused and saved first so
    /// the list reflects its current state.
    async fn handle_list_games(&mut self) -> Result<ServerResponse, SessionError> {
        let user_id = self.require_user()?;
        info!("{} is listing games played", user_id);

        self.pause_active_game(&user_id, false).await?;

        let games = self.game_manager.store().get_games_by_user(&user_id).await?;
        Ok(ServerResponse::games(&games))
    }

    async fn handle_resume_game(&mut self, value: &str) -> Result<ServerResponse, SessionError> {
        let user_id = self.require_user()?;
        info!("{} is resuming game {}", user_id, value);

        let game_id: GameId = value.parse().map_err(|_| SessionError::InvalidGameId {
            value: value.to_string(),
        })?;

        let mut game = self
            .game_manager
            .store()
            .get_game_by_id(&user_id, game_id)
            .await?;

        if game.status.is_finished() && !self.game_manager.allows_resume_finished() {
            return Err(GameError::AlreadyFinished {
                game_id,
                status: game.status,
            }
            .into());
        }

        if self.active_game.as_ref().is_some_and(|g| g.id != game_id) {
            self.pause_active_game(&user_id, false).await?;
        }

        game.status = GameStatus::InProgress;
        let saved = self.game_manager.store().save_game(&user_id, game).await?;
        let response = ServerResponse::game(&saved);
        self.active_game = Some(saved);

        Ok(response)
    }

    async fn handle_guess(&mut self, value: &str) -> Result<ServerResponse, SessionError> {
        let user_id = self.require_user()?;
        info!("{} is guessing {}", user_id, value);

        let game = self.active_game.as_mut().ok_or(GameError::NoActiveGame)?;
        let status = apply_guess(game, value)?;

        let saved = self
            .game_manager
            .store()
            .save_game(&user_id, game.clone())
            .await?;

        if status.is_finished() {
            info!("{} finished game {}: {}", user_id, saved.id, status);
        }

        Ok(ServerResponse::game(&saved))
    }

    /// Called once the connection is gone. A game still in progress is
    /// paused and saved.
    pub async fn handle_disconnect(&mut self) {
        info!("Handling disconnect for connection {}", self.connection_id);

        let Some(user_id) = self.user_id.clone() else {
            return;
        };

        if let Err(e) = self.pause_active_game(&user_id, false).await {
            warn!(
                "Failed to pause game of {} on disconnect ({}): {}",
                user_id, self.connection_id, e
            );
        }
    }

    /// Marks the active game paused and saves it. Won and lost games are
    /// only paused when `include_finished` is set; otherwise they are left
    /// as they are.
    async fn pause_active_game(
        &mut self,
        user_id: &str,
        include_finished: bool,
    ) -> Result<(), SessionError> {
        let Some(game) = self.active_game.as_mut() else {
            return Ok(());
        };

        if game.status.is_finished() && !include_finished {
            return Ok(());
        }

        game.status = GameStatus::Paused;
        let saved = self
            .game_manager
            .store()
            .save_game(user_id, game.clone())
            .await?;
        *game = saved;

        Ok(())
    }
}
