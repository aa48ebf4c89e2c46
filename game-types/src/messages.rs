use serde::{Deserialize, Serialize};

use crate::{GameState, GameView};

/// Commands a player can issue during a session.
///
/// Any tag the server does not know deserializes into `Unknown` so the
/// session can report it instead of failing to decode the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlayerAction {
    Login,
    NewGame,
    ResumeGame,
    ListGames,
    Guess,
    Help,
    Unknown(String),
}

impl PlayerAction {
    pub fn as_str(&self) -> &str {
        match self {
            PlayerAction::Login => "login",
            PlayerAction::NewGame => "new",
            PlayerAction::ResumeGame => "resume",
            PlayerAction::ListGames => "list",
            PlayerAction::Guess => "try",
            PlayerAction::Help => "help",
            PlayerAction::Unknown(tag) => tag,
        }
    }
}

impl From<String> for PlayerAction {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "login" => PlayerAction::Login,
            "new" => PlayerAction::NewGame,
            "resume" => PlayerAction::ResumeGame,
            "list" => PlayerAction::ListGames,
            "try" => PlayerAction::Guess,
            "help" => PlayerAction::Help,
            _ => PlayerAction::Unknown(tag),
        }
    }
}

impl From<&str> for PlayerAction {
    fn from(tag: &str) -> Self {
        PlayerAction::from(tag.to_string())
    }
}

impl From<PlayerAction> for String {
    fn from(action: PlayerAction) -> Self {
        action.as_str().to_string()
    }
}

impl std::fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payload sent by clients: an action and an action-specific value
/// (username, game id or guessed characters).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRequest {
    pub action: PlayerAction,
    #[serde(default)]
    pub value: String,
}

impl PlayerRequest {
    pub fn new(action: impl Into<PlayerAction>, value: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            value: value.into(),
        }
    }

    /// Trims and lower-cases the value, as the server does before dispatch.
    pub fn normalized(mut self) -> Self {
        self.value = self.value.trim().to_lowercase();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Either a successful payload or an error, never both.
///
/// On the wire the absent side is omitted entirely:
/// `{"info": "..."}` or `{"error": {"message": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply<T> {
    Failure { error: ErrorBody },
    Success(T),
}

impl<T> Reply<T> {
    pub fn failure(message: impl Into<String>) -> Self {
        Reply::Failure {
            error: ErrorBody::new(message),
        }
    }

    pub fn error(&self) -> Option<&ErrorBody> {
        match self {
            Reply::Failure { error } => Some(error),
            Reply::Success(_) => None,
        }
    }

    pub fn into_result(self) -> Result<T, ErrorBody> {
        match self {
            Reply::Failure { error } => Err(error),
            Reply::Success(payload) => Ok(payload),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoPayload {
    pub info: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePayload {
    pub game: GameView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamesPayload {
    pub games: Vec<GameView>,
}

/// Everything the server writes back to a client, one variant per
/// response kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerResponse {
    Info(Reply<InfoPayload>),
    Game(Reply<GamePayload>),
    Games(Reply<GamesPayload>),
}

impl ServerResponse {
    pub fn info(info: impl Into<String>) -> Self {
        ServerResponse::Info(Reply::Success(InfoPayload { info: info.into() }))
    }

    pub fn info_error(message: impl Into<String>) -> Self {
        ServerResponse::Info(Reply::failure(message))
    }

    pub fn game(game: &GameState) -> Self {
        ServerResponse::Game(Reply::Success(GamePayload {
            game: GameView::from(game),
        }))
    }

    pub fn game_error(message: impl Into<String>) -> Self {
        ServerResponse::Game(Reply::failure(message))
    }

    pub fn games(games: &[GameState]) -> Self {
        ServerResponse::Games(Reply::Success(GamesPayload {
            games: games.iter().map(GameView::from).collect(),
        }))
    }

    pub fn games_error(message: impl Into<String>) -> Self {
        ServerResponse::Games(Reply::failure(message))
    }

    pub fn error(&self) -> Option<&ErrorBody> {
        match self {
            ServerResponse::Info(reply) => reply.error(),
            ServerResponse::Game(reply) => reply.error(),
            ServerResponse::Games(reply) => reply.error(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_decoding() {
        let req: PlayerRequest =
            serde_json::from_value(json!({"action": "try", "value": "a"})).unwrap();
        assert_eq!(req, PlayerRequest::new(PlayerAction::Guess, "a"));

        // value is optional
        let req: PlayerRequest = serde_json::from_value(json!({"action": "list"})).unwrap();
        assert_eq!(req.action, PlayerAction::ListGames);
        assert_eq!(req.value, "");
    }

    #[test]
    fn test_unknown_action_is_kept() {
        let req: PlayerRequest =
            serde_json::from_value(json!({"action": "dance", "value": ""})).unwrap();
        assert_eq!(req.action, PlayerAction::Unknown("dance".to_string()));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"action": "dance", "value": ""})
        );
    }

    #[test]
    fn test_normalized_lowercases_and_trims() {
        let req = PlayerRequest::new(PlayerAction::Login, "  Alice ").normalized();
        assert_eq!(req.value, "alice");
    }

    #[test]
    fn test_error_side_omits_payload() {
        let resp = ServerResponse::game_error("game not found");
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"error": {"message": "game not found"}})
        );
        assert_eq!(resp.error().unwrap().message, "game not found");
    }

    #[test]
    fn test_success_side_omits_error() {
        let resp = ServerResponse::info("rules");
        assert_eq!(serde_json::to_value(&resp).unwrap(), json!({"info": "rules"}));
        assert!(!resp.is_error());
    }

    #[test]
    fn test_response_kind_is_recovered_when_decoding() {
        let games: ServerResponse = serde_json::from_value(json!({"games": []})).unwrap();
        assert_eq!(games, ServerResponse::games(&[]));

        let game: ServerResponse = serde_json::from_value(json!({
            "game": {"id": 1, "word": "_ _", "tried": [], "status": "paused"}
        }))
        .unwrap();
        assert!(matches!(game, ServerResponse::Game(Reply::Success(_))));

        let failed: ServerResponse =
            serde_json::from_value(json!({"error": {"message": "nope"}})).unwrap();
        assert_eq!(failed.error().unwrap().message, "nope");
    }
}
