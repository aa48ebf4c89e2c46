use serde::{Deserialize, Serialize};

/// Per-user game identifier. `0` means "not saved yet"; the store assigns
/// real IDs starting at 1.
pub type GameId = u32;

pub const UNASSIGNED_GAME_ID: GameId = 0;

/// Placeholder shown for letters of the hidden word that were not guessed yet.
pub const MASK_PLACEHOLDER: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "show info")]
    ShowInfo,
    #[serde(rename = "paused")]
    Paused,
    #[serde(rename = "game over")]
    GameOver,
    #[serde(rename = "won")]
    Won,
    #[serde(rename = "error")]
    Error,
}

impl GameStatus {
    /// Won and game over games accept no further guesses.
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::GameOver)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Unknown => "unknown",
            GameStatus::InProgress => "in progress",
            GameStatus::ShowInfo => "show info",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "game over",
            GameStatus::Won => "won",
            GameStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full server-side state of a single hangman game.
///
/// This type holds the secret word and is never written to the wire;
/// see [`GameView`] for the client-facing projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub id: GameId,
    pub word: String,
    /// Correct letters, one entry per occurrence in `word`.
    pub guessed: Vec<char>,
    /// Wrong letters in the order they were tried, without duplicates.
    pub tried: Vec<char>,
    pub status: GameStatus,
}

impl GameState {
    /// A fresh, unsaved game for the given secret word.
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            id: UNASSIGNED_GAME_ID,
            word: word.into(),
            guessed: Vec::new(),
            tried: Vec::new(),
            status: GameStatus::InProgress,
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id != UNASSIGNED_GAME_ID
    }

    /// Renders the secret word with unguessed letters replaced by
    /// placeholders, e.g. `b _ t m _ n`.
    pub fn masked_word(&self) -> String {
        self.word
            .chars()
            .map(|c| {
                if self.guessed.contains(&c) {
                    c
                } else {
                    MASK_PLACEHOLDER
                }
            })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Safe version of GameState that doesn't expose the secret word.
/// Used for every game sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub id: GameId,
    /// Masked word, never the secret itself.
    pub word: String,
    pub tried: Vec<String>,
    pub status: GameStatus,
}

impl From<&GameState> for GameView {
    fn from(game_state: &GameState) -> Self {
        GameView {
            id: game_state.id,
            word: game_state.masked_word(),
            tried: game_state.tried.iter().map(|c| c.to_string()).collect(),
            status: game_state.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_word_reveals_only_guessed_letters() {
        let mut game = GameState::new("batman");
        assert_eq!(game.masked_word(), "_ _ _ _ _ _");

        game.guessed = vec!['a', 'a'];
        assert_eq!(game.masked_word(), "_ a _ _ a _");
    }

    #[test]
    fn test_view_hides_secret_and_guessed_letters() {
        let mut game = GameState::new("foo");
        game.id = 3;
        game.guessed = vec!['o', 'o'];
        game.tried = vec!['z'];

        let json = serde_json::to_value(GameView::from(&game)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "word": "_ o o",
                "tried": ["z"],
                "status": "in progress"
            })
        );
        assert!(!json.to_string().contains("foo"));
    }

    #[test]
    fn test_status_wire_names() {
        let names: Vec<String> = [
            GameStatus::InProgress,
            GameStatus::Paused,
            GameStatus::GameOver,
            GameStatus::Won,
            GameStatus::Unknown,
            GameStatus::ShowInfo,
            GameStatus::Error,
        ]
        .iter()
        .map(|s| serde_json::to_string(s).unwrap())
        .collect();

        assert_eq!(
            names,
            vec![
                "\"in progress\"",
                "\"paused\"",
                "\"game over\"",
                "\"won\"",
                "\"unknown\"",
                "\"show info\"",
                "\"error\""
            ]
        );
        assert_eq!(GameStatus::GameOver.to_string(), "game over");
    }
}
