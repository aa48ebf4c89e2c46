use game_types::{GameError, GameState, GameStatus};
use tracing::debug;

use crate::HeroVocabulary;

/// Number of wrong characters a player can try before the game is over.
pub const MAX_WRONG_CHARS: usize = 7;

/// Help banner describing the rules and the commands available to players.
pub fn rules_text() -> String {
    format!(
        r#"
    GUESS THE CARTOON HERO!

    Rules:
    Guess the letters in order to discover who the hidden cartoon hero is.
    If you make {MAX_WRONG_CHARS} mistakes you lose.
    ************************************************************************************
    Available commands:
    help             => prints the help screen
    new              => starts a new game
    list             => shows the game history. Each game displays its id and status
    try <character>  => checks if <character> is part of the word to guess
    resume <game-id> => restarts an existing game
"#
    )
}

/// Starts an unsaved, in-progress game with a random hero to guess.
pub fn new_game(vocabulary: &HeroVocabulary) -> GameState {
    GameState::new(vocabulary.random_word())
}

/// Derives the status of a game from its guessed and tried characters.
///
/// Winning takes precedence: a game whose letters are all revealed is won
/// even if the last guess also exhausted the wrong attempts.
pub fn evaluate_status(state: &GameState) -> GameStatus {
    if state.guessed.len() >= state.word.chars().count() {
        return GameStatus::Won;
    }

    if state.tried.len() >= MAX_WRONG_CHARS {
        return GameStatus::GameOver;
    }

    GameStatus::InProgress
}

/// Applies every character of `input` to the game and recomputes its status.
///
/// A character found in the word is recorded once per occurrence the first
/// time it is guessed. Any other character is recorded once in the tried
/// list. Whitespace is ignored. Only in-progress games accept guesses.
pub fn apply_guess(state: &mut GameState, input: &str) -> Result<GameStatus, GameError> {
    if state.status != GameStatus::InProgress {
        return Err(GameError::NotInProgress {
            status: state.status,
        });
    }

    for c in input.chars().filter(|c| !c.is_whitespace()) {
        let occurrences = state.word.chars().filter(|w| *w == c).count();

        if occurrences > 0 {
            if !state.guessed.contains(&c) {
                state.guessed.extend(std::iter::repeat_n(c, occurrences));
            }
        } else if !state.tried.contains(&c) {
            state.tried.push(c);
        }
    }

    state.status = evaluate_status(state);
    debug!(
        "Game {} after guess '{}': {} guessed, {} tried, {}",
        state.id,
        input,
        state.guessed.len(),
        state.tried.len(),
        state.status
    );

    Ok(state.status)
}
