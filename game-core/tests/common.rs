#![allow(dead_code)]

use game_core::apply_guess;
use game_types::{GameState, GameStatus};
use std::collections::BTreeSet;

/// Creates an unsaved in-progress game with a known word
pub fn create_game_with_word(word: &str) -> GameState {
    GameState::new(word)
}

/// Distinct letters of a word
pub fn distinct_letters(word: &str) -> BTreeSet<char> {
    word.chars().collect()
}

/// Lower-case letters that do not appear in the word, in alphabetical order
pub fn wrong_letters(word: &str) -> Vec<char> {
    ('a'..='z').filter(|c| !word.contains(*c)).collect()
}

/// Applies one character at a time, stopping at the first rejected guess
pub fn guess_each(game: &mut GameState, letters: impl IntoIterator<Item = char>) {
    for c in letters {
        if apply_guess(game, &c.to_string()).is_err() {
            break;
        }
    }
}

/// Asserts that a game is in a specific status
pub fn assert_game_status(game: &GameState, expected_status: GameStatus) {
    assert_eq!(
        game.status, expected_status,
        "Expected status {:?}, got {:?} for word '{}'",
        expected_status, game.status, game.word
    );
}
