/// Gallows drawn after 0 through 7 wrong characters.
pub const HANGMAN_STAGES: [&str; 8] = [
    r#"
  +---+
  |   |
      |
      |
      |
      |
========="#,
    r#"
  +---+
  |   |
  O   |
      |
      |
      |
========="#,
    r#"
  +---+
  |   |
  O   |
  |   |
      |
      |
========="#,
    r#"
  +---+
  |   |
  O   |
 /|   |
      |
      |
========="#,
    r#"
  +---+
  |   |
  O   |
 /|\  |
      |
      |
========="#,
    r#"
  +---+
  |   |
  O   |
 /|\  |
 /    |
      |
========="#,
    r#"
  +---+
  |   |
  O   |
 /|\  |
 / \  |
      |
========="#,
    r#"
  +---+
  |   |
  X   |
 /|\  |
 / \  |
      |
========="#,
];

/// The drawing for `wrong` tried characters. Counts past the last stage
/// show the complete drawing.
pub fn stage(wrong: usize) -> &'static str {
    HANGMAN_STAGES[wrong.min(HANGMAN_STAGES.len() - 1)]
}
