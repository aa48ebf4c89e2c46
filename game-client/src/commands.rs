use game_types::{PlayerAction, PlayerRequest};

/// Turns a line typed by the player into a request.
///
/// The first word is the action. Any remaining words are joined without
/// separators, so `try b a t` guesses `bat`. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<PlayerRequest> {
    let mut words = line.split_whitespace();
    let action = words.next()?;
    let value: String = words.collect();

    Some(PlayerRequest::new(action, value))
}

/// Actions the player may type once logged in.
pub fn is_game_command(action: &PlayerAction) -> bool {
    matches!(
        action,
        PlayerAction::NewGame
            | PlayerAction::Help
            | PlayerAction::ListGames
            | PlayerAction::ResumeGame
            | PlayerAction::Guess
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action_and_value() {
        let request = parse_command("resume 12\n").unwrap();
        assert_eq!(request.action, PlayerAction::ResumeGame);
        assert_eq!(request.value, "12");
    }

    #[test]
    fn test_remaining_words_are_joined() {
        let request = parse_command("  try  b a t ").unwrap();
        assert_eq!(request.action, PlayerAction::Guess);
        assert_eq!(request.value, "bat");
    }

    #[test]
    fn test_action_without_value() {
        let request = parse_command("list").unwrap();
        assert_eq!(request.action, PlayerAction::ListGames);
        assert!(request.value.is_empty());
    }

    #[test]
    fn test_blank_line() {
        assert!(parse_command("").is_none());
        assert!(parse_command("   \r\n").is_none());
    }

    #[test]
    fn test_game_commands() {
        assert!(is_game_command(&PlayerAction::Guess));
        assert!(!is_game_command(&PlayerAction::Login));
        assert!(!is_game_command(&PlayerAction::from("jump")));
    }
}
