use std::fmt::Write;

use game_types::{GameStatus, GameView, PlayerAction, Reply, ServerResponse};

use crate::drawing;

/// Formats a server response for the terminal.
pub fn render(response: &ServerResponse) -> String {
    if let Some(error) = response.error() {
        return format!("Error: {}", error.message);
    }

    match response {
        ServerResponse::Info(Reply::Success(payload)) => payload.info.clone(),
        ServerResponse::Game(Reply::Success(payload)) => render_game(&payload.game),
        ServerResponse::Games(Reply::Success(payload)) => render_games(&payload.games),
        // errors are handled above
        _ => String::new(),
    }
}

fn render_game(game: &GameView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Guess the hero: {}", game.word);
    let _ = writeln!(out, "{}", drawing::stage(game.tried.len()));
    let _ = write!(out, "Characters tried: {}", game.tried.join(" - "));

    match game.status {
        GameStatus::GameOver => out.push_str("\n*** GAME OVER ***"),
        GameStatus::Won => out.push_str("\n*** YOU WIN ***"),
        _ => {}
    }

    out
}

fn render_games(games: &[GameView]) -> String {
    if games.is_empty() {
        return format!(
            "no games have been found. Type '{}' to start",
            PlayerAction::NewGame
        );
    }

    games
        .iter()
        .map(|game| {
            format!(
                "Game ID: {} * Hero: {} * Characters tried: [{}] * Status: {}",
                game.id,
                game.word,
                game.tried.join(" "),
                game.status
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
