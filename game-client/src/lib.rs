//! Terminal client for the hangman server.

pub mod client;
pub mod commands;
pub mod drawing;
pub mod render;

pub use client::Client;
pub use commands::{is_game_command, parse_command};
pub use render::render;
