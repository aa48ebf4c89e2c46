//! Hangman game server.
//!
//! Players connect over TCP and exchange JSON messages with a per-connection
//! [`connection::SessionController`], which plays games on their behalf and
//! keeps them in a shared [`game_persistence::GameStore`].

pub mod codec;
pub mod config;
pub mod connection;
pub mod game_manager;
pub mod server;

pub use config::Config;
pub use game_manager::GameManager;
pub use server::Server;
