use std::sync::Arc;
use tokio::io::DuplexStream;

use game_client::{Client, parse_command, render};
use game_core::HeroVocabulary;
use game_persistence::MemoryStore;
use game_server::GameManager;
use game_server::connection::{ConnectionId, handle_connection};
use game_types::{GameStatus, Reply, ServerResponse};

/// A client wired to an in-process server session
fn connected_client(word: &str) -> Client<DuplexStream> {
    let heroes = HeroVocabulary::from_word_list(word).unwrap();
    let manager = Arc::new(GameManager::new(Arc::new(MemoryStore::new()), heroes));

    let (client_io, server_io) = tokio::io::duplex(4096);
    tokio::spawn(handle_connection(server_io, ConnectionId::new(), manager));

    Client::new(client_io)
}

async fn run(client: &mut Client<DuplexStream>, line: &str) -> ServerResponse {
    client.send(parse_command(line).unwrap()).await.unwrap()
}

#[tokio::test]
async fn test_login_returns_rules() {
    let mut client = connected_client("robin");

    let rules = client.login("alice").await.unwrap();
    assert!(rules.contains("GUESS THE CARTOON HERO!"));
}

#[tokio::test]
async fn test_login_error_is_reported() {
    let mut client = connected_client("robin");

    let err = client.login("   ").await.unwrap_err();
    assert_eq!(err.to_string(), "username cannot be empty");
}

#[tokio::test]
async fn test_typed_commands_play_a_game() {
    let mut client = connected_client("robin");
    client.login("alice").await.unwrap();

    let text = render(&run(&mut client, "new").await);
    assert!(text.starts_with("Guess the hero: _ _ _ _ _"));

    let text = render(&run(&mut client, "try z").await);
    assert!(text.contains("Characters tried: z"));

    let response = run(&mut client, "try r o b i n").await;
    let ServerResponse::Game(Reply::Success(payload)) = &response else {
        panic!("Expected game, got {:?}", response);
    };
    assert_eq!(payload.game.status, GameStatus::Won);
    assert!(render(&response).ends_with("*** YOU WIN ***"));

    let text = render(&run(&mut client, "list").await);
    assert_eq!(
        text,
        "Game ID: 1 * Hero: r o b i n * Characters tried: [z] * Status: won"
    );
}

#[tokio::test]
async fn test_server_errors_are_rendered() {
    let mut client = connected_client("robin");
    client.login("alice").await.unwrap();

    let text = render(&run(&mut client, "resume 9").await);
    assert_eq!(text, "Error: game not found");
}

#[tokio::test]
async fn test_closed_connection() {
    let (client_io, server_io) = tokio::io::duplex(64);
    drop(server_io);
    let mut client = Client::new(client_io);

    assert!(client.login("alice").await.is_err());
}
