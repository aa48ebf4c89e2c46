use anyhow::Result;
use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{Level, error};

use game_client::{Client, is_game_command, parse_command, render};
use game_types::PlayerAction;

/// Hangman terminal client
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Server host
    #[clap(short = 'H', long, default_value = "127.0.0.1")]
    host: String,
    /// Server port
    #[clap(short, long, default_value_t = 9090)]
    port: u16,
    /// Print debug logs
    #[clap(short, long)]
    verbose: bool,
}

type Input = Lines<BufReader<Stdin>>;

fn prompt(text: &str) {
    print!("{}", text);
    let _ = std::io::stdout().flush();
}

/// Asks for a username until a non blank one is entered.
async fn read_username(input: &mut Input) -> Result<Option<String>> {
    loop {
        prompt("=> Enter your username: ");
        let Some(line) = input.next_line().await? else {
            return Ok(None);
        };

        let username = line.trim();
        if !username.is_empty() {
            return Ok(Some(username.to_string()));
        }
        println!("Please enter a valid user name");
    }
}

async fn play(args: Args) -> Result<()> {
    let mut client = Client::connect(&format!("{}:{}", args.host, args.port)).await?;
    println!("Welcome to Hangman");

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let Some(username) = read_username(&mut input).await? else {
        return Ok(());
    };
    println!("{}", client.login(&username).await?);

    loop {
        prompt("=> ");
        let Some(line) = input.next_line().await? else {
            break;
        };

        let Some(request) = parse_command(&line) else {
            println!("Please enter a valid command");
            continue;
        };

        if !is_game_command(&request.action) {
            println!(
                "Unknown command. Type '{}' to see the available actions",
                PlayerAction::Help
            );
            continue;
        }

        let response = client.send(request).await?;
        println!("{}", render(&response));
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    if let Err(e) = play(args).await {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
