use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{Level, error, info};

use game_server::{Config, GameManager, Server};

/// Hangman game server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Address to bind to (overrides HOST)
    #[clap(short = 'H', long)]
    host: Option<String>,
    /// Port to listen on (overrides PORT)
    #[clap(short, long)]
    port: Option<u16>,
    /// Print debug logs (overrides VERBOSE)
    #[clap(short, long)]
    verbose: bool,
    /// Newline separated list of heroes to guess (overrides WORDS_FILE)
    #[clap(short, long)]
    words: Option<PathBuf>,
    /// Refuse to resume games that are already won or lost
    #[clap(long)]
    no_resume_finished: bool,
}

impl Args {
    fn apply(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(words) = self.words {
            config.words_file = Some(words);
        }
        config.verbose |= self.verbose;
        if self.no_resume_finished {
            config.allow_resume_finished = false;
        }
        config
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(config) => args.apply(config),
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(if config.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    info!("Starting hangman server...");

    let game_manager = match GameManager::from_config(&config) {
        Ok(gm) => Arc::new(gm),
        Err(e) => {
            error!("Failed to load heroes: {}", e);
            std::process::exit(1);
        }
    };

    let server = match Server::bind(&config, game_manager).await {
        Ok(server) => server,
        Err(e) => {
            error!("Error listening on {}: {}", config.address(), e);
            std::process::exit(1);
        }
    };

    info!("Server listening on {}", config.address());

    server
        .run_until(async {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to listen for ctrl+c: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Received Ctrl+C, shutting down gracefully...");
        })
        .await;

    info!("Server shutdown complete.");
}
