use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::connection::{ConnectionId, handle_connection};
use crate::game_manager::GameManager;

/// Accepts player connections and runs one session task per connection.
pub struct Server {
    listener: TcpListener,
    game_manager: Arc<GameManager>,
}

impl Server {
    pub async fn bind(config: &Config, game_manager: Arc<GameManager>) -> io::Result<Self> {
        let listener = TcpListener::bind(config.address()).await?;
        Ok(Self {
            listener,
            game_manager,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections forever.
    pub async fn run(self) {
        self.run_until(std::future::pending()).await
    }

    /// Accepts connections until `shutdown` completes. Sessions already
    /// running are left to finish on their own.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, no longer accepting connections");
                    break;
                }
                res = self.listener.accept() => {
                    match res {
                        Ok((socket, addr)) => {
                            info!("Accepted new connection from: {}", addr);
                            self.spawn_session(socket, addr);
                        }
                        Err(e) => warn!("Failed to accept connection: {}", e),
                    }
                }
            }
        }
    }

    fn spawn_session(&self, socket: tokio::net::TcpStream, addr: SocketAddr) {
        let game_manager = self.game_manager.clone();
        let connection_id = ConnectionId::new();

        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, connection_id, game_manager).await {
                if e.is_disconnect() {
                    debug!("Connection from {} closed by peer: {}", addr, e);
                } else {
                    warn!("Connection error for {}: {}", addr, e);
                }
            }
        });
    }
}
