use anyhow::{Result, anyhow, bail};
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::{debug, info};

use game_server::codec::{ClientCodec, Inbound};
use game_types::{PlayerAction, PlayerRequest, ServerResponse};

/// A connection to the game server. Every request is answered by exactly
/// one response.
pub struct Client<S> {
    framed: Framed<S, ClientCodec>,
}

impl Client<TcpStream> {
    pub async fn connect(addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| anyhow!("failed to connect to {}: {}", addr, e))?;
        info!("Connected to {}", addr);

        Ok(Self::new(stream))
    }
}

impl<S> Client<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            framed: Framed::new(stream, ClientCodec::new()),
        }
    }

    /// Sends one request and waits for its response.
    pub async fn send(&mut self, request: PlayerRequest) -> Result<ServerResponse> {
        debug!("Sending {:?}", request);
        self.framed.send(request).await?;

        match self.framed.next().await {
            Some(Ok(Inbound::Message(response))) => Ok(response),
            Some(Ok(Inbound::Malformed(reason))) => {
                bail!("malformed response from server: {}", reason)
            }
            Some(Err(e)) => Err(e.into()),
            None => bail!("server closed the connection"),
        }
    }

    /// Logs in as `username` and returns the rules sent back by the server.
    pub async fn login(&mut self, username: &str) -> Result<String> {
        let response = self
            .send(PlayerRequest::new(PlayerAction::Login, username))
            .await?;

        match response {
            ServerResponse::Info(reply) => reply
                .into_result()
                .map(|payload| payload.info)
                .map_err(|error| anyhow!(error.message)),
            other => match other.error() {
                Some(error) => bail!("{}", error.message),
                None => bail!("unexpected login response: {:?}", other),
            },
        }
    }
}
