use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;
use tracing::{debug, info, warn};

use crate::codec::{Inbound, ProtocolError, ServerCodec};
use crate::game_manager::GameManager;
use game_types::ServerResponse;

pub mod handlers;
pub mod registry;


pub use handlers::{SessionController, SessionError};
pub use registry::{ConnectionId, SessionClaim, SessionRegistry};

/// Runs one player session over a byte stream until the peer disconnects.
///
/// Every decoded request gets exactly one response. Malformed requests are
/// answered with an error and the session keeps reading. However the
/// connection ends, the game being played is paused before returning.
pub async fn handle_connection<S>(
    stream: S,
    connection_id: ConnectionId,
    game_manager: Arc<GameManager>,
) -> Result<(), ProtocolError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    info!("New connection: {}", connection_id);

    let mut framed = Framed::new(stream, ServerCodec::new());
    let mut session = SessionController::new(connection_id, game_manager);

    let result = loop {
        let frame = match framed.next().await {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => break Err(e),
            None => break Ok(()),
        };

        let response = match frame {
            Inbound::Message(request) => {
                debug!("Connection {}: received {:?}", connection_id, request);
                session.handle(request).await
            }
            Inbound::Malformed(reason) => {
                warn!("Malformed request on {}: {}", connection_id, reason);
                ServerResponse::info_error(format!("malformed request: {}", reason))
            }
        };

        if let Err(e) = framed.send(response).await {
            break Err(e);
        }
    };

    info!(
        "user {} disconnected ({})",
        session.user_id().unwrap_or("anonymous"),
        connection_id
    );
    session.handle_disconnect().await;

    result
}
