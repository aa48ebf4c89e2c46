//! Framing for the player protocol: JSON values written back to back on a
//! raw byte stream.
//!
//! JSON is self-delimiting, so no length prefix or delimiter is needed to
//! find message boundaries. The encoder still terminates every message with
//! a newline, which the decoder skips as whitespace.

use bytes::{Buf, BufMut, BytesMut};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};
use tracing::debug;

use game_types::{PlayerRequest, ServerResponse};

/// Largest message the decoder buffers before giving up on it.
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("connection error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ProtocolError {
    /// True for the errors a peer produces by simply going away.
    pub fn is_disconnect(&self) -> bool {
        use std::io::ErrorKind;

        match self {
            ProtocolError::Io(e) => matches!(
                e.kind(),
                ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::BrokenPipe
                    | ErrorKind::UnexpectedEof
            ),
            ProtocolError::Encode(_) => false,
        }
    }
}

/// One decoded frame. Malformed input is reported as a frame rather than a
/// stream error so the connection survives it.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound<T> {
    Message(T),
    Malformed(String),
}

/// Reads `In` values and writes `Out` values as JSON.
pub struct JsonCodec<In, Out> {
    _marker: PhantomData<fn(Out) -> In>,
}

/// Codec used by the server side of a connection.
pub type ServerCodec = JsonCodec<PlayerRequest, ServerResponse>;

/// Codec used by clients talking to the server.
pub type ClientCodec = JsonCodec<ServerResponse, PlayerRequest>;

impl<In, Out> JsonCodec<In, Out> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<In, Out> Default for JsonCodec<In, Out> {
    fn default() -> Self {
        Self::new()
    }
}

impl<In, Out> std::fmt::Debug for JsonCodec<In, Out> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonCodec").finish()
    }
}

impl<In: DeserializeOwned, Out> Decoder for JsonCodec<In, Out> {
    type Item = Inbound<In>;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.iter().all(u8::is_ascii_whitespace) {
            src.clear();
            return Ok(None);
        }

        let mut values =
            serde_json::Deserializer::from_slice(&src[..]).into_iter::<serde_json::Value>();

        match values.next() {
            Some(Ok(value)) => {
                let consumed = values.byte_offset();
                src.advance(consumed);

                match serde_json::from_value::<In>(value) {
                    Ok(message) => Ok(Some(Inbound::Message(message))),
                    Err(e) => Ok(Some(Inbound::Malformed(e.to_string()))),
                }
            }
            Some(Err(e)) if e.is_eof() => {
                if src.len() > MAX_MESSAGE_SIZE {
                    src.clear();
                    return Ok(Some(Inbound::Malformed(format!(
                        "message exceeds {} bytes",
                        MAX_MESSAGE_SIZE
                    ))));
                }
                Ok(None)
            }
            Some(Err(e)) => {
                // Skip the broken value up to the next object that may start
                // a request, so messages pipelined behind it still get read.
                let skip = resync_offset(&src[..], &e);
                debug!("Discarding {} buffered bytes after syntax error", skip);
                src.advance(skip);
                Ok(Some(Inbound::Malformed(e.to_string())))
            }
            None => {
                src.clear();
                Ok(None)
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None => {
                if !src.is_empty() {
                    debug!(
                        "Dropping {} bytes of incomplete message at end of stream",
                        src.len()
                    );
                    src.clear();
                }
                Ok(None)
            }
        }
    }
}

/// Position of the first `{` at or after the byte where `err` was detected,
/// or the end of `buf` if there is none. Always at least 1 so the decoder
/// makes progress.
fn resync_offset(buf: &[u8], err: &serde_json::Error) -> usize {
    let line_start = match err.line() {
        0 | 1 => 0,
        line => buf
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == b'\n')
            .map(|(i, _)| i + 1)
            .nth(line - 2)
            .unwrap_or(buf.len()),
    };
    let error_at = (line_start + err.column().saturating_sub(1)).clamp(1, buf.len());

    buf[error_at..]
        .iter()
        .position(|b| *b == b'{')
        .map_or(buf.len(), |pos| error_at + pos)
}

impl<In, Out: Serialize> Encoder<Out> for JsonCodec<In, Out> {
    type Error = ProtocolError;

    fn encode(&mut self, item: Out, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let json = serde_json::to_vec(&item)?;
        dst.reserve(json.len() + 1);
        dst.extend_from_slice(&json);
        dst.put_u8(b'\n');
        Ok(())
    }
}
