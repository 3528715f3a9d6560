//! Codec trait and implementations for (de)serializing area traffic.
//!
//! The area never sees raw bytes itself. Whatever carries commands in and
//! snapshots out picks a [`Codec`]; [`JsonCodec`] is the default because
//! browser clients speak JSON.

use serde::{Serialize, de::DeserializeOwned};

use crate::{AreaCommand, ProtocolError};

/// Converts values to bytes and back.
///
/// `Send + Sync + 'static` so a codec can live inside long-running Tokio
/// tasks alongside the area actor.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;

    /// Decodes one inbound command frame.
    ///
    /// Empty frames are rejected before they reach the decoder so callers
    /// get a clearer error than "EOF while parsing".
    fn decode_command(&self, data: &[u8]) -> Result<AreaCommand, ProtocolError> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Err(ProtocolError::InvalidMessage("empty command frame".into()));
        }
        self.decode(data)
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`.
///
/// ```rust
/// use pictionary_protocol::{AreaCommand, Codec, Difficulty, JsonCodec};
///
/// let codec = JsonCodec;
/// let cmd = AreaCommand::StartGame { difficulty: Difficulty::Easy };
/// let bytes = codec.encode(&cmd).unwrap();
/// assert_eq!(codec.decode_command(&bytes).unwrap(), cmd);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
