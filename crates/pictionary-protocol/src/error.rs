//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding area traffic.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, missing fields, or wrong
    /// data types.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message decoded but is not acceptable at the protocol level,
    /// e.g. an empty frame.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
