//! Unified error type for the Pictionary crates.

use pictionary_area::AreaError;
use pictionary_game::GameError;
use pictionary_protocol::ProtocolError;

/// Top-level error that wraps every crate-specific error.
///
/// Each variant has a `#[from]` impl, so `?` converts errors from any
/// layer into this one.
#[derive(Debug, thiserror::Error)]
pub enum PictionaryError {
    /// A frame could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The game engine rejected an operation.
    #[error(transparent)]
    Game(#[from] GameError),

    /// The area rejected a command or is no longer running.
    #[error(transparent)]
    Area(#[from] AreaError),
}

impl PictionaryError {
    /// The underlying game error, whether it came straight from the engine
    /// or through an area.
    pub fn game_error(&self) -> Option<&GameError> {
        match self {
            Self::Game(err) | Self::Area(AreaError::Game(err)) => Some(err),
            _ => None,
        }
    }
}
