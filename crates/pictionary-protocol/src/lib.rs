//! Command surface and value types for the Pictionary area.
//!
//! - **Types** ([`AreaCommand`], [`Pixel`], [`GameStatus`], ...): the data
//!   that flows between clients, the area dispatcher, and the game engine.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how commands and
//!   snapshots become bytes.
//! - **Errors** ([`ProtocolError`]).
//!
//! This crate knows nothing about game rules; it only fixes the vocabulary.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    AreaCommand, AreaId, Color, CommandResponse, Difficulty, GameInstanceId,
    GameStatus, PictionaryMove, Pixel, PlayerId, TeamLetter, Winner,
};
