//! # Pictionary
//!
//! Server-authoritative team Pictionary for interactive areas.
//!
//! Four players form two teams and take turns drawing and guessing on a
//! shared whiteboard. This crate re-exports the layers:
//!
//! - [`protocol`]: ids, commands, and the wire codec
//! - [`game`]: the synchronous game engine
//! - [`area`]: the command dispatcher and its Tokio actor
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use pictionary::prelude::*;
//!
//! # async fn run() -> Result<(), PictionaryError> {
//! pictionary::init_logging();
//! let area = spawn_area(AreaId(1), AreaConfig::default(), Dictionary);
//! area.command(PlayerId(1), AreaCommand::JoinGame).await?;
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::PictionaryError;

pub use pictionary_area as area;
pub use pictionary_game as game;
pub use pictionary_protocol as protocol;

/// Everything needed to host an area and talk to it.
pub mod prelude {
    pub use crate::PictionaryError;
    pub use pictionary_area::{
        AreaConfig, AreaError, AreaHandle, AreaObserver, AreaSnapshot, GameResult, PictionaryArea,
        Player, spawn_area,
    };
    pub use pictionary_game::{
        Dictionary, Game, GameConfig, GameError, PictionaryGame, PictionaryState, TickOutcome,
        WordSource,
    };
    pub use pictionary_protocol::{
        AreaCommand, AreaId, Codec, Color, CommandResponse, Difficulty, GameInstanceId,
        GameStatus, JsonCodec, PictionaryMove, Pixel, PlayerId, TeamLetter, Winner,
    };
}

/// Installs a `tracing` subscriber that writes to stderr.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Returns `false`
/// if a global subscriber was already installed.
pub fn init_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!("logging initialized");
    }
    installed
}
