//! Error types for the area layer.

use pictionary_game::GameError;
use pictionary_protocol::{AreaId, GameInstanceId, PlayerId};

/// Errors returned by the command dispatcher and the area actor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AreaError {
    /// The game engine rejected the operation. Also covers "no active
    /// game" as `GameError::GameNotInProgress`.
    #[error(transparent)]
    Game(#[from] GameError),

    /// The command named a game other than the active one.
    #[error("command targets game {actual} but the active game is {expected}")]
    GameIdMismatch {
        expected: GameInstanceId,
        actual: GameInstanceId,
    },

    /// A guess with no text.
    #[error("guess must not be empty")]
    EmptyGuess,

    /// A board command from someone other than the current drawer.
    #[error("player {0} is not the drawer")]
    NotTheDrawer(PlayerId),

    /// The command type is not handled by a Pictionary area.
    #[error("command is not supported by this area")]
    InvalidCommand,

    /// The area actor has stopped.
    #[error("area {0} is unavailable")]
    Unavailable(AreaId),
}
