//! The `Game` trait: what an interactable area needs from any game.
//!
//! An area routes join, leave, and move commands without knowing the
//! rules behind them. Game-specific operations (drawing, the round clock)
//! stay inherent on the concrete game type.

use pictionary_protocol::{GameInstanceId, GameStatus, PlayerId};
use serde::Serialize;

use crate::GameError;

/// Capabilities shared by every game an area can host.
///
/// Implementations must be all-or-nothing: an `Err` return leaves the
/// game exactly as it was.
pub trait Game {
    /// Full observable state, sent to observers after every change.
    type State: Clone + Serialize;

    /// A player's in-game action.
    type Move;

    /// What applying a move produced.
    type MoveOutcome;

    /// The instance id, unique for the life of the process.
    fn id(&self) -> GameInstanceId;

    fn state(&self) -> &Self::State;

    fn status(&self) -> GameStatus;

    /// Players currently seated, in a stable order.
    fn players(&self) -> Vec<PlayerId>;

    fn join(&mut self, player: PlayerId) -> Result<(), GameError>;

    fn leave(&mut self, player: PlayerId) -> Result<(), GameError>;

    fn apply_move(
        &mut self,
        player: PlayerId,
        game_move: Self::Move,
    ) -> Result<Self::MoveOutcome, GameError>;
}
