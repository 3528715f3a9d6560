//! Error types for the game engine.

use pictionary_protocol::{Difficulty, GameStatus, PlayerId};

/// Why a game operation was rejected.
///
/// Every operation validates before it mutates, so returning one of these
/// guarantees the game state is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The player is already on one of the teams.
    #[error("player {0} is already in this game")]
    PlayerAlreadyInGame(PlayerId),

    /// Both teams already have two players.
    #[error("game is full")]
    GameFull,

    /// The player is on neither team.
    #[error("player {0} is not in this game")]
    PlayerNotInGame(PlayerId),

    /// `start_game` outside `WAITING_TO_START`.
    #[error("game cannot be started while {0}")]
    GameNotStartable(GameStatus),

    /// A guess (or any in-round operation) while no round is running.
    #[error("game is not in progress")]
    GameNotInProgress,

    /// The game has already finished.
    #[error("game is over")]
    GameOver,

    /// Someone other than the current guesser submitted a guess.
    #[error("it is not {0}'s turn to guess")]
    NotYourTurn(PlayerId),

    /// A pixel fell outside the whiteboard.
    #[error("pixel ({x}, {y}) is outside the whiteboard")]
    OutOfBounds { x: i64, y: i64 },

    /// Every word in the pool has already been played.
    #[error("no unused words left for difficulty {0}")]
    WordsExhausted(Difficulty),
}
