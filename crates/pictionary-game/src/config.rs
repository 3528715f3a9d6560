//! Game configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Number of rounds in a standard game: each of the four players draws once.
pub const MAX_ROUNDS: u32 = 4;

/// Seconds on the clock at the start of every round.
pub const ROUND_TIME_SECS: u32 = 60;

/// Whiteboard rows.
pub const BOARD_HEIGHT: usize = 35;

/// Whiteboard columns.
pub const BOARD_WIDTH: usize = 50;

/// Tunables for one game instance.
///
/// The defaults are the standard game; tests shrink `round_time_secs` to
/// keep clock-driven scenarios short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Rounds before the game ends. Must be even so the rotation rule can
    /// split the game into two halves.
    pub max_rounds: u32,

    /// Length of a round in seconds (one `tick` per second).
    pub round_time_secs: u32,

    /// Whiteboard rows (valid `x` is `0..board_height`).
    pub board_height: usize,

    /// Whiteboard columns (valid `y` is `0..board_width`).
    pub board_width: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
            round_time_secs: ROUND_TIME_SECS,
            board_height: BOARD_HEIGHT,
            board_width: BOARD_WIDTH,
        }
    }
}

impl GameConfig {
    /// Fix any out-of-range values so the config is safe to use.
    ///
    /// Called by [`crate::PictionaryGame::with_config`]. Rules:
    /// - `max_rounds` at least 2 and rounded up to even (down at `u32::MAX`).
    /// - `round_time_secs` at least 1.
    /// - Board dimensions at least 1.
    pub fn validated(mut self) -> Self {
        if self.max_rounds < 2 || self.max_rounds % 2 != 0 {
            let fixed = self
                .max_rounds
                .max(2)
                .checked_next_multiple_of(2)
                .unwrap_or(u32::MAX - 1);
            warn!(
                max_rounds = self.max_rounds,
                fixed, "max_rounds must be even and at least 2, adjusting"
            );
            self.max_rounds = fixed;
        }
        if self.round_time_secs == 0 {
            warn!("round_time_secs is 0, using 1");
            self.round_time_secs = 1;
        }
        if self.board_height == 0 || self.board_width == 0 {
            warn!(
                height = self.board_height,
                width = self.board_width,
                "whiteboard dimensions must be non-zero, clamping"
            );
            self.board_height = self.board_height.max(1);
            self.board_width = self.board_width.max(1);
        }
        self
    }
}
