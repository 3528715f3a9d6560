//! Round clock: one `tick` per second, driven from outside.
//!
//! The engine never schedules anything itself. Whoever hosts the game
//! calls [`PictionaryGame::tick`] once per second while a round is in
//! progress; ticking at any other time is a no-op.

use pictionary_protocol::Winner;
use tracing::{info, trace, warn};

use crate::{PictionaryGame, WordSource};

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No round is running.
    Idle,
    /// The clock counted down; `remaining` seconds are left.
    Counted { remaining: u32 },
    /// The round expired and `round` has begun.
    RoundAdvanced { round: u32 },
    /// The final round expired and the game is over.
    Finished { winner: Winner },
}

impl<W: WordSource> PictionaryGame<W> {
    /// Advances the round clock by one second.
    ///
    /// When the clock runs out the next round starts: fresh timer, rotated
    /// roles, a new word, no guess, and a blank board. The expired word
    /// counts as used. After the last round the higher-scoring team wins
    /// (or the game is a tie) and the game is over.
    ///
    /// A round change never waits on the word supply: once every word of
    /// the difficulty has been played the pool starts over.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.status.is_in_progress() {
            return TickOutcome::Idle;
        }

        if self.state.timer > 1 {
            self.state.timer -= 1;
            trace!(game_id = %self.id, timer = self.state.timer, "tick");
            return TickOutcome::Counted {
                remaining: self.state.timer,
            };
        }

        if self.state.round >= self.config.max_rounds {
            let winner = self.state.leader();
            self.finish(winner);
            return TickOutcome::Finished { winner };
        }

        let mut used = self.state.used_words.clone();
        let expired = self.state.word.clone();
        if let Some(expired) = &expired {
            used.insert(expired.clone());
        }
        let word = self.recycled_word(&mut used, expired.as_deref());
        if word.is_none() {
            warn!(game_id = %self.id, "word source is empty, round starts without a word");
        }

        let state = &mut self.state;
        state.used_words = used;
        state.round += 1;
        state.timer = self.config.round_time_secs;
        state.word = word;
        state.guess = None;
        state.board.reset();
        state.assign_roles(self.config.max_rounds);

        info!(
            game_id = %self.id,
            round = state.round,
            drawer = ?state.drawer,
            guesser = ?state.guesser,
            "round advanced"
        );
        TickOutcome::RoundAdvanced { round: state.round }
    }
}
