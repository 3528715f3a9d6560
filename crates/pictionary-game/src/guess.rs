//! Guess evaluation and scoring.

use pictionary_protocol::{GameStatus, PlayerId, TeamLetter};
use tracing::{debug, info};

use crate::{GameError, PictionaryGame, WordSource};

/// Result of a guess that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The word was guessed; `team` (the drawer's team) now has `score`.
    Correct { team: TeamLetter, score: u32 },
    /// Wrong word. Only the recorded guess changed.
    Incorrect,
}

impl<W: WordSource> PictionaryGame<W> {
    /// Checks `guess` from `player` against the secret word.
    ///
    /// Comparison ignores case. A correct guess scores a point for the
    /// team the drawer is on, retires the word, and picks a new one. The
    /// guess text is recorded either way.
    pub(crate) fn apply_guess(
        &mut self,
        player: PlayerId,
        guess: &str,
    ) -> Result<GuessOutcome, GameError> {
        if self.state.status != GameStatus::InProgress {
            return Err(GameError::GameNotInProgress);
        }
        if self.state.team_of(player).is_none() {
            return Err(GameError::PlayerNotInGame(player));
        }
        if self.state.guesser != Some(player) {
            return Err(GameError::NotYourTurn(player));
        }

        let solved = match &self.state.word {
            Some(word) if word.to_lowercase() == guess.to_lowercase() => word.clone(),
            _ => {
                self.state.guess = Some(guess.to_string());
                debug!(game_id = %self.id, %player, "incorrect guess");
                return Ok(GuessOutcome::Incorrect);
            }
        };

        // Score by explicit membership lookup: the drawer's team earns the point.
        let team = self
            .state
            .drawer
            .and_then(|drawer| self.state.team_of(drawer))
            .ok_or(GameError::GameNotInProgress)?;

        let mut used = self.state.used_words.clone();
        used.insert(solved.clone());
        let next = self.fresh_word(&used)?;

        let state = &mut self.state;
        state.used_words = used;
        state.word = Some(next);
        state.guess = Some(guess.to_string());
        let scoring = state.team_mut(team);
        scoring.score += 1;
        let score = scoring.score;

        info!(game_id = %self.id, %player, %team, score, word = %solved, "word guessed");
        Ok(GuessOutcome::Correct { team, score })
    }
}
