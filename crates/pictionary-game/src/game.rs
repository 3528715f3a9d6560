//! The Pictionary state machine.
//!
//! [`PictionaryGame`] owns one [`PictionaryState`] and is the only thing
//! that mutates it. Operations validate first and commit second, so a
//! returned error always means "nothing changed".
//!
//! The round clock lives in `clock.rs` and guess handling in `guess.rs`;
//! both are further `impl` blocks on the same type.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use pictionary_protocol::{
    Difficulty, GameInstanceId, GameStatus, PictionaryMove, Pixel, PlayerId, TeamLetter, Winner,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Dictionary, Game, GameConfig, GameError, GuessOutcome, Team, Whiteboard, WordSource};

/// Counter for generating unique game instance IDs.
static NEXT_GAME_ID: AtomicU64 = AtomicU64::new(1);

/// Everything observers can see about one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictionaryState {
    pub status: GameStatus,
    pub team_a: Team,
    pub team_b: Team,
    pub drawer: Option<PlayerId>,
    pub guesser: Option<PlayerId>,
    /// The secret word. Only the drawer should ever be shown it.
    pub word: Option<String>,
    /// The most recent guess, right or wrong.
    pub guess: Option<String>,
    /// Words already played this game; never chosen again.
    pub used_words: BTreeSet<String>,
    pub difficulty: Difficulty,
    /// Seconds left in the current round.
    pub timer: u32,
    /// Current round, `1..=max_rounds`.
    pub round: u32,
    /// Set only once `status` is `OVER`.
    pub winner: Option<Winner>,
    pub board: Whiteboard,
}

impl PictionaryState {
    /// A game nobody has joined yet.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            status: GameStatus::WaitingForPlayers,
            team_a: Team::new(TeamLetter::A),
            team_b: Team::new(TeamLetter::B),
            drawer: None,
            guesser: None,
            word: None,
            guess: None,
            used_words: BTreeSet::new(),
            difficulty: Difficulty::NoDifficulty,
            timer: config.round_time_secs,
            round: 1,
            winner: None,
            board: Whiteboard::new(config.board_height, config.board_width),
        }
    }

    /// Copy of the state as `viewer` may see it: the word is blanked for
    /// everyone except the drawer.
    pub fn redacted_for(&self, viewer: PlayerId) -> Self {
        let mut view = self.clone();
        if self.drawer != Some(viewer) {
            view.word = None;
        }
        view
    }

    /// The team with strictly more points, or a tie.
    pub fn leader(&self) -> Winner {
        match self.team_a.score.cmp(&self.team_b.score) {
            std::cmp::Ordering::Greater => Winner::TeamA,
            std::cmp::Ordering::Less => Winner::TeamB,
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }
}

/// One authoritative Pictionary game.
///
/// Generic over its [`WordSource`] so tests and custom deployments can
/// supply their own words; the default is the built-in [`Dictionary`].
#[derive(Debug)]
pub struct PictionaryGame<W: WordSource = Dictionary> {
    pub(crate) id: GameInstanceId,
    pub(crate) config: GameConfig,
    pub(crate) state: PictionaryState,
    pub(crate) words: W,
}

impl PictionaryGame<Dictionary> {
    /// A standard game using the built-in dictionary.
    pub fn new() -> Self {
        Self::with_config(GameConfig::default(), Dictionary)
    }
}

impl Default for PictionaryGame<Dictionary> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: WordSource> PictionaryGame<W> {
    /// A standard game drawing words from `words`.
    pub fn with_words(words: W) -> Self {
        Self::with_config(GameConfig::default(), words)
    }

    pub fn with_config(config: GameConfig, words: W) -> Self {
        let config = config.validated();
        let id = GameInstanceId(NEXT_GAME_ID.fetch_add(1, Ordering::Relaxed));
        debug!(game_id = %id, ?config, "game created");
        Self {
            id,
            state: PictionaryState::new(&config),
            config,
            words,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Begins round 1.
    ///
    /// Resets scores, used words, and the board, assigns the first roles,
    /// and picks the first word from the `difficulty` pool.
    pub fn start_game(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        if self.state.status != GameStatus::WaitingToStart {
            return Err(GameError::GameNotStartable(self.state.status));
        }
        let word = self
            .words
            .choose_word(difficulty, &BTreeSet::new())
            .ok_or(GameError::WordsExhausted(difficulty))?;

        let state = &mut self.state;
        state.difficulty = difficulty;
        state.team_a.score = 0;
        state.team_b.score = 0;
        state.used_words.clear();
        state.round = 1;
        state.timer = self.config.round_time_secs;
        state.guess = None;
        state.winner = None;
        state.word = Some(word);
        state.board.reset();
        state.assign_roles(self.config.max_rounds);
        state.status = GameStatus::InProgress;

        info!(
            game_id = %self.id,
            %difficulty,
            drawer = ?state.drawer,
            guesser = ?state.guesser,
            "game started"
        );
        Ok(())
    }

    /// Paints a stroke onto the board.
    ///
    /// The engine does not know who is asking; callers must check that the
    /// issuer is the drawer.
    pub fn draw(&mut self, pixels: &[Pixel]) -> Result<(), GameError> {
        self.state.board.paint(pixels)?;
        debug!(game_id = %self.id, pixels = pixels.len(), "stroke drawn");
        Ok(())
    }

    /// Whitens a stroke on the board.
    pub fn erase(&mut self, pixels: &[Pixel]) -> Result<(), GameError> {
        self.state.board.erase(pixels)?;
        debug!(game_id = %self.id, pixels = pixels.len(), "stroke erased");
        Ok(())
    }

    /// Clears the whole board.
    pub fn reset(&mut self) {
        self.state.board.reset();
        debug!(game_id = %self.id, "board reset");
    }

    /// Ends the game with `winner` and clears the round.
    pub(crate) fn finish(&mut self, winner: Winner) {
        let state = &mut self.state;
        state.status = GameStatus::Over;
        state.winner = Some(winner);
        state.drawer = None;
        state.guesser = None;
        state.word = None;
        state.timer = 0;
        state.board.reset();
        info!(
            game_id = %self.id,
            %winner,
            score_a = state.team_a.score,
            score_b = state.team_b.score,
            "game over"
        );
    }

    /// Picks a word for the current difficulty that is not in `used`.
    pub(crate) fn fresh_word(&mut self, used: &BTreeSet<String>) -> Result<String, GameError> {
        let difficulty = self.state.difficulty;
        self.words
            .choose_word(difficulty, used)
            .ok_or(GameError::WordsExhausted(difficulty))
    }

    /// Picks the word for a new round, starting the pool over if needed.
    ///
    /// On exhaustion `used` is cleared down to `retired` (so the word that
    /// just left the board does not come straight back) and the pick is
    /// retried. A pool of one word gives that word again. `None` only when
    /// the source has no words at all.
    pub(crate) fn recycled_word(
        &mut self,
        used: &mut BTreeSet<String>,
        retired: Option<&str>,
    ) -> Option<String> {
        if let Ok(word) = self.fresh_word(used) {
            return Some(word);
        }

        let difficulty = self.state.difficulty;
        info!(game_id = %self.id, ?difficulty, played = used.len(), "word pool recycled");
        used.clear();
        if let Some(retired) = retired {
            used.insert(retired.to_string());
            if let Some(word) = self.words.choose_word(difficulty, used) {
                return Some(word);
            }
            used.clear();
        }
        self.words.choose_word(difficulty, used)
    }
}

impl<W: WordSource> Game for PictionaryGame<W> {
    type State = PictionaryState;
    type Move = PictionaryMove;
    type MoveOutcome = GuessOutcome;

    fn id(&self) -> GameInstanceId {
        self.id
    }

    fn state(&self) -> &PictionaryState {
        &self.state
    }

    fn status(&self) -> GameStatus {
        self.state.status
    }

    fn players(&self) -> Vec<PlayerId> {
        self.state.players()
    }

    /// Seats the player (team A first). The fourth player moves the game
    /// to `WAITING_TO_START`.
    fn join(&mut self, player: PlayerId) -> Result<(), GameError> {
        if self.state.status.is_over() {
            return Err(GameError::GameOver);
        }
        let team = self.state.add_player(player)?;
        if self.state.teams_full() {
            self.state.status = GameStatus::WaitingToStart;
        }
        info!(
            game_id = %self.id,
            %player,
            %team,
            status = %self.state.status,
            "player joined"
        );
        Ok(())
    }

    /// Removes the player.
    ///
    /// Leaving a game whose teams were both full forfeits it: the other
    /// team wins. Otherwise the game goes back to waiting for players.
    /// Leaving a finished game only frees the seat.
    fn leave(&mut self, player: PlayerId) -> Result<(), GameError> {
        let was_full = self.state.teams_full();
        let team = self.state.remove_player(player)?;
        info!(game_id = %self.id, %player, %team, "player left");

        if self.state.status.is_over() {
            return Ok(());
        }
        if was_full {
            self.finish(Winner::from(team.other()));
        } else {
            self.state.status = GameStatus::WaitingForPlayers;
        }
        Ok(())
    }

    fn apply_move(
        &mut self,
        player: PlayerId,
        game_move: PictionaryMove,
    ) -> Result<GuessOutcome, GameError> {
        self.apply_guess(player, &game_move.guess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedWords;

    fn pid(id: u64) -> PlayerId {
        PlayerId(id)
    }

    fn game() -> PictionaryGame<FixedWords> {
        PictionaryGame::with_words(FixedWords::new(["apple", "pear", "plum", "fig", "kiwi"]))
    }

    fn full_game() -> PictionaryGame<FixedWords> {
        let mut g = game();
        for i in 1..=4 {
            g.join(pid(i)).unwrap();
        }
        g
    }

    #[test]
    fn test_new_game_is_waiting_with_blank_board() {
        let g = PictionaryGame::new();
        let state = g.state();
        assert_eq!(state.status, GameStatus::WaitingForPlayers);
        assert!(state.team_a.players.is_empty());
        assert!(state.team_b.players.is_empty());
        assert_eq!(state.round, 1);
        assert_eq!(state.timer, 60);
        assert!(state.board.is_blank());
        assert_eq!(state.board.height(), 35);
        assert_eq!(state.board.width(), 50);
    }

    #[test]
    fn test_games_get_unique_ids() {
        assert_ne!(game().id(), game().id());
    }

    #[test]
    fn test_fourth_join_makes_game_startable() {
        let mut g = game();
        for i in 1..=3 {
            g.join(pid(i)).unwrap();
            assert_eq!(g.status(), GameStatus::WaitingForPlayers);
        }
        g.join(pid(4)).unwrap();
        assert_eq!(g.status(), GameStatus::WaitingToStart);
        assert_eq!(g.players(), vec![pid(1), pid(2), pid(3), pid(4)]);
    }

    #[test]
    fn test_fifth_join_is_game_full() {
        let mut g = full_game();
        assert_eq!(g.join(pid(5)), Err(GameError::GameFull));
        assert_eq!(g.status(), GameStatus::WaitingToStart);
    }

    #[test]
    fn test_join_finished_game_fails() {
        let mut g = full_game();
        g.leave(pid(1)).unwrap();
        assert_eq!(g.join(pid(9)), Err(GameError::GameOver));
    }

    #[test]
    fn test_start_requires_waiting_to_start() {
        let mut g = game();
        g.join(pid(1)).unwrap();
        let before = g.state().clone();
        assert_eq!(
            g.start_game(Difficulty::Easy),
            Err(GameError::GameNotStartable(GameStatus::WaitingForPlayers))
        );
        assert_eq!(g.state(), &before);
    }

    #[test]
    fn test_start_cannot_run_twice() {
        let mut g = full_game();
        g.start_game(Difficulty::Easy).unwrap();
        assert_eq!(
            g.start_game(Difficulty::Hard),
            Err(GameError::GameNotStartable(GameStatus::InProgress))
        );
        assert_eq!(g.state().difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_start_sets_up_round_one() {
        let mut g = full_game();
        g.start_game(Difficulty::Medium).unwrap();
        let state = g.state();
        assert_eq!(state.status, GameStatus::InProgress);
        assert_eq!(state.difficulty, Difficulty::Medium);
        assert_eq!(state.round, 1);
        assert_eq!(state.timer, 60);
        assert_eq!(state.team_a.score, 0);
        assert_eq!(state.team_b.score, 0);
        assert_eq!(state.word.as_deref(), Some("apple"));
        assert_eq!(state.drawer, Some(pid(1)));
        assert_eq!(state.guesser, Some(pid(2)));
    }

    #[test]
    fn test_start_with_empty_pool_changes_nothing() {
        let mut g = PictionaryGame::with_words(FixedWords::default());
        for i in 1..=4 {
            g.join(pid(i)).unwrap();
        }
        let before = g.state().clone();
        assert_eq!(
            g.start_game(Difficulty::Hard),
            Err(GameError::WordsExhausted(Difficulty::Hard))
        );
        assert_eq!(g.state(), &before);
    }

    #[test]
    fn test_leave_before_full_reverts_to_waiting() {
        let mut g = game();
        g.join(pid(1)).unwrap();
        g.join(pid(2)).unwrap();
        g.leave(pid(1)).unwrap();
        assert_eq!(g.status(), GameStatus::WaitingForPlayers);
        assert_eq!(g.players(), vec![pid(2)]);
        assert_eq!(g.state().winner, None);
    }

    #[test]
    fn test_leave_full_game_forfeits_to_other_team() {
        let mut g = full_game();
        g.start_game(Difficulty::Easy).unwrap();
        g.leave(pid(1)).unwrap();
        assert_eq!(g.status(), GameStatus::Over);
        assert_eq!(g.state().winner, Some(Winner::TeamB));
        assert_eq!(g.state().drawer, None);
        assert_eq!(g.state().word, None);

        let mut g = full_game();
        g.leave(pid(4)).unwrap();
        assert_eq!(g.status(), GameStatus::Over);
        assert_eq!(g.state().winner, Some(Winner::TeamA));
    }

    #[test]
    fn test_leave_finished_game_keeps_result() {
        let mut g = full_game();
        g.leave(pid(3)).unwrap();
        g.leave(pid(1)).unwrap();
        assert_eq!(g.status(), GameStatus::Over);
        assert_eq!(g.state().winner, Some(Winner::TeamA));
    }

    #[test]
    fn test_leave_unknown_player_fails() {
        let mut g = full_game();
        assert_eq!(g.leave(pid(9)), Err(GameError::PlayerNotInGame(pid(9))));
        assert_eq!(g.status(), GameStatus::WaitingToStart);
    }

    #[test]
    fn test_draw_and_erase_go_to_board() {
        let mut g = full_game();
        let stroke = [Pixel::new(0, 0, pictionary_protocol::Color::new("#000000"))];
        g.draw(&stroke).unwrap();
        assert!(!g.state().board.is_blank());
        g.erase(&stroke).unwrap();
        assert!(g.state().board.is_blank());

        g.draw(&stroke).unwrap();
        g.reset();
        assert!(g.state().board.is_blank());
    }

    #[test]
    fn test_draw_out_of_bounds_is_rejected() {
        let mut g = full_game();
        let stroke = [Pixel::new(35, 0, pictionary_protocol::Color::new("#000000"))];
        assert_eq!(g.draw(&stroke), Err(GameError::OutOfBounds { x: 35, y: 0 }));
    }

    #[test]
    fn test_redacted_state_hides_word_from_non_drawers() {
        let mut g = full_game();
        g.start_game(Difficulty::Easy).unwrap();
        let state = g.state();
        assert_eq!(state.redacted_for(pid(1)).word.as_deref(), Some("apple"));
        assert_eq!(state.redacted_for(pid(2)).word, None);
        assert_eq!(state.redacted_for(pid(3)).word, None);
        assert_eq!(state.redacted_for(pid(2)).drawer, Some(pid(1)));
    }

    #[test]
    fn test_leader() {
        let mut state = PictionaryState::new(&GameConfig::default());
        assert_eq!(state.leader(), Winner::Tie);
        state.team_b.score = 2;
        assert_eq!(state.leader(), Winner::TeamB);
        state.team_a.score = 3;
        assert_eq!(state.leader(), Winner::TeamA);
    }

    #[test]
    fn test_state_serializes_for_observers() {
        let g = full_game();
        let json: serde_json::Value = serde_json::to_value(g.state()).unwrap();
        assert_eq!(json["status"], "WAITING_TO_START");
        assert_eq!(json["team_a"]["letter"], "A");
        assert_eq!(json["team_b"]["players"], serde_json::json!([3, 4]));
        assert_eq!(json["difficulty"], "No difficulty");
    }
}
