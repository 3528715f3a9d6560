//! The command dispatcher.
//!
//! A [`PictionaryArea`] owns at most one game and turns each inbound
//! command into exactly one game operation. Checks that depend on who is
//! asking (does the command name the running game, is the issuer the
//! drawer) live here so the game engine never has to know about callers.
//!
//! Every accepted command notifies the observer once. A rejected command
//! changes nothing and notifies nobody.
//!
//! # Command flow
//!
//! [`PictionaryArea::handle_command`] runs in three steps:
//!
//! 1. Route the command to the game it targets. `GameMove` and `LeaveGame`
//!    must name the current game id; board commands must come from the
//!    current drawer.
//! 2. Call exactly one game operation. Game errors come back wrapped in
//!    [`AreaError::Game`].
//! 3. On success, record the result if the game just ended, then notify.
//!
//! # Game lifecycle
//!
//! The area creates a game lazily on the first `JoinGame`. Once that game
//! is over it stays visible (so observers can read the final score) until
//! the next `JoinGame` replaces it with a fresh instance. Each finished
//! game is added to the history exactly once.
//!
//! # Clock
//!
//! [`PictionaryArea::tick`] is the entry point for a timer. It differs from
//! the `Tick` command in one way: with no game or no running round it
//! returns [`TickOutcome::Idle`] quietly instead of failing, so a timer can
//! call it on every beat.

use pictionary_game::{
    Dictionary, Game, GameConfig, GameError, PictionaryGame, TickOutcome, WordSource,
};
use pictionary_protocol::{AreaCommand, AreaId, CommandResponse, GameInstanceId, PlayerId};
use tracing::{debug, info, warn};

use crate::{AreaError, AreaObserver, AreaSnapshot, GameInstance, GameResult, Player};

/// An interactable area hosting Pictionary games.
pub struct PictionaryArea<W: WordSource + Clone = Dictionary, O: AreaObserver = ()> {
    id: AreaId,
    config: GameConfig,
    /// Cloned into every new game.
    words: W,
    occupants: Vec<Player>,
    game: Option<PictionaryGame<W>>,
    history: Vec<GameResult>,
    observer: O,
}

impl PictionaryArea {
    /// An area with default settings, the built-in dictionary and no observer.
    pub fn new(id: AreaId) -> Self {
        Self::with_parts(id, GameConfig::default(), Dictionary, ())
    }
}

impl<W: WordSource + Clone, O: AreaObserver> PictionaryArea<W, O> {
    pub fn with_parts(id: AreaId, config: GameConfig, words: W, observer: O) -> Self {
        Self {
            id,
            config,
            words,
            occupants: Vec::new(),
            game: None,
            history: Vec::new(),
            observer,
        }
    }

    pub fn id(&self) -> AreaId {
        self.id
    }

    pub fn occupants(&self) -> &[Player] {
        &self.occupants
    }

    /// The current game, finished or not.
    pub fn game(&self) -> Option<&PictionaryGame<W>> {
        self.game.as_ref()
    }

    /// Results of finished games, oldest first.
    pub fn history(&self) -> &[GameResult] {
        &self.history
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// True while a round clock is running.
    pub fn is_round_active(&self) -> bool {
        self.game
            .as_ref()
            .is_some_and(|game| game.status().is_in_progress())
    }

    pub fn snapshot(&self) -> AreaSnapshot {
        AreaSnapshot {
            id: self.id,
            occupants: self.occupants.clone(),
            game: self.game.as_ref().map(GameInstance::of),
            history: self.history.clone(),
        }
    }

    /// Adds someone to the area. Returns `false` if they were already here.
    pub fn add_occupant(&mut self, player: Player) -> bool {
        if self.occupants.iter().any(|p| p.id == player.id) {
            return false;
        }
        info!(
            area_id = %self.id,
            player_id = %player.id,
            user_name = %player.user_name,
            "occupant entered"
        );
        self.occupants.push(player);
        self.notify();
        true
    }

    /// Removes someone from the area, taking them out of the game first if
    /// they are playing. Returns `false` if they were not here.
    pub fn remove_occupant(&mut self, player_id: PlayerId) -> Result<bool, AreaError> {
        let Some(index) = self.occupants.iter().position(|p| p.id == player_id) else {
            return Ok(false);
        };
        if let Some(game) = self.game.as_mut() {
            if game.players().contains(&player_id) {
                game.leave(player_id)?;
            }
        }
        self.occupants.remove(index);
        info!(area_id = %self.id, %player_id, "occupant left");

        self.record_result();
        self.notify();
        Ok(true)
    }

    /// Applies `command` on behalf of `player`.
    pub fn handle_command(
        &mut self,
        command: AreaCommand,
        player: PlayerId,
    ) -> Result<CommandResponse, AreaError> {
        let kind = command.kind();
        match self.dispatch(command, player) {
            Ok(response) => {
                debug!(area_id = %self.id, %player, command = kind, "command applied");
                self.record_result();
                self.notify();
                Ok(response)
            }
            Err(error) => {
                warn!(area_id = %self.id, %player, command = kind, %error, "command rejected");
                Err(error)
            }
        }
    }

    /// Advances the running round by one second.
    ///
    /// Unlike the `Tick` command this is a silent no-op when no round is
    /// running, which makes it safe to call on a fixed schedule.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = match self.game.as_mut() {
            Some(game) => game.tick(),
            None => TickOutcome::Idle,
        };
        if outcome != TickOutcome::Idle {
            self.record_result();
            self.notify();
        }
        outcome
    }

    fn dispatch(
        &mut self,
        command: AreaCommand,
        player: PlayerId,
    ) -> Result<CommandResponse, AreaError> {
        match command {
            AreaCommand::JoinGame => self.join_game(player),
            AreaCommand::StartGame { difficulty } => {
                self.active_game()?.start_game(difficulty)?;
                Ok(CommandResponse::Ack)
            }
            AreaCommand::GameMove { game_id, game_move } => {
                let game = self.matching_game(game_id)?;
                if game_move.guess.trim().is_empty() {
                    return Err(AreaError::EmptyGuess);
                }
                game.apply_move(player, game_move)?;
                Ok(CommandResponse::Ack)
            }
            AreaCommand::LeaveGame { game_id } => {
                self.matching_game(game_id)?.leave(player)?;
                Ok(CommandResponse::Ack)
            }
            AreaCommand::Tick => {
                self.active_game()?.tick();
                Ok(CommandResponse::Ack)
            }
            AreaCommand::DrawCommand { drawing } => {
                self.drawers_game(player)?.draw(&drawing)?;
                Ok(CommandResponse::Ack)
            }
            AreaCommand::EraseCommand { drawing } => {
                self.drawers_game(player)?.erase(&drawing)?;
                Ok(CommandResponse::Ack)
            }
            AreaCommand::ResetCommand => {
                self.drawers_game(player)?.reset();
                Ok(CommandResponse::Ack)
            }
            AreaCommand::Unsupported => Err(AreaError::InvalidCommand),
        }
    }

    /// Joins the current game, or a fresh one if there is none or it is over.
    fn join_game(&mut self, player: PlayerId) -> Result<CommandResponse, AreaError> {
        let reusable = self
            .game
            .as_ref()
            .is_some_and(|game| !game.status().is_over());

        if reusable {
            let game = self.active_game()?;
            game.join(player)?;
            return Ok(CommandResponse::Joined { game_id: game.id() });
        }

        let mut game = PictionaryGame::with_config(self.config.clone(), self.words.clone());
        game.join(player)?;
        let game_id = game.id();
        info!(area_id = %self.id, %game_id, "new game opened");
        self.game = Some(game);
        Ok(CommandResponse::Joined { game_id })
    }

    fn active_game(&mut self) -> Result<&mut PictionaryGame<W>, AreaError> {
        self.game
            .as_mut()
            .ok_or(AreaError::Game(GameError::GameNotInProgress))
    }

    fn matching_game(
        &mut self,
        game_id: GameInstanceId,
    ) -> Result<&mut PictionaryGame<W>, AreaError> {
        let game = self.active_game()?;
        if game.id() != game_id {
            return Err(AreaError::GameIdMismatch {
                expected: game.id(),
                actual: game_id,
            });
        }
        Ok(game)
    }

    fn drawers_game(&mut self, player: PlayerId) -> Result<&mut PictionaryGame<W>, AreaError> {
        match self.game.as_mut() {
            Some(game) if game.state().drawer == Some(player) => Ok(game),
            _ => Err(AreaError::NotTheDrawer(player)),
        }
    }

    /// Appends the current game's result once it is over.
    fn record_result(&mut self) {
        let Some(result) = self.game.as_ref().and_then(GameResult::of) else {
            return;
        };
        if self.history.iter().any(|r| r.game_id == result.game_id) {
            return;
        }
        info!(
            area_id = %self.id,
            game_id = %result.game_id,
            winner = %result.winner,
            "game result recorded"
        );
        self.history.push(result);
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        self.observer.area_changed(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Subscribers;
    use pictionary_game::FixedWords;
    use pictionary_protocol::{Color, Difficulty, GameStatus, PictionaryMove, Pixel, Winner};
    use tokio::sync::mpsc;

    type TestArea = PictionaryArea<FixedWords, mpsc::UnboundedSender<AreaSnapshot>>;

    fn pid(id: u64) -> PlayerId {
        PlayerId(id)
    }

    fn area() -> (TestArea, mpsc::UnboundedReceiver<AreaSnapshot>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let words = FixedWords::new(["kite", "lamp", "rope", "vase", "drum"]);
        (PictionaryArea::with_parts(AreaId(1), GameConfig::default(), words, tx), rx)
    }

    /// Number of notifications waiting.
    fn drain(rx: &mut mpsc::UnboundedReceiver<AreaSnapshot>) -> usize {
        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }

    fn full_game(area: &mut TestArea) -> GameInstanceId {
        let mut id = None;
        for i in 1..=4 {
            match area.handle_command(AreaCommand::JoinGame, pid(i)).unwrap() {
                CommandResponse::Joined { game_id } => id = Some(game_id),
                other => panic!("unexpected response {other:?}"),
            }
        }
        id.unwrap()
    }

    fn started(area: &mut TestArea) -> GameInstanceId {
        let id = full_game(area);
        area.handle_command(AreaCommand::StartGame { difficulty: Difficulty::Easy }, pid(1))
            .unwrap();
        id
    }

    fn stroke() -> Vec<Pixel> {
        vec![Pixel::new(0, 0, Color::new("#123456"))]
    }

    #[test]
    fn test_join_opens_one_game_for_everyone() {
        let (mut area, mut rx) = area();
        let first = area.handle_command(AreaCommand::JoinGame, pid(1)).unwrap();
        let second = area.handle_command(AreaCommand::JoinGame, pid(2)).unwrap();
        assert_eq!(first, second);
        assert_eq!(drain(&mut rx), 2);
        assert_eq!(area.game().unwrap().players(), vec![pid(1), pid(2)]);
    }

    #[test]
    fn test_rejected_join_notifies_nobody() {
        let (mut area, mut rx) = area();
        full_game(&mut area);
        drain(&mut rx);
        let before = area.snapshot();

        assert_eq!(
            area.handle_command(AreaCommand::JoinGame, pid(5)),
            Err(AreaError::Game(GameError::GameFull))
        );
        assert_eq!(
            area.handle_command(AreaCommand::JoinGame, pid(1)),
            Err(AreaError::Game(GameError::PlayerAlreadyInGame(pid(1))))
        );
        assert_eq!(drain(&mut rx), 0);
        assert_eq!(area.snapshot(), before);
    }

    #[test]
    fn test_commands_without_a_game() {
        let (mut area, mut rx) = area();
        let no_game = Err(AreaError::Game(GameError::GameNotInProgress));

        assert_eq!(
            area.handle_command(AreaCommand::StartGame { difficulty: Difficulty::Hard }, pid(1)),
            no_game
        );
        assert_eq!(area.handle_command(AreaCommand::Tick, pid(1)), no_game);
        assert_eq!(
            area.handle_command(AreaCommand::LeaveGame { game_id: GameInstanceId(0) }, pid(1)),
            no_game
        );
        assert_eq!(
            area.handle_command(AreaCommand::ResetCommand, pid(1)),
            Err(AreaError::NotTheDrawer(pid(1)))
        );
        assert_eq!(area.tick(), TickOutcome::Idle);
        assert_eq!(drain(&mut rx), 0);
    }

    #[test]
    fn test_game_move_checks_id_then_text() {
        let (mut area, mut rx) = area();
        let game_id = started(&mut area);
        drain(&mut rx);
        let wrong = GameInstanceId(game_id.0 + 1000);

        assert_eq!(
            area.handle_command(
                AreaCommand::GameMove { game_id: wrong, game_move: PictionaryMove::new("") },
                pid(2),
            ),
            Err(AreaError::GameIdMismatch { expected: game_id, actual: wrong })
        );
        assert_eq!(
            area.handle_command(
                AreaCommand::GameMove { game_id, game_move: PictionaryMove::new("  ") },
                pid(2),
            ),
            Err(AreaError::EmptyGuess)
        );
        assert_eq!(drain(&mut rx), 0);

        area.handle_command(
            AreaCommand::GameMove { game_id, game_move: PictionaryMove::new("kite") },
            pid(2),
        )
        .unwrap();
        assert_eq!(drain(&mut rx), 1);
        assert_eq!(area.game().unwrap().state().team_a.score, 1);
    }

    #[test]
    fn test_only_the_drawer_touches_the_board() {
        let (mut area, mut rx) = area();
        started(&mut area);
        drain(&mut rx);

        for player in [pid(2), pid(3), pid(9)] {
            assert_eq!(
                area.handle_command(AreaCommand::DrawCommand { drawing: stroke() }, player),
                Err(AreaError::NotTheDrawer(player))
            );
        }
        assert_eq!(drain(&mut rx), 0);

        area.handle_command(AreaCommand::DrawCommand { drawing: stroke() }, pid(1))
            .unwrap();
        let board = &area.game().unwrap().state().board;
        assert_eq!(board.get(0, 0), Some(&Color::new("#123456")));

        area.handle_command(AreaCommand::EraseCommand { drawing: stroke() }, pid(1))
            .unwrap();
        area.handle_command(AreaCommand::DrawCommand { drawing: stroke() }, pid(1))
            .unwrap();
        area.handle_command(AreaCommand::ResetCommand, pid(1)).unwrap();
        assert!(area.game().unwrap().state().board.is_blank());
        assert_eq!(drain(&mut rx), 4);
    }

    #[test]
    fn test_non_drawer_cannot_erase_or_reset_mid_round() {
        let (mut area, mut rx) = area();
        started(&mut area);
        area.handle_command(AreaCommand::DrawCommand { drawing: stroke() }, pid(1))
            .unwrap();
        drain(&mut rx);
        let before = area.snapshot();

        for player in [pid(2), pid(4)] {
            assert_eq!(
                area.handle_command(AreaCommand::EraseCommand { drawing: stroke() }, player),
                Err(AreaError::NotTheDrawer(player))
            );
            assert_eq!(
                area.handle_command(AreaCommand::ResetCommand, player),
                Err(AreaError::NotTheDrawer(player))
            );
        }

        assert_eq!(drain(&mut rx), 0);
        assert_eq!(area.snapshot(), before);
        let board = &area.game().unwrap().state().board;
        assert_eq!(board.get(0, 0), Some(&Color::new("#123456")));
    }

    #[test]
    fn test_start_needs_four_players() {
        let (mut area, mut rx) = area();
        area.handle_command(AreaCommand::JoinGame, pid(1)).unwrap();
        area.handle_command(AreaCommand::JoinGame, pid(2)).unwrap();
        drain(&mut rx);

        assert_eq!(
            area.handle_command(AreaCommand::StartGame { difficulty: Difficulty::Easy }, pid(1)),
            Err(AreaError::Game(GameError::GameNotStartable(GameStatus::WaitingForPlayers)))
        );
        assert_eq!(drain(&mut rx), 0);
        assert_eq!(area.game().unwrap().status(), GameStatus::WaitingForPlayers);
        assert_eq!(area.game().unwrap().state().word, None);
    }

    #[test]
    fn test_departed_subscribers_are_dropped_on_next_change() {
        let words = FixedWords::new(["kite"]);
        let mut area: PictionaryArea<FixedWords, Subscribers> =
            PictionaryArea::with_parts(AreaId(2), GameConfig::default(), words, Subscribers::new());
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        area.observer_mut().insert(pid(1), tx1);
        area.observer_mut().insert(pid(2), tx2);

        drop(rx1);
        area.handle_command(AreaCommand::JoinGame, pid(2)).unwrap();

        assert_eq!(area.observer().len(), 1);
        assert!(rx2.try_recv().is_ok());
    }

    #[test]
    fn test_out_of_bounds_stroke_is_rejected() {
        let (mut area, _rx) = area();
        started(&mut area);
        let drawing = vec![Pixel::new(0, 0, Color::white()), Pixel::new(35, 0, Color::white())];
        assert_eq!(
            area.handle_command(AreaCommand::DrawCommand { drawing }, pid(1)),
            Err(AreaError::Game(GameError::OutOfBounds { x: 35, y: 0 }))
        );
    }

    #[test]
    fn test_unsupported_command() {
        let (mut area, mut rx) = area();
        assert_eq!(
            area.handle_command(AreaCommand::Unsupported, pid(1)),
            Err(AreaError::InvalidCommand)
        );
        assert_eq!(drain(&mut rx), 0);
    }

    #[test]
    fn test_finished_game_is_recorded_once_and_replaced_on_join() {
        let (mut area, _rx) = area();
        let first = started(&mut area);

        area.handle_command(AreaCommand::LeaveGame { game_id: first }, pid(3))
            .unwrap();
        assert_eq!(area.game().unwrap().status(), GameStatus::Over);
        assert_eq!(area.history().len(), 1);
        assert_eq!(area.history()[0].winner, Winner::TeamA);

        // More leaves on the finished game do not add history.
        area.handle_command(AreaCommand::LeaveGame { game_id: first }, pid(4))
            .unwrap();
        assert_eq!(area.history().len(), 1);

        let CommandResponse::Joined { game_id } =
            area.handle_command(AreaCommand::JoinGame, pid(1)).unwrap()
        else {
            panic!("expected a join");
        };
        assert_ne!(game_id, first);
        assert_eq!(area.game().unwrap().status(), GameStatus::WaitingForPlayers);
        assert_eq!(area.history().len(), 1);
    }

    #[test]
    fn test_tick_notifies_only_while_running() {
        let (mut area, mut rx) = area();
        full_game(&mut area);
        drain(&mut rx);

        assert_eq!(area.tick(), TickOutcome::Idle);
        assert_eq!(drain(&mut rx), 0);

        area.handle_command(AreaCommand::StartGame { difficulty: Difficulty::Easy }, pid(4))
            .unwrap();
        drain(&mut rx);
        assert!(area.is_round_active());
        assert_eq!(area.tick(), TickOutcome::Counted { remaining: 59 });
        assert_eq!(drain(&mut rx), 1);
    }

    #[test]
    fn test_occupant_leaving_forfeits_their_game() {
        let (mut area, mut rx) = area();
        assert!(area.add_occupant(Player::new(pid(1), "ada")));
        assert!(!area.add_occupant(Player::new(pid(1), "ada again")));
        started(&mut area);
        drain(&mut rx);

        assert_eq!(area.remove_occupant(pid(1)), Ok(true));
        assert!(area.occupants().is_empty());
        assert_eq!(area.game().unwrap().state().winner, Some(Winner::TeamB));
        assert_eq!(area.history().len(), 1);
        assert_eq!(drain(&mut rx), 1);

        assert_eq!(area.remove_occupant(pid(1)), Ok(false));
        assert_eq!(drain(&mut rx), 0);
    }
}
