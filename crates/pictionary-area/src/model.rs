//! What observers see: occupants, the current game instance, and history.

use pictionary_game::{Game, PictionaryGame, PictionaryState, WordSource};
use pictionary_protocol::{AreaId, GameInstanceId, PlayerId, Winner};
use serde::{Deserialize, Serialize};

/// Someone standing in the area, whether or not they are playing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub user_name: String,
}

impl Player {
    pub fn new(id: PlayerId, user_name: impl Into<String>) -> Self {
        Self {
            id,
            user_name: user_name.into(),
        }
    }
}

/// The game currently hosted by the area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInstance {
    pub id: GameInstanceId,
    pub players: Vec<PlayerId>,
    pub state: PictionaryState,
}

impl GameInstance {
    pub(crate) fn of<W: WordSource>(game: &PictionaryGame<W>) -> Self {
        Self {
            id: game.id(),
            players: game.players(),
            state: game.state().clone(),
        }
    }
}

/// Final score of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub game_id: GameInstanceId,
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    pub score_a: u32,
    pub score_b: u32,
    pub winner: Winner,
}

impl GameResult {
    /// Reads the result off a game. `None` until the game is over.
    pub(crate) fn of<W: WordSource>(game: &PictionaryGame<W>) -> Option<Self> {
        let state = game.state();
        if !state.status.is_over() {
            return None;
        }
        Some(Self {
            game_id: game.id(),
            team_a: state.team_a.players.clone(),
            team_b: state.team_b.players.clone(),
            score_a: state.team_a.score,
            score_b: state.team_b.score,
            winner: state.winner.unwrap_or_else(|| state.leader()),
        })
    }
}

/// Everything an observer is told after a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaSnapshot {
    pub id: AreaId,
    pub occupants: Vec<Player>,
    pub game: Option<GameInstance>,
    pub history: Vec<GameResult>,
}

impl AreaSnapshot {
    /// The snapshot as `viewer` may see it: the secret word is removed
    /// unless `viewer` is drawing.
    pub fn redacted_for(&self, viewer: PlayerId) -> Self {
        Self {
            game: self.game.as_ref().map(|game| GameInstance {
                id: game.id,
                players: game.players.clone(),
                state: game.state.redacted_for(viewer),
            }),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pictionary_game::FixedWords;
    use pictionary_protocol::Difficulty;

    fn started() -> PictionaryGame<FixedWords> {
        let mut game = PictionaryGame::with_words(FixedWords::new(["owl", "cat"]));
        for i in 1..=4 {
            game.join(PlayerId(i)).unwrap();
        }
        game.start_game(Difficulty::Easy).unwrap();
        game
    }

    #[test]
    fn test_result_only_for_finished_games() {
        let mut game = started();
        assert_eq!(GameResult::of(&game), None);

        game.leave(PlayerId(3)).unwrap();
        let result = GameResult::of(&game).unwrap();
        assert_eq!(result.game_id, game.id());
        assert_eq!(result.winner, Winner::TeamA);
        assert_eq!(result.team_a, vec![PlayerId(1), PlayerId(2)]);
        assert_eq!(result.team_b, vec![PlayerId(4)]);
    }

    #[test]
    fn test_result_wire_shape() {
        let result = GameResult {
            game_id: GameInstanceId(4),
            team_a: vec![PlayerId(1), PlayerId(2)],
            team_b: vec![PlayerId(3)],
            score_a: 2,
            score_b: 0,
            winner: Winner::TeamA,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["game_id"], 4);
        assert_eq!(json["winner"], "A");
        assert_eq!(json["team_b"], serde_json::json!([3]));
    }

    #[test]
    fn test_redaction_keeps_word_for_drawer_only() {
        let game = started();
        let snapshot = AreaSnapshot {
            id: AreaId(1),
            occupants: vec![Player::new(PlayerId(1), "ada")],
            game: Some(GameInstance::of(&game)),
            history: Vec::new(),
        };

        let word = |s: &AreaSnapshot| s.game.as_ref().and_then(|g| g.state.word.clone());
        assert_eq!(word(&snapshot.redacted_for(PlayerId(1))).as_deref(), Some("owl"));
        assert_eq!(word(&snapshot.redacted_for(PlayerId(2))), None);
        assert_eq!(word(&snapshot.redacted_for(PlayerId(42))), None);
        assert_eq!(snapshot.redacted_for(PlayerId(2)).occupants, snapshot.occupants);
    }
}
