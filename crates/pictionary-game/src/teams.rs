//! Team membership and drawer/guesser rotation.

use pictionary_protocol::{PlayerId, TeamLetter};
use serde::{Deserialize, Serialize};

use crate::{GameError, PictionaryState};

/// Players per team.
pub const TEAM_SIZE: usize = 2;

/// One of the two teams.
///
/// `players` is kept in join order; the rotation rule depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub letter: TeamLetter,
    pub players: Vec<PlayerId>,
    pub score: u32,
}

impl Team {
    pub fn new(letter: TeamLetter) -> Self {
        Self {
            letter,
            players: Vec::with_capacity(TEAM_SIZE),
            score: 0,
        }
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= TEAM_SIZE
    }
}

/// Drawer and guesser for `round`, as `(drawer, guesser)`.
///
/// Odd rounds belong to team A and even rounds to team B. Within the
/// drawing team the first-joined player draws during the first half of
/// the game and the second-joined player draws during the second half, so
/// over `max_rounds == 4` every player draws exactly once:
///
/// | round | team | drawer | guesser |
/// |-------|------|--------|---------|
/// | 1     | A    | A[0]   | A[1]    |
/// | 2     | B    | B[0]   | B[1]    |
/// | 3     | A    | A[1]   | A[0]    |
/// | 4     | B    | B[1]   | B[0]    |
///
/// Returns `None` if the drawing team is not full.
pub fn roles_for_round(
    round: u32,
    max_rounds: u32,
    team_a: &Team,
    team_b: &Team,
) -> Option<(PlayerId, PlayerId)> {
    let team = if round % 2 == 1 { team_a } else { team_b };
    let [first, second] = team.players.as_slice() else {
        return None;
    };
    if round <= max_rounds / 2 {
        Some((*first, *second))
    } else {
        Some((*second, *first))
    }
}

impl PictionaryState {
    pub fn team(&self, letter: TeamLetter) -> &Team {
        match letter {
            TeamLetter::A => &self.team_a,
            TeamLetter::B => &self.team_b,
        }
    }

    pub(crate) fn team_mut(&mut self, letter: TeamLetter) -> &mut Team {
        match letter {
            TeamLetter::A => &mut self.team_a,
            TeamLetter::B => &mut self.team_b,
        }
    }

    /// Which team the player is on, if any.
    pub fn team_of(&self, player: PlayerId) -> Option<TeamLetter> {
        if self.team_a.contains(player) {
            Some(TeamLetter::A)
        } else if self.team_b.contains(player) {
            Some(TeamLetter::B)
        } else {
            None
        }
    }

    /// Returns `true` when all four seats are taken.
    pub fn teams_full(&self) -> bool {
        self.team_a.is_full() && self.team_b.is_full()
    }

    /// Every player in the game, team A first, each team in join order.
    pub fn players(&self) -> Vec<PlayerId> {
        self.team_a
            .players
            .iter()
            .chain(&self.team_b.players)
            .copied()
            .collect()
    }

    /// Seats a player on team A until it is full, then on team B.
    pub(crate) fn add_player(&mut self, player: PlayerId) -> Result<TeamLetter, GameError> {
        if self.team_of(player).is_some() {
            return Err(GameError::PlayerAlreadyInGame(player));
        }
        let letter = if !self.team_a.is_full() {
            TeamLetter::A
        } else if !self.team_b.is_full() {
            TeamLetter::B
        } else {
            return Err(GameError::GameFull);
        };
        self.team_mut(letter).players.push(player);
        Ok(letter)
    }

    /// Removes a player from whichever team holds them.
    pub(crate) fn remove_player(&mut self, player: PlayerId) -> Result<TeamLetter, GameError> {
        let letter = self
            .team_of(player)
            .ok_or(GameError::PlayerNotInGame(player))?;
        self.team_mut(letter).players.retain(|p| *p != player);
        Ok(letter)
    }

    /// Sets drawer and guesser for the current round.
    pub(crate) fn assign_roles(&mut self, max_rounds: u32) {
        let roles = roles_for_round(self.round, max_rounds, &self.team_a, &self.team_b);
        self.drawer = roles.map(|(drawer, _)| drawer);
        self.guesser = roles.map(|(_, guesser)| guesser);
    }
}
