//! Value types shared by the game engine, the area dispatcher, and clients.
//!
//! Everything here is plain data. These are the shapes that cross the
//! boundary between the transport layer and the Pictionary area, so each
//! type derives `Serialize`/`Deserialize` and the serde attributes pin the
//! JSON representation clients rely on.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player, supplied by the town/session layer.
///
/// Newtype over `u64` so a `PlayerId` can never be confused with a
/// `GameInstanceId`. `#[serde(transparent)]` keeps it a plain number on
/// the wire: `PlayerId(42)` is `42`, not `{"0":42}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// Identifies one game instance inside an area.
///
/// A fresh id is minted every time the area replaces a finished game, so
/// commands carrying a stale id can be rejected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GameInstanceId(pub u64);

impl fmt::Display for GameInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G-{}", self.0)
    }
}

/// Identifies an interactable Pictionary area in the town.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AreaId(pub u64);

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// A whiteboard cell color, encoded as an RGB hex string such as `#FF0000`.
///
/// The engine never interprets the string beyond comparing it with the
/// blank sentinel; rendering is the client's business.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// The hex value of a blank cell.
    pub const WHITE_HEX: &'static str = "#FFFFFF";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The blank color every cell starts with.
    pub fn white() -> Self {
        Self(Self::WHITE_HEX.to_string())
    }

    pub fn is_white(&self) -> bool {
        self.0.eq_ignore_ascii_case(Self::WHITE_HEX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::white()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One cell of a drawing stroke.
///
/// `x` indexes rows and `y` indexes columns. Coordinates are signed so a
/// client sending `-1` gets an out-of-bounds error from the engine rather
/// than a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pixel {
    pub x: i64,
    pub y: i64,
    pub color: Color,
}

impl Pixel {
    pub fn new(x: i64, y: i64, color: Color) -> Self {
        Self { x, y, color }
    }
}

// ---------------------------------------------------------------------------
// Game vocabulary
// ---------------------------------------------------------------------------

/// Selects which word pool feeds word selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    #[serde(rename = "No difficulty")]
    NoDifficulty,
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDifficulty => write!(f, "No difficulty"),
            Self::Easy => write!(f, "Easy"),
            Self::Medium => write!(f, "Medium"),
            Self::Hard => write!(f, "Hard"),
        }
    }
}

/// One of the two fixed teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamLetter {
    A,
    B,
}

impl TeamLetter {
    /// The opposing team.
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for TeamLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// The lifecycle status of one game instance.
///
/// ```text
/// WaitingForPlayers → WaitingToStart → InProgress → Over
///        ↑                  │               │
///        └──── a player leaves a non-full game
/// ```
///
/// A player leaving while both teams are full forfeits the game for their
/// team, which jumps straight to `Over`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[default]
    WaitingForPlayers,
    WaitingToStart,
    InProgress,
    Over,
}

impl GameStatus {
    /// Returns `true` while rounds are being played.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, Self::Over)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WaitingForPlayers => write!(f, "WAITING_FOR_PLAYERS"),
            Self::WaitingToStart => write!(f, "WAITING_TO_START"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Over => write!(f, "OVER"),
        }
    }
}

/// Outcome of a finished game: a team letter, or a tie.
///
/// Serialized as `"A"`, `"B"` or `"TIE"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    #[serde(rename = "A")]
    TeamA,
    #[serde(rename = "B")]
    TeamB,
    #[serde(rename = "TIE")]
    Tie,
}

impl Winner {
    /// The winning team, or `None` for a tie.
    pub fn team(&self) -> Option<TeamLetter> {
        match self {
            Self::TeamA => Some(TeamLetter::A),
            Self::TeamB => Some(TeamLetter::B),
            Self::Tie => None,
        }
    }
}

impl From<TeamLetter> for Winner {
    fn from(letter: TeamLetter) -> Self {
        match letter {
            TeamLetter::A => Self::TeamA,
            TeamLetter::B => Self::TeamB,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TeamA => write!(f, "A"),
            Self::TeamB => write!(f, "B"),
            Self::Tie => write!(f, "TIE"),
        }
    }
}

/// A guess submitted by the guesser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictionaryMove {
    pub guess: String,
}

impl PictionaryMove {
    pub fn new(guess: impl Into<String>) -> Self {
        Self { guess: guess.into() }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// A command a player sends to a Pictionary area.
///
/// `#[serde(tag = "type")]` gives the internally tagged form clients emit:
/// `{ "type": "DrawCommand", "drawing": [...] }`. Any tag this area does not
/// understand decodes to [`AreaCommand::Unsupported`] so the dispatcher can
/// reject it with a typed error instead of a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AreaCommand {
    /// Join the current game, creating a new one if none is running.
    JoinGame,

    /// Begin round 1 with the given word difficulty.
    StartGame { difficulty: Difficulty },

    /// Submit a guess for the current word.
    GameMove {
        game_id: GameInstanceId,
        #[serde(rename = "move")]
        game_move: PictionaryMove,
    },

    /// Leave the current game.
    LeaveGame { game_id: GameInstanceId },

    /// Advance the round clock by one second.
    Tick,

    /// Paint pixels (drawer only).
    DrawCommand { drawing: Vec<Pixel> },

    /// Blank out pixels (drawer only).
    EraseCommand { drawing: Vec<Pixel> },

    /// Blank the whole board (drawer only).
    ResetCommand,

    /// Any command type addressed to another kind of area.
    #[serde(other)]
    Unsupported,
}

impl AreaCommand {
    /// Short name of the command, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::JoinGame => "JoinGame",
            Self::StartGame { .. } => "StartGame",
            Self::GameMove { .. } => "GameMove",
            Self::LeaveGame { .. } => "LeaveGame",
            Self::Tick => "Tick",
            Self::DrawCommand { .. } => "DrawCommand",
            Self::EraseCommand { .. } => "EraseCommand",
            Self::ResetCommand => "ResetCommand",
            Self::Unsupported => "Unsupported",
        }
    }
}

/// Successful result of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommandResponse {
    /// The player is in the game with this id (possibly a brand-new one).
    Joined { game_id: GameInstanceId },
    /// The command was applied.
    Ack,
}
