//! Authoritative game state engine for team Pictionary.
//!
//! Four players form two teams of two. Each round one team draws and
//! guesses while the clock runs; the drawer's team scores when the guesser
//! names the secret word. After the last round the higher score wins.
//!
//! The engine is synchronous and knows nothing about who is calling. It
//! validates every operation before applying it, and identity checks such
//! as "only the drawer may draw" belong to the hosting area.
//!
//! # Key types
//!
//! - [`PictionaryGame`]: the state machine (join, leave, start, guess,
//!   tick, draw, erase, reset)
//! - [`PictionaryState`]: the observable state of one game
//! - [`Whiteboard`]: the shared drawing grid
//! - [`WordSource`]: where secret words come from
//! - [`Game`]: the capabilities any area-hosted game exposes

mod clock;
mod config;
mod error;
mod game;
mod guess;
mod logic;
mod teams;
mod whiteboard;
mod words;

pub use clock::TickOutcome;
pub use config::{BOARD_HEIGHT, BOARD_WIDTH, GameConfig, MAX_ROUNDS, ROUND_TIME_SECS};
pub use error::GameError;
pub use game::{PictionaryGame, PictionaryState};
pub use guess::GuessOutcome;
pub use logic::Game;
pub use teams::{TEAM_SIZE, Team, roles_for_round};
pub use whiteboard::Whiteboard;
pub use words::{Dictionary, FixedWords, WordSource};
