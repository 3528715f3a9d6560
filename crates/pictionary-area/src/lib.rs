//! Hosting for Pictionary games.
//!
//! A [`PictionaryArea`] is the command dispatcher: it owns the current game,
//! authorizes each command against the issuing player, and tells an
//! [`AreaObserver`] about every change. [`spawn_area`] runs an area inside
//! its own Tokio task so that commands on it are handled one at a time, and
//! drives the round clock once per second while a round is in progress.

mod actor;
mod area;
mod clock;
mod config;
mod error;
mod model;
mod observer;

pub use actor::{AreaHandle, spawn_area};
pub use area::PictionaryArea;
pub use clock::RoundClock;
pub use config::AreaConfig;
pub use error::AreaError;
pub use model::{AreaSnapshot, GameInstance, GameResult, Player};
pub use observer::{AreaObserver, SnapshotSender, Subscribers};
