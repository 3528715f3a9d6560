//! Area actor: one Tokio task per area.
//!
//! The task owns the [`PictionaryArea`] outright and processes one request
//! at a time from a bounded channel, so commands on an area never
//! interleave. The round clock runs in the same loop.
//!
//! # Talking to the actor
//!
//! Callers hold an [`AreaHandle`]. Each method wraps its arguments in a
//! request, sends it down the channel, and (for most requests) waits on a
//! `oneshot` reply channel for the result. The actor is the only writer
//! of area state, so no locks are involved anywhere.
//!
//! ```ignore
//! let handle = spawn_area(AreaId(1), AreaConfig::default(), Dictionary);
//! handle.command(player, AreaCommand::JoinGame).await?;
//! let snapshot = handle.snapshot().await?;
//! ```
//!
//! # The loop
//!
//! The actor selects between two sources: the request channel and the
//! [`RoundClock`]. A beat only reaches the game while a round is running,
//! and it is handled between requests, never in the middle of one. A manual
//! clock never fires, which leaves ticking to whoever holds the handle.
//!
//! # Shutdown
//!
//! The actor stops on [`AreaHandle::shutdown`] or when every handle has
//! been dropped. After that each handle method returns
//! [`AreaError::Unavailable`].

use pictionary_game::{TickOutcome, WordSource};
use pictionary_protocol::{AreaCommand, AreaId, CommandResponse, PlayerId};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, trace};

use crate::{
    AreaConfig, AreaError, AreaSnapshot, PictionaryArea, Player, RoundClock, SnapshotSender,
    Subscribers,
};

/// Requests sent to an area actor. Most carry a reply channel.
enum AreaRequest {
    Enter {
        player: Player,
        reply: oneshot::Sender<bool>,
    },
    Exit {
        player_id: PlayerId,
        reply: oneshot::Sender<Result<bool, AreaError>>,
    },
    Command {
        player_id: PlayerId,
        command: AreaCommand,
        reply: oneshot::Sender<Result<CommandResponse, AreaError>>,
    },
    Tick {
        reply: oneshot::Sender<TickOutcome>,
    },
    Snapshot {
        reply: oneshot::Sender<AreaSnapshot>,
    },
    Subscribe {
        player_id: PlayerId,
        sender: SnapshotSender,
    },
    Shutdown,
}

/// Handle to a running area actor.
///
/// Cheap to clone. Every method fails with [`AreaError::Unavailable`]
/// once the actor has stopped.
#[derive(Debug, Clone)]
pub struct AreaHandle {
    area_id: AreaId,
    sender: mpsc::Sender<AreaRequest>,
}

impl AreaHandle {
    pub fn area_id(&self) -> AreaId {
        self.area_id
    }

    /// True once the actor has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Adds a player to the area. Returns `false` if they were already in it.
    pub async fn enter(&self, player: Player) -> Result<bool, AreaError> {
        self.request(|reply| AreaRequest::Enter { player, reply }).await
    }

    /// Removes a player from the area and from its game.
    pub async fn exit(&self, player_id: PlayerId) -> Result<bool, AreaError> {
        self.request(|reply| AreaRequest::Exit { player_id, reply })
            .await?
    }

    /// Dispatches a command on behalf of `player_id`.
    pub async fn command(
        &self,
        player_id: PlayerId,
        command: AreaCommand,
    ) -> Result<CommandResponse, AreaError> {
        self.request(|reply| AreaRequest::Command {
            player_id,
            command,
            reply,
        })
        .await?
    }

    /// Advances the running round by one second; `Idle` when nothing runs.
    pub async fn tick(&self) -> Result<TickOutcome, AreaError> {
        self.request(|reply| AreaRequest::Tick { reply }).await
    }

    /// The unredacted state of the area.
    pub async fn snapshot(&self) -> Result<AreaSnapshot, AreaError> {
        self.request(|reply| AreaRequest::Snapshot { reply }).await
    }

    /// Sends every future change to `sender`, redacted for `player_id`.
    pub async fn subscribe(
        &self,
        player_id: PlayerId,
        sender: SnapshotSender,
    ) -> Result<(), AreaError> {
        self.sender
            .send(AreaRequest::Subscribe { player_id, sender })
            .await
            .map_err(|_| AreaError::Unavailable(self.area_id))
    }

    /// Stops the actor. Requests already queued are dropped.
    pub async fn shutdown(&self) -> Result<(), AreaError> {
        self.sender
            .send(AreaRequest::Shutdown)
            .await
            .map_err(|_| AreaError::Unavailable(self.area_id))
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> AreaRequest,
    ) -> Result<T, AreaError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(build(reply_tx))
            .await
            .map_err(|_| AreaError::Unavailable(self.area_id))?;
        reply_rx
            .await
            .map_err(|_| AreaError::Unavailable(self.area_id))
    }
}

struct AreaActor<W: WordSource + Clone> {
    area: PictionaryArea<W, Subscribers>,
    clock: RoundClock,
    receiver: mpsc::Receiver<AreaRequest>,
}

impl<W: WordSource + Clone> AreaActor<W> {
    async fn run(mut self) {
        let area_id = self.area.id();
        info!(%area_id, "area actor started");

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(request) => {
                        if !self.handle(request) {
                            break;
                        }
                    }
                    None => break,
                },
                beat = self.clock.wait() => self.on_beat(beat),
            }
        }

        info!(%area_id, "area actor stopped");
    }

    /// Handles one request. Returns `false` when the actor should stop.
    fn handle(&mut self, request: AreaRequest) -> bool {
        match request {
            AreaRequest::Enter { player, reply } => {
                let _ = reply.send(self.area.add_occupant(player));
            }
            AreaRequest::Exit { player_id, reply } => {
                self.area.observer_mut().remove(player_id);
                let _ = reply.send(self.area.remove_occupant(player_id));
            }
            AreaRequest::Command {
                player_id,
                command,
                reply,
            } => {
                let _ = reply.send(self.area.handle_command(command, player_id));
            }
            AreaRequest::Tick { reply } => {
                let _ = reply.send(self.area.tick());
            }
            AreaRequest::Snapshot { reply } => {
                let _ = reply.send(self.area.snapshot());
            }
            AreaRequest::Subscribe { player_id, sender } => {
                debug!(area_id = %self.area.id(), %player_id, "subscriber added");
                self.area.observer_mut().insert(player_id, sender);
            }
            AreaRequest::Shutdown => {
                info!(area_id = %self.area.id(), "area shutting down");
                return false;
            }
        }
        true
    }

    fn on_beat(&mut self, beat: u64) {
        if !self.area.is_round_active() {
            return;
        }
        let outcome = self.area.tick();
        trace!(area_id = %self.area.id(), beat, ?outcome, "round clock beat applied");
    }
}

/// Spawns an area actor and returns a handle to it.
///
/// `config.channel_size` bounds the request queue; senders wait when it is
/// full. With a `tick_period` the actor also drives the round clock itself.
pub fn spawn_area<W>(area_id: AreaId, config: AreaConfig, words: W) -> AreaHandle
where
    W: WordSource + Clone,
{
    let (tx, rx) = mpsc::channel(config.channel_size.max(1));

    let actor = AreaActor {
        area: PictionaryArea::with_parts(area_id, config.game, words, Subscribers::new()),
        clock: RoundClock::new(config.tick_period, config.clock_jitter),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    AreaHandle {
        area_id,
        sender: tx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pictionary_game::FixedWords;
    use pictionary_protocol::Difficulty;

    fn manual() -> AreaHandle {
        spawn_area(AreaId(3), AreaConfig::manual_clock(), FixedWords::new(["bell", "fork"]))
    }

    #[tokio::test]
    async fn test_enter_twice_is_a_no_op() {
        let handle = manual();
        let ada = Player::new(PlayerId(1), "ada");
        assert_eq!(handle.enter(ada.clone()).await, Ok(true));
        assert_eq!(handle.enter(ada).await, Ok(false));
        assert_eq!(handle.snapshot().await.unwrap().occupants.len(), 1);
    }

    #[tokio::test]
    async fn test_errors_come_back_through_the_handle() {
        let handle = manual();
        assert_eq!(
            handle
                .command(PlayerId(1), AreaCommand::StartGame { difficulty: Difficulty::Easy })
                .await,
            Err(AreaError::Game(pictionary_game::GameError::GameNotInProgress))
        );
    }

    #[tokio::test]
    async fn test_shutdown_makes_handle_unavailable() {
        let handle = manual();
        handle.shutdown().await.unwrap();
        assert_eq!(handle.snapshot().await, Err(AreaError::Unavailable(AreaId(3))));
        assert!(handle.is_closed());
    }
}
