//! Change notification.

use std::collections::HashMap;

use pictionary_protocol::PlayerId;
use tokio::sync::mpsc;
use tracing::debug;

use crate::AreaSnapshot;

/// Receives the area's state after every successful change.
///
/// Called exactly once per accepted command and never for a rejected one.
/// Takes `&mut self` so an observer can drop listeners that went away.
pub trait AreaObserver: Send + 'static {
    fn area_changed(&mut self, snapshot: &AreaSnapshot);
}

/// Ignores every change.
impl AreaObserver for () {
    fn area_changed(&mut self, _snapshot: &AreaSnapshot) {}
}

/// Forwards the unredacted snapshot. A closed receiver is ignored.
impl AreaObserver for mpsc::UnboundedSender<AreaSnapshot> {
    fn area_changed(&mut self, snapshot: &AreaSnapshot) {
        let _ = self.send(snapshot.clone());
    }
}

/// Channel sender delivering snapshots to one player.
pub type SnapshotSender = mpsc::UnboundedSender<AreaSnapshot>;

/// Per-player fan-out. Each subscriber gets the snapshot redacted for them.
///
/// A subscriber whose receiver has been dropped is removed on the next
/// change, so a player who disconnects without exiting does not linger.
#[derive(Debug, Default)]
pub struct Subscribers {
    senders: HashMap<PlayerId, SnapshotSender>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `sender` for `player`, replacing any earlier one.
    pub fn insert(&mut self, player: PlayerId, sender: SnapshotSender) {
        self.senders.insert(player, sender);
    }

    pub fn remove(&mut self, player: PlayerId) -> bool {
        self.senders.remove(&player).is_some()
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}

impl AreaObserver for Subscribers {
    fn area_changed(&mut self, snapshot: &AreaSnapshot) {
        self.senders.retain(|player, sender| {
            let open = sender.send(snapshot.redacted_for(*player)).is_ok();
            if !open {
                debug!(area_id = %snapshot.id, %player, "subscriber gone, removing");
            }
            open
        });
    }
}
