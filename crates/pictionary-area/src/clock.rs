//! Wall-clock driver for the round timer.
//!
//! The game counts seconds only when told to. [`RoundClock`] produces
//! those "one second passed" beats for an area actor and is meant to sit
//! in the actor's `tokio::select!` loop next to the request channel:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         request = receiver.recv() => { /* handle request */ }
//!         _ = clock.wait() => { area.tick(); }
//!     }
//! }
//! ```
//!
//! A clock without a period never fires, so the same loop works for areas
//! that are ticked by hand.

use std::time::Duration;

use rand::Rng;
use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

/// Fixed-period beat source. One per area actor.
#[derive(Debug)]
pub struct RoundClock {
    period: Option<Duration>,
    next: Option<Instant>,
    beats: u64,
}

impl RoundClock {
    /// A clock firing every `period`, with the first beat pushed back by a
    /// random amount below `jitter`. A zero period is treated as `None`.
    pub fn new(period: Option<Duration>, jitter: Duration) -> Self {
        let period = period.filter(|p| !p.is_zero());
        let next = period.map(|p| {
            let offset = if jitter.is_zero() {
                Duration::ZERO
            } else {
                let micros = u64::try_from(jitter.as_micros()).unwrap_or(u64::MAX);
                Duration::from_micros(rand::rng().random_range(0..micros.max(1)))
            };
            Instant::now() + p + offset
        });

        match period {
            Some(p) => debug!(period_ms = p.as_millis() as u64, "round clock created"),
            None => debug!("round clock created without a period; ticks are manual"),
        }

        Self {
            period,
            next,
            beats: 0,
        }
    }

    /// A clock that never fires.
    pub fn manual() -> Self {
        Self::new(None, Duration::ZERO)
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Beats fired so far.
    pub fn beats(&self) -> u64 {
        self.beats
    }

    /// Waits for the next beat and returns its number (starting at 1).
    ///
    /// Pends forever on a manual clock. After a stall the clock does not
    /// fire the missed beats in a burst; it resumes one period from now.
    pub async fn wait(&mut self) -> u64 {
        let (next, period) = match (self.next, self.period) {
            (Some(next), Some(period)) => (next, period),
            _ => std::future::pending::<(Instant, Duration)>().await,
        };

        time::sleep_until(next).await;

        let now = Instant::now();
        let late_by = now.saturating_duration_since(next);
        let missed = late_by.as_nanos() / period.as_nanos();
        if missed > 0 {
            warn!(
                beat = self.beats + 1,
                missed = missed as u64,
                late_ms = late_by.as_millis() as u64,
                "round clock fell behind, skipping missed beats"
            );
        }

        self.beats += 1;
        self.next = Some(now + period);
        trace!(beat = self.beats, "round clock beat");
        self.beats
    }
}
