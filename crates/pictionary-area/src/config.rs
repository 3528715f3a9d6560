//! Area configuration.

use std::time::Duration;

use pictionary_game::GameConfig;

/// Settings for one hosted area.
#[derive(Debug, Clone)]
pub struct AreaConfig {
    /// Capacity of the actor's request channel. Senders wait when it is full.
    pub channel_size: usize,

    /// How often the actor's round clock fires. `None` disables the
    /// built-in clock; the host must then call `AreaHandle::tick` itself.
    pub tick_period: Option<Duration>,

    /// Upper bound of the random delay added to the first clock deadline,
    /// so areas created together do not tick in lockstep.
    pub clock_jitter: Duration,

    /// Configuration handed to every game the area creates.
    pub game: GameConfig,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            channel_size: 64,
            tick_period: Some(Duration::from_secs(1)),
            clock_jitter: Duration::from_millis(2),
            game: GameConfig::default(),
        }
    }
}

impl AreaConfig {
    /// A config with no built-in clock.
    pub fn manual_clock() -> Self {
        Self {
            tick_period: None,
            ..Self::default()
        }
    }
}
