//! Word selection: where secret words come from.
//!
//! The engine only needs "give me a word for this difficulty that has not
//! been played yet". [`WordSource`] is that seam; [`Dictionary`] is the
//! built-in random pool and [`FixedWords`] hands out a caller-supplied list
//! in order.

use std::collections::BTreeSet;

use pictionary_protocol::Difficulty;
use rand::seq::IndexedRandom;

const EASY_WORDS: &[&str] = &[
    "apple", "ball", "banana", "bed", "bird", "boat", "book", "bridge",
    "cake", "car", "cat", "chair", "cloud", "cookie", "cup", "dog", "door",
    "duck", "egg", "eye", "fish", "flower", "hat", "house", "ice cream",
    "key", "kite", "leaf", "moon", "mouse", "pizza", "rain", "shoe", "smile",
    "snake", "sock", "star", "sun", "tree", "train",
];

const MEDIUM_WORDS: &[&str] = &[
    "airplane", "astronaut", "backpack", "campfire", "castle", "dinosaur",
    "dragon", "elevator", "fireworks", "giraffe", "guitar", "hamburger",
    "helicopter", "igloo", "jellyfish", "ladder", "lighthouse", "mermaid",
    "microphone", "octopus", "parachute", "penguin", "pirate", "rainbow",
    "robot", "rollercoaster", "sandcastle", "scarecrow", "skateboard",
    "snowman", "spider web", "submarine", "sunflower", "telescope",
    "tornado", "treasure", "umbrella", "volcano", "waterfall", "windmill",
];

const HARD_WORDS: &[&str] = &[
    "archaeologist", "avalanche", "black hole", "blueprint", "camouflage",
    "constellation", "deja vu", "eclipse", "evolution", "gravity",
    "hibernation", "hieroglyphics", "hypnotize", "illusion", "inflation",
    "jet lag", "labyrinth", "migration", "nostalgia", "orbit", "paradox",
    "periscope", "photosynthesis", "procrastinate", "quarantine",
    "reflection", "renaissance", "sabotage", "silhouette", "stalemate",
    "stethoscope", "symphony", "telepathy", "thunderstorm", "tidal wave",
    "time machine", "tsunami", "vaccine", "ventriloquist", "wormhole",
];

/// Supplies secret words to a game.
///
/// `used` holds every word already played in the current game; an
/// implementation must never return one of them. `None` means the pool
/// for `difficulty` is exhausted.
pub trait WordSource: Send + 'static {
    fn choose_word(
        &mut self,
        difficulty: Difficulty,
        used: &BTreeSet<String>,
    ) -> Option<String>;
}

/// The built-in word pools, sampled uniformly at random.
///
/// `No difficulty` plays from the easy pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dictionary;

impl Dictionary {
    /// The full pool for a difficulty.
    pub fn words(difficulty: Difficulty) -> &'static [&'static str] {
        match difficulty {
            Difficulty::NoDifficulty | Difficulty::Easy => EASY_WORDS,
            Difficulty::Medium => MEDIUM_WORDS,
            Difficulty::Hard => HARD_WORDS,
        }
    }
}

impl WordSource for Dictionary {
    fn choose_word(
        &mut self,
        difficulty: Difficulty,
        used: &BTreeSet<String>,
    ) -> Option<String> {
        let fresh: Vec<&str> = Self::words(difficulty)
            .iter()
            .copied()
            .filter(|w| !used.contains(*w))
            .collect();
        fresh.choose(&mut rand::rng()).map(|w| w.to_string())
    }
}

/// A fixed list handed out front to back, whatever the difficulty.
///
/// Useful for custom word lists and for reproducible games.
#[derive(Debug, Clone, Default)]
pub struct FixedWords {
    words: Vec<String>,
}

impl FixedWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl WordSource for FixedWords {
    fn choose_word(
        &mut self,
        _difficulty: Difficulty,
        used: &BTreeSet<String>,
    ) -> Option<String> {
        self.words.iter().find(|w| !used.contains(*w)).cloned()
    }
}
