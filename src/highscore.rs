//! High score persistence
//!
//! A single counter stored as a base-10 string. The stored value only ever
//! moves to `max(score, stored)`, so saving twice is harmless.

use crate::persistence::{HIGHSCORE_KEY, KeyValueStore, PLAYER_NAME_KEY};

/// Parse a stored high score; malformed or missing values read as 0
pub fn parse_highscore(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(0)
}

/// Read the persisted high score
pub fn load_highscore(store: &dyn KeyValueStore) -> u64 {
    parse_highscore(store.get(HIGHSCORE_KEY).as_deref())
}

/// Persist `max(score, highscore)` and return it
pub fn save_highscore(store: &mut dyn KeyValueStore, score: u64, highscore: u64) -> u64 {
    let best = score.max(highscore);
    store.set(HIGHSCORE_KEY, &best.to_string());
    log::info!("High score saved ({})", best);
    best
}

/// Read the optional player name (empty names read as absent)
pub fn load_player_name(store: &dyn KeyValueStore) -> Option<String> {
    store.get(PLAYER_NAME_KEY).filter(|name| !name.is_empty())
}
