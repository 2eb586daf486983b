//! Session state: score, high score and the screen phase machine

use serde::{Deserialize, Serialize};

use crate::highscore::{load_highscore, load_player_name};
use crate::persistence::KeyValueStore;
use crate::settings::BackgroundKey;

/// Which screen the session is on. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen, waiting for the player to start
    Menu,
    /// Active gameplay
    Running,
    /// Run ended, showing the final score
    GameOver,
}

/// One-time construction latch for a screen's DOM/HUD scaffolding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScreenLatch {
    #[default]
    NotDrawn,
    Drawn,
}

impl ScreenLatch {
    /// Flip to `Drawn`. Returns true only on the first call since the last reset.
    #[inline]
    pub fn latch(&mut self) -> bool {
        let first = *self == ScreenLatch::NotDrawn;
        *self = ScreenLatch::Drawn;
        first
    }

    #[inline]
    pub fn is_drawn(&self) -> bool {
        *self == ScreenLatch::Drawn
    }
}

/// Latches for every screen the session can show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenLatches {
    pub game: ScreenLatch,
    pub menu: ScreenLatch,
    pub game_over: ScreenLatch,
}

/// Score bookkeeping and phase for the whole process lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Points in the current run
    pub score: u64,
    /// Best persisted score, refreshed from storage on every full reset
    pub highscore: u64,
    pub player_name: Option<String>,
    pub background: BackgroundKey,
    /// Score the most recent run ended with
    pub last_score: u64,
    phase: Phase,
    pub latches: ScreenLatches,
}

impl SessionState {
    /// Build the session, reading high score and player name from storage
    pub fn new(store: &dyn KeyValueStore, background: BackgroundKey) -> Self {
        Self {
            score: 0,
            highscore: load_highscore(store),
            player_name: load_player_name(store),
            background,
            last_score: 0,
            phase: Phase::Menu,
            latches: ScreenLatches::default(),
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Menu/GameOver -> Running. Returns false if a run is already going.
    pub fn start_run(&mut self) -> bool {
        if self.phase == Phase::Running {
            return false;
        }
        self.phase = Phase::Running;
        self.latches = ScreenLatches::default();
        log::info!("Run started");
        true
    }

    /// Running -> GameOver, remembering the final score for the end screen
    pub fn end_run(&mut self, final_score: u64) {
        self.last_score = final_score;
        self.phase = Phase::GameOver;
        self.latches.game_over = ScreenLatch::NotDrawn;
    }

    /// Back to the menu with every latch cleared. Score and high score are
    /// left alone; the caller clears those separately.
    pub fn reset(&mut self) {
        self.phase = Phase::Menu;
        self.latches = ScreenLatches::default();
    }

    /// Add caught points to the running score
    #[inline]
    pub fn add_points(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Re-read the high score after a save
    pub fn reload_highscore(&mut self, store: &dyn KeyValueStore) {
        self.highscore = load_highscore(store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{HIGHSCORE_KEY, MemoryStore, PLAYER_NAME_KEY};

    #[test]
    fn test_new_reads_storage() {
        let store = MemoryStore::with_values([(HIGHSCORE_KEY, "250"), (PLAYER_NAME_KEY, "kai")]);
        let session = SessionState::new(&store, BackgroundKey::Two);
        assert_eq!(session.score, 0);
        assert_eq!(session.highscore, 250);
        assert_eq!(session.player_name.as_deref(), Some("kai"));
        assert_eq!(session.background, BackgroundKey::Two);
        assert_eq!(session.phase(), Phase::Menu);
        assert_eq!(session.latches, ScreenLatches::default());
    }

    #[test]
    fn test_malformed_highscore_defaults() {
        let store = MemoryStore::with_values([(HIGHSCORE_KEY, "lots")]);
        let session = SessionState::new(&store, BackgroundKey::One);
        assert_eq!(session.highscore, 0);
        assert_eq!(session.player_name, None);
    }

    #[test]
    fn test_phase_transitions() {
        let mut session = SessionState::new(&MemoryStore::new(), BackgroundKey::One);
        assert!(session.start_run());
        assert!(!session.start_run());
        assert!(session.is_running());

        session.latches.game.latch();
        session.end_run(75);
        assert_eq!(session.phase(), Phase::GameOver);
        assert_eq!(session.last_score, 75);
        assert!(session.start_run());
        // Each run rebuilds its screen
        assert!(!session.latches.game.is_drawn());
    }

    #[test]
    fn test_reset_keeps_scores() {
        let mut session = SessionState::new(&MemoryStore::new(), BackgroundKey::One);
        session.start_run();
        session.add_points(40);
        session.highscore = 90;
        session.latches.game.latch();

        session.reset();
        assert_eq!(session.phase(), Phase::Menu);
        assert!(!session.latches.game.is_drawn());
        assert_eq!(session.score, 40);
        assert_eq!(session.highscore, 90);
    }

    #[test]
    fn test_latch_fires_once() {
        let mut latch = ScreenLatch::default();
        assert!(latch.latch());
        assert!(!latch.latch());
        assert!(latch.is_drawn());
    }
}
