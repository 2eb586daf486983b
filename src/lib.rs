//! Garbage Catch - catch the falling garbage, dodge the bombs
//!
//! Core modules:
//! - `sim`: Simulation core (obstacles, avatar, collisions, session, frame loop)
//! - `platform`: Rendering/HUD collaborators (headless and browser)
//! - `persistence`: Key/value storage (LocalStorage on web)
//! - `highscore`: High score load/save on top of storage
//! - `settings`: Persisted player preferences

pub mod highscore;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{BackgroundKey, DifficultyPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest simulated step per frame (seconds), regardless of wall-clock gap
    pub const MAX_STEP_SECS: f32 = 0.1;

    /// Lives at the start of every run
    pub const STARTING_LIVES: u8 = 3;

    /// Avatar (garbage can) dimensions
    pub const PLAYER_WIDTH: f32 = 72.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;
    /// Gap between the avatar and the bottom edge of the playfield
    pub const PLAYER_BOTTOM_MARGIN: f32 = 16.0;
    /// Horizontal steering speed (pixels/s)
    pub const PLAYER_MAX_SPEED: f32 = 900.0;

    /// Obstacle dimensions (all kinds share one square hitbox)
    pub const OBSTACLE_SIZE: f32 = 40.0;
    /// Fall speed at score 0 (pixels/s)
    pub const BASE_FALL_SPEED: f32 = 180.0;
    /// Extra fall speed per point of difficulty score
    pub const FALL_SPEED_PER_POINT: f32 = 0.25;
    /// Fall speed cap
    pub const MAX_FALL_SPEED: f32 = 720.0;

    /// Spawn chance per eligible `create` call at score 0
    pub const BASE_SPAWN_CHANCE: f32 = 0.02;
    /// Extra spawn chance per point of difficulty score
    pub const SPAWN_CHANCE_PER_POINT: f32 = 0.0002;
    /// Spawn chance cap
    pub const MAX_SPAWN_CHANCE: f32 = 0.5;
    /// Calls that must pass after a spawn before the next one (score 0)
    pub const BASE_SPAWN_COOLDOWN: u32 = 30;
    /// Floor for the spawn cooldown at high difficulty
    pub const MIN_SPAWN_COOLDOWN: u32 = 6;
    /// Difficulty points that shave one call off the cooldown
    pub const POINTS_PER_COOLDOWN_STEP: u64 = 100;
    /// Hard cap on simultaneously live obstacles
    pub const MAX_OBSTACLES: usize = 256;
    /// Share of spawns that are bombs
    pub const BOMB_RATIO: f32 = 0.25;

    /// Life indicator icon size and spacing
    pub const LIFE_ICON_SIZE: f32 = 24.0;
    pub const LIFE_ICON_GAP: f32 = 8.0;
    pub const LIFE_ICON_MARGIN: f32 = 12.0;

    /// Playfield used before the host reports a real size
    pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 480.0;
    pub const DEFAULT_PLAYFIELD_HEIGHT: f32 = 800.0;
}

/// Default playfield size as a vector
#[inline]
pub fn default_playfield() -> Vec2 {
    Vec2::new(consts::DEFAULT_PLAYFIELD_WIDTH, consts::DEFAULT_PLAYFIELD_HEIGHT)
}

/// Clamp a raw frame gap (seconds) to a usable simulation step.
///
/// Negative or non-finite gaps become zero; anything above
/// [`consts::MAX_STEP_SECS`] is capped.
#[inline]
pub fn clamp_step(elapsed: f32) -> f32 {
    if !elapsed.is_finite() || elapsed <= 0.0 {
        return 0.0;
    }
    elapsed.min(consts::MAX_STEP_SECS)
}
