//! Platform abstraction layer
//!
//! The simulation never draws or touches the DOM itself. It talks to two
//! collaborators:
//! - `Surface`: 2D drawing (background, sprites)
//! - `Hud`: one-time screen scaffolding and the score text
//!
//! `headless` backs native runs and tests; `web` drives a browser canvas.

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::settings::BackgroundKey;
use crate::sim::bounds::Aabb;
use crate::sim::obstacle::ObstacleKind;

/// Mounts at least this wide (CSS pixels) get a mobile-only notice instead of the game screen
pub const MOBILE_MAX_WIDTH: i32 = 1024;

/// What the in-game screen shows for a given mount width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameScreenLayout {
    ScoreBar,
    MobileOnly,
}

impl GameScreenLayout {
    pub fn for_width(width: i32) -> Self {
        if width < MOBILE_MAX_WIDTH {
            GameScreenLayout::ScoreBar
        } else {
            GameScreenLayout::MobileOnly
        }
    }
}

/// Everything the core asks a surface to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Player,
    Obstacle(ObstacleKind),
    Life,
}

/// A 2D drawing target sized to the playfield
pub trait Surface {
    fn clear(&mut self);
    fn draw_background(&mut self, key: BackgroundKey);
    fn draw_sprite(&mut self, sprite: Sprite, bounds: Aabb);
}

/// Screen scaffolding and score text
pub trait Hud {
    /// Build the in-game screen (score bar + canvas mount)
    fn build_game_screen(&mut self);
    /// Build the title screen
    fn build_menu(&mut self, highscore: u64, player_name: Option<&str>);
    /// Build the end-of-run screen
    fn build_game_over(&mut self, score: u64, highscore: u64);
    /// Refresh the score readout
    fn set_score(&mut self, score: u64, highscore: u64);
}
