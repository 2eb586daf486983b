//! Headless collaborators
//!
//! Record what the frame loop asked for instead of drawing it. Used by the
//! native demo and by tests.

use super::{Hud, Sprite, Surface};
use crate::settings::BackgroundKey;
use crate::sim::bounds::Aabb;

/// Surface that keeps the most recent frame's draw list
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    /// Number of `clear` calls (one per rendered frame)
    pub frames: u64,
    pub background: Option<BackgroundKey>,
    /// Sprites drawn since the last clear
    pub sprites: Vec<(Sprite, Aabb)>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many sprites matching `pred` were drawn this frame
    pub fn count(&self, pred: impl Fn(&Sprite) -> bool) -> usize {
        self.sprites.iter().filter(|(s, _)| pred(s)).count()
    }
}

impl Surface for HeadlessSurface {
    fn clear(&mut self) {
        self.frames += 1;
        self.background = None;
        self.sprites.clear();
    }

    fn draw_background(&mut self, key: BackgroundKey) {
        self.background = Some(key);
    }

    fn draw_sprite(&mut self, sprite: Sprite, bounds: Aabb) {
        self.sprites.push((sprite, bounds));
    }
}

/// HUD that counts screen builds and remembers the last score text
#[derive(Debug, Default)]
pub struct HeadlessHud {
    pub game_screen_builds: u32,
    pub menu_builds: u32,
    pub game_over_builds: u32,
    pub score_text: String,
    pub highscore_text: String,
}

impl HeadlessHud {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Hud for HeadlessHud {
    fn build_game_screen(&mut self) {
        self.game_screen_builds += 1;
    }

    fn build_menu(&mut self, _highscore: u64, _player_name: Option<&str>) {
        self.menu_builds += 1;
    }

    fn build_game_over(&mut self, _score: u64, _highscore: u64) {
        self.game_over_builds += 1;
    }

    fn set_score(&mut self, score: u64, highscore: u64) {
        self.score_text = format!("Score: {}", score);
        self.highscore_text = format!("High Score: {}", highscore);
    }
}
