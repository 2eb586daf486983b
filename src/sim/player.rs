//! The player's garbage can
//!
//! Owns position and lives, and is the only place collisions are resolved:
//! the registry stays a plain container while life bookkeeping lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Aabb;
use super::registry::ObstacleRegistry;
use super::session::SessionState;
use crate::consts::*;

/// What the avatar ran into this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionOutcome {
    #[default]
    None,
    /// A bomb was hit and a life spent
    Hazard,
    /// Garbage was caught, nothing dangerous touched
    Benign,
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    lives: u8,
    starting_lives: u8,
    playfield: Vec2,
}

impl Player {
    pub fn new(playfield: Vec2, starting_lives: u8) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            pos: Self::home_position(playfield, size),
            size,
            lives: starting_lives,
            starting_lives,
            playfield,
        }
    }

    /// Bottom-centre of the playfield
    fn home_position(playfield: Vec2, size: Vec2) -> Vec2 {
        Vec2::new(
            (playfield.x - size.x) * 0.5,
            playfield.y - size.y - PLAYER_BOTTOM_MARGIN,
        )
    }

    #[inline]
    pub fn lives(&self) -> u8 {
        self.lives
    }

    #[inline]
    pub fn hitbox(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x * 0.5
    }

    /// Re-anchor to the bottom of a resized playfield, keeping x in range
    pub fn set_playfield(&mut self, playfield: Vec2) {
        self.playfield = playfield;
        self.pos.y = Self::home_position(playfield, self.size).y;
        self.pos.x = self.pos.x.clamp(0.0, (playfield.x - self.size.x).max(0.0));
    }

    /// Slide horizontally so the centre approaches `target_x`
    pub fn move_toward(&mut self, target_x: f32, dt: f32, max_speed: f32) {
        let delta = target_x - self.center_x();
        let max_delta = max_speed * dt.max(0.0);
        let step = delta.clamp(-max_delta, max_delta);
        let max_x = (self.playfield.x - self.size.x).max(0.0);
        self.pos.x = (self.pos.x + step).clamp(0.0, max_x);
    }

    /// Test the hitbox against every live obstacle.
    ///
    /// Overlapping garbage is removed and scored. If any bomb overlaps, the
    /// first one is removed, one life is spent and the outcome is `Hazard`
    /// regardless of what else was caught.
    pub fn check_collision(
        &mut self,
        registry: &mut ObstacleRegistry,
        session: &mut SessionState,
    ) -> CollisionOutcome {
        let hitbox = self.hitbox();
        let hits: Vec<_> = registry
            .obstacles()
            .iter()
            .filter(|o| o.bounds().overlaps(&hitbox))
            .map(|o| (o.id, o.kind))
            .collect();

        let mut outcome = CollisionOutcome::None;
        let mut bomb = None;
        for (id, kind) in hits {
            if kind.is_hazard() {
                bomb.get_or_insert(id);
                continue;
            }
            if registry.remove(id).is_some() {
                session.add_points(kind.points());
                outcome = CollisionOutcome::Benign;
            }
        }

        if let Some(id) = bomb {
            registry.remove(id);
            self.lives = self.lives.saturating_sub(1);
            log::info!("Bomb hit, {} lives left", self.lives);
            return CollisionOutcome::Hazard;
        }
        outcome
    }

    /// Restore lives and home position for a new run
    pub fn reset(&mut self) {
        self.lives = self.starting_lives;
        self.pos = Self::home_position(self.playfield, self.size);
    }
}
