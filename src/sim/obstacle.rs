//! Falling objects and their kinds

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Aabb;
use crate::consts::OBSTACLE_SIZE;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Costs a life on contact
    Bomb,
    Bottle,
    Can,
    BananaPeel,
}

impl ObstacleKind {
    /// Benign kinds, in spawn-table order
    pub const GARBAGE: [ObstacleKind; 3] = [
        ObstacleKind::Bottle,
        ObstacleKind::Can,
        ObstacleKind::BananaPeel,
    ];

    /// Returns true if catching this obstacle costs a life
    #[inline]
    pub fn is_hazard(&self) -> bool {
        matches!(self, ObstacleKind::Bomb)
    }

    /// Score awarded for catching (0 for hazards)
    pub fn points(&self) -> u64 {
        match self {
            ObstacleKind::Bomb => 0,
            ObstacleKind::Bottle => 15,
            ObstacleKind::Can => 10,
            ObstacleKind::BananaPeel => 5,
        }
    }
}

/// A falling object owned by the obstacle registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            vel,
            size: Vec2::splat(OBSTACLE_SIZE),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Advance by `vel * dt`
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}
