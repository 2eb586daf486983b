//! Obstacle registry
//!
//! Owns every live obstacle. Spawns new ones at a score-scaled cadence,
//! advances them each frame and evicts anything that has left the playfield.
//! Difficulty follows the larger of the current score and the baseline pinned
//! by the last `reset`, so losing a life never drops the pace back to zero.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bounds::Aabb;
use super::obstacle::{Obstacle, ObstacleKind};
use crate::consts::*;
use crate::settings::DifficultyPreset;

/// Spawn chance per eligible call for a given difficulty score
pub fn spawn_chance(difficulty_score: u64, preset: DifficultyPreset) -> f32 {
    let raw = BASE_SPAWN_CHANCE + difficulty_score as f32 * SPAWN_CHANCE_PER_POINT;
    (raw * preset.spawn_multiplier()).min(MAX_SPAWN_CHANCE)
}

/// Calls to skip after a spawn for a given difficulty score
pub fn spawn_cooldown(difficulty_score: u64) -> u32 {
    let steps = (difficulty_score / POINTS_PER_COOLDOWN_STEP).min(u32::MAX as u64) as u32;
    BASE_SPAWN_COOLDOWN
        .saturating_sub(steps)
        .max(MIN_SPAWN_COOLDOWN)
}

/// Downward speed (pixels/s) for a given difficulty score
pub fn fall_speed(difficulty_score: u64, preset: DifficultyPreset) -> f32 {
    let raw = BASE_FALL_SPEED + difficulty_score as f32 * FALL_SPEED_PER_POINT;
    (raw * preset.speed_multiplier()).min(MAX_FALL_SPEED)
}

/// The set of live obstacles and the spawner that feeds it
#[derive(Debug, Clone)]
pub struct ObstacleRegistry {
    /// Live obstacles (ascending id)
    obstacles: Vec<Obstacle>,
    playfield: Aabb,
    rng: Pcg32,
    preset: DifficultyPreset,
    /// Difficulty floor pinned by the last reset
    baseline_score: u64,
    /// Calls left before spawning is allowed again
    cooldown: u32,
    next_id: u32,
}

impl ObstacleRegistry {
    /// Create an empty registry for a playfield of `size`
    pub fn new(seed: u64, size: Vec2, score: u64, preset: DifficultyPreset) -> Self {
        Self {
            obstacles: Vec::new(),
            playfield: Aabb::from_size(size),
            rng: Pcg32::seed_from_u64(seed),
            preset,
            baseline_score: score,
            cooldown: spawn_cooldown(score),
            next_id: 1,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn playfield(&self) -> Aabb {
        self.playfield
    }

    pub fn set_playfield(&mut self, size: Vec2) {
        self.playfield = Aabb::from_size(size);
    }

    /// Score that currently drives spawn rate and fall speed
    #[inline]
    pub fn difficulty_score(&self, current_score: u64) -> u64 {
        current_score.max(self.baseline_score)
    }

    /// Maybe spawn a new obstacle above the top edge.
    ///
    /// Safe to call every frame: a cooldown counts calls down after each spawn
    /// and the spawn itself is a weighted coin flip. Returns the new id.
    pub fn create(&mut self, current_score: u64) -> Option<u32> {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return None;
        }
        if self.obstacles.len() >= MAX_OBSTACLES {
            return None;
        }

        let difficulty = self.difficulty_score(current_score);
        if !self.rng.random_bool(spawn_chance(difficulty, self.preset) as f64) {
            return None;
        }

        let kind = if self.rng.random::<f32>() < BOMB_RATIO {
            ObstacleKind::Bomb
        } else {
            let idx = self.rng.random_range(0..ObstacleKind::GARBAGE.len());
            ObstacleKind::GARBAGE[idx]
        };

        // Bottom edge flush with the top of the playfield
        let max_x = (self.playfield.size().x - OBSTACLE_SIZE).max(0.0);
        let x = self.playfield.min.x + self.rng.random::<f32>() * max_x;
        let pos = Vec2::new(x, self.playfield.min.y - OBSTACLE_SIZE);
        let vel = Vec2::new(0.0, fall_speed(difficulty, self.preset));

        let id = self.insert(kind, pos, vel);
        self.cooldown = spawn_cooldown(difficulty);
        log::debug!("Spawned {:?} #{} (difficulty {})", kind, id, difficulty);
        Some(id)
    }

    /// Place an obstacle directly, bypassing cadence and difficulty
    pub fn insert(&mut self, kind: ObstacleKind, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle::new(id, kind, pos, vel));
        id
    }

    /// Advance every obstacle by `vel * dt`.
    ///
    /// Negative or non-finite `dt` is treated as zero; clamping large steps is
    /// the caller's job.
    pub fn update(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if dt == 0.0 {
            return;
        }
        for obstacle in &mut self.obstacles {
            obstacle.advance(dt);
        }
    }

    /// Remove every obstacle whose bounds lie entirely outside the playfield.
    /// Returns how many were removed.
    pub fn delete_off_screen(&mut self) -> usize {
        let field = self.playfield;
        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.bounds().fully_outside(&field));
        let removed = before - self.obstacles.len();
        if removed > 0 {
            log::debug!("Culled {} off-screen obstacles", removed);
        }
        removed
    }

    /// Remove one obstacle by id
    pub fn remove(&mut self, id: u32) -> Option<Obstacle> {
        let idx = self.obstacles.iter().position(|o| o.id == id)?;
        Some(self.obstacles.remove(idx))
    }

    /// Clear the field and pin the difficulty baseline to `current_score`
    pub fn reset(&mut self, current_score: u64) {
        self.obstacles.clear();
        self.baseline_score = current_score;
        self.cooldown = spawn_cooldown(current_score);
    }
}
