//! Frame loop
//!
//! The host calls [`Scheduler::frame`] once per display refresh with a
//! millisecond timestamp and re-arms its own callback afterwards. Each call
//! runs to completion: collision against last frame's positions first, then
//! movement, culling, score text, spawning and finally drawing.

use glam::Vec2;

use super::lives::LifeIndicator;
use super::player::{CollisionOutcome, Player};
use super::registry::ObstacleRegistry;
use super::session::{Phase, SessionState};
use crate::clamp_step;
use crate::consts::*;
use crate::highscore::save_highscore;
use crate::persistence::KeyValueStore;
use crate::platform::{Hud, Sprite, Surface};
use crate::settings::Settings;

/// Extra clearance the autopilot keeps from a bomb's edge
const AUTOPILOT_MARGIN: f32 = 12.0;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Target avatar centre x (from mouse/touch position)
    pub target_x: Option<f32>,
    /// Demo mode - the avatar steers itself
    pub autopilot: bool,
}

/// Whether the loop has a baseline timestamp yet
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopState {
    AwaitingFirstFrame,
    Running { previous_ms: f64 },
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// The simulation advanced (false on the first frame and outside a run)
    pub stepped: bool,
    pub collision: CollisionOutcome,
    pub lost_life: bool,
    pub game_over: bool,
}

/// External collaborators for one frame. Missing drawing targets are skipped.
pub struct Collaborators<'a> {
    pub store: &'a mut dyn KeyValueStore,
    pub surface: Option<&'a mut dyn Surface>,
    pub hud: Option<&'a mut dyn Hud>,
}

/// Owns the whole game and drives it one frame at a time
#[derive(Debug, Clone)]
pub struct Scheduler {
    pub session: SessionState,
    pub registry: ObstacleRegistry,
    pub player: Player,
    pub lives: LifeIndicator,
    state: LoopState,
}

impl Scheduler {
    pub fn new(store: &dyn KeyValueStore, settings: &Settings, playfield: Vec2, seed: u64) -> Self {
        let session = SessionState::new(store, settings.background);
        let registry = ObstacleRegistry::new(seed, playfield, session.score, settings.difficulty);
        Self {
            session,
            registry,
            player: Player::new(playfield, STARTING_LIVES),
            lives: LifeIndicator,
            state: LoopState::AwaitingFirstFrame,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Begin a run from the menu or game-over screen
    pub fn start(&mut self) -> bool {
        self.session.start_run()
    }

    /// Abandon the current run and go back to the title screen
    pub fn return_to_menu(&mut self) {
        self.session.reset();
        self.player.reset();
        self.registry.reset(self.session.score);
        self.session.score = 0;
    }

    /// Propagate a new playfield size (window resize / rotation)
    pub fn resize(&mut self, size: Vec2) {
        log::info!("Playfield resized to {}x{}", size.x, size.y);
        self.registry.set_playfield(size);
        self.player.set_playfield(size);
    }

    /// Run one frame at `timestamp_ms`.
    ///
    /// The very first call only records the timestamp.
    pub fn frame(
        &mut self,
        timestamp_ms: f64,
        input: &FrameInput,
        host: &mut Collaborators<'_>,
    ) -> FrameReport {
        let previous_ms = match self.state {
            LoopState::AwaitingFirstFrame => {
                self.state = LoopState::Running {
                    previous_ms: timestamp_ms,
                };
                return FrameReport::default();
            }
            LoopState::Running { previous_ms } => previous_ms,
        };

        let elapsed = ((timestamp_ms - previous_ms) / 1000.0) as f32;
        let dt = clamp_step(elapsed);

        let mut report = FrameReport::default();
        match self.session.phase() {
            Phase::Running => self.step(dt, input, host, &mut report),
            Phase::Menu => {
                if self.session.latches.menu.latch() {
                    if let Some(hud) = host.hud.as_deref_mut() {
                        hud.build_menu(self.session.highscore, self.session.player_name.as_deref());
                    }
                }
            }
            Phase::GameOver => {
                if self.session.latches.game_over.latch() {
                    if let Some(hud) = host.hud.as_deref_mut() {
                        hud.build_game_over(self.session.last_score, self.session.highscore);
                    }
                }
            }
        }

        if let Some(surface) = host.surface.as_deref_mut() {
            self.render(surface);
        }

        self.state = LoopState::Running {
            previous_ms: timestamp_ms,
        };
        report
    }

    /// One simulation step during a run
    fn step(
        &mut self,
        dt: f32,
        input: &FrameInput,
        host: &mut Collaborators<'_>,
        report: &mut FrameReport,
    ) {
        if self.session.latches.game.latch() {
            if let Some(hud) = host.hud.as_deref_mut() {
                hud.build_game_screen();
            }
        }

        // Collision uses positions from the end of the previous frame
        report.collision = self
            .player
            .check_collision(&mut self.registry, &mut self.session);
        if report.collision == CollisionOutcome::Hazard {
            report.lost_life = true;
            // Losing a life clears the field but keeps the difficulty
            self.registry.reset(self.session.score);
            if self.player.lives() == 0 {
                self.game_over(&mut *host.store);
                report.game_over = true;
            }
        }

        self.registry.update(dt);
        let target = if input.autopilot {
            autopilot_target(&self.player, &self.registry)
        } else {
            input.target_x
        };
        if let Some(target_x) = target {
            self.player.move_toward(target_x, dt, PLAYER_MAX_SPEED);
        }
        self.registry.delete_off_screen();

        if let Some(hud) = host.hud.as_deref_mut() {
            hud.set_score(self.session.score, self.session.highscore);
        }

        self.registry.create(self.session.score);
        report.stepped = true;
    }

    /// Persist the high score and reset everything for the next run
    fn game_over(&mut self, store: &mut dyn KeyValueStore) {
        let final_score = self.session.score;
        save_highscore(store, final_score, self.session.highscore);

        self.player.reset();
        self.registry.reset(final_score);
        self.session.score = 0;
        self.session.reload_highscore(store);
        self.session.end_run(final_score);

        log::info!(
            "Game over with {} points (high score {})",
            final_score,
            self.session.highscore
        );
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        surface.draw_background(self.session.background);
        surface.draw_sprite(Sprite::Player, self.player.hitbox());
        for obstacle in self.registry.obstacles() {
            surface.draw_sprite(Sprite::Obstacle(obstacle.kind), obstacle.bounds());
        }
        self.lives.draw(surface, self.player.lives());
    }
}

/// Where the autopilot wants the avatar centre to go.
///
/// Dodges the lowest bomb still above the can and lined up with it; with no
/// threat it chases the lowest piece of garbage.
pub fn autopilot_target(player: &Player, registry: &ObstacleRegistry) -> Option<f32> {
    let hitbox = player.hitbox();
    let center = player.center_x();
    let danger = (player.size.x + OBSTACLE_SIZE) * 0.5 + AUTOPILOT_MARGIN;
    let above = |y: f32| y <= hitbox.max.y;

    let threat = registry
        .obstacles()
        .iter()
        .filter(|o| o.kind.is_hazard() && above(o.bounds().max.y))
        .filter(|o| (o.bounds().center().x - center).abs() < danger)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(bomb) = threat {
        let field = registry.playfield();
        let bomb_x = bomb.bounds().center().x;
        let half = player.size.x * 0.5;
        let left = bomb_x - danger;
        let right = bomb_x + danger;
        let go_left = if left - half < field.min.x {
            false
        } else if right + half > field.max.x {
            true
        } else {
            center < bomb_x
        };
        return Some(if go_left { left } else { right });
    }

    registry
        .obstacles()
        .iter()
        .filter(|o| !o.kind.is_hazard() && above(o.bounds().max.y))
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|o| o.bounds().center().x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscore::load_highscore;
    use crate::persistence::{HIGHSCORE_KEY, MemoryStore};
    use crate::platform::headless::{HeadlessHud, HeadlessSurface};
    use crate::sim::obstacle::ObstacleKind;

    const FIELD: Vec2 = Vec2::new(480.0, 800.0);
    const FRAME_MS: f64 = 1000.0 / 60.0;

    struct Rig {
        scheduler: Scheduler,
        store: MemoryStore,
        surface: HeadlessSurface,
        hud: HeadlessHud,
    }

    impl Rig {
        fn new(store: MemoryStore) -> Self {
            let scheduler = Scheduler::new(&store, &Settings::default(), FIELD, 4242);
            Self {
                scheduler,
                store,
                surface: HeadlessSurface::new(),
                hud: HeadlessHud::new(),
            }
        }

        fn frame(&mut self, timestamp_ms: f64) -> FrameReport {
            self.frame_with(timestamp_ms, &FrameInput::default())
        }

        fn frame_with(&mut self, timestamp_ms: f64, input: &FrameInput) -> FrameReport {
            let mut host = Collaborators {
                store: &mut self.store,
                surface: Some(&mut self.surface),
                hud: Some(&mut self.hud),
            };
            self.scheduler.frame(timestamp_ms, input, &mut host)
        }

        fn drop_bomb_on_player(&mut self) {
            let pos = self.scheduler.player.pos;
            self.scheduler
                .registry
                .insert(ObstacleKind::Bomb, pos, Vec2::new(0.0, 100.0));
        }
    }

    #[test]
    fn test_first_frame_only_records_timestamp() {
        let mut rig = Rig::new(MemoryStore::new());
        rig.scheduler.start();
        rig.drop_bomb_on_player();
        let start = rig.scheduler.registry.obstacles()[0].pos;

        let report = rig.frame(1000.0);
        assert_eq!(report, FrameReport::default());
        assert_eq!(rig.scheduler.state(), LoopState::Running { previous_ms: 1000.0 });
        assert_eq!(rig.scheduler.player.lives(), STARTING_LIVES);
        assert_eq!(rig.scheduler.registry.obstacles()[0].pos, start);
        assert_eq!(rig.surface.frames, 0);
        assert_eq!(rig.hud.game_screen_builds, 0);
    }

    #[test]
    fn test_three_hazards_end_the_run_once() {
        let mut rig = Rig::new(MemoryStore::new());
        rig.scheduler.start();
        rig.frame(0.0);

        let mut t = 0.0;
        for expected_lives in [2u8, 1] {
            rig.drop_bomb_on_player();
            t += FRAME_MS;
            let report = rig.frame(t);
            assert_eq!(report.collision, CollisionOutcome::Hazard);
            assert!(report.lost_life);
            assert!(!report.game_over);
            assert_eq!(rig.scheduler.player.lives(), expected_lives);
            assert_eq!(rig.store.writes(), 0);
        }

        rig.drop_bomb_on_player();
        t += FRAME_MS;
        let report = rig.frame(t);
        assert!(report.game_over);
        assert_eq!(rig.store.writes(), 1);
        assert_eq!(rig.scheduler.session.score, 0);
        assert!(rig.scheduler.registry.is_empty());
        assert_eq!(rig.scheduler.player.lives(), STARTING_LIVES);
        assert_eq!(rig.scheduler.session.phase(), Phase::GameOver);

        // Game-over screen is built once, nothing else is saved
        for _ in 0..5 {
            t += FRAME_MS;
            assert!(!rig.frame(t).stepped);
        }
        assert_eq!(rig.hud.game_over_builds, 1);
        assert_eq!(rig.store.writes(), 1);
    }

    #[test]
    fn test_game_over_persists_best_score() {
        let mut rig = Rig::new(MemoryStore::with_values([(HIGHSCORE_KEY, "100")]));
        assert_eq!(rig.scheduler.session.highscore, 100);
        rig.scheduler.start();
        rig.frame(0.0);
        rig.scheduler.session.score = 340;

        let mut t = 0.0;
        for _ in 0..STARTING_LIVES {
            rig.drop_bomb_on_player();
            t += FRAME_MS;
            rig.frame(t);
        }
        assert_eq!(load_highscore(&rig.store), 340);
        assert_eq!(rig.scheduler.session.highscore, 340);
        assert_eq!(rig.scheduler.session.last_score, 340);
        // Difficulty stays pinned to the score the run ended on
        assert_eq!(rig.scheduler.registry.difficulty_score(0), 340);
    }

    #[test]
    fn test_life_loss_clears_field_but_keeps_score() {
        let mut rig = Rig::new(MemoryStore::new());
        rig.scheduler.start();
        rig.frame(0.0);
        rig.scheduler.session.score = 500;
        rig.scheduler
            .registry
            .insert(ObstacleKind::Can, Vec2::new(0.0, 100.0), Vec2::ZERO);
        rig.drop_bomb_on_player();

        rig.frame(FRAME_MS);
        assert!(rig.scheduler.registry.is_empty());
        assert_eq!(rig.scheduler.session.score, 500);
        assert_eq!(rig.scheduler.registry.difficulty_score(0), 500);
    }

    #[test]
    fn test_step_is_clamped() {
        let mut rig = Rig::new(MemoryStore::new());
        rig.scheduler.start();
        rig.frame(0.0);
        rig.scheduler
            .registry
            .insert(ObstacleKind::Can, Vec2::new(0.0, 100.0), Vec2::new(0.0, 100.0));

        // Five seconds in the background still moves only one max step
        rig.frame(5000.0);
        let y = rig.scheduler.registry.obstacles()[0].pos.y;
        assert!((y - (100.0 + 100.0 * MAX_STEP_SECS)).abs() < 1e-3);

        // A clock that runs backwards moves nothing
        rig.frame(4000.0);
        let y2 = rig.scheduler.registry.obstacles()[0].pos.y;
        assert_eq!(y, y2);
    }

    #[test]
    fn test_collision_precedes_movement() {
        let mut rig = Rig::new(MemoryStore::new());
        rig.scheduler.start();
        rig.frame(0.0);
        // Bomb just above the can, falling fast enough to reach it this frame
        let hitbox = rig.scheduler.player.hitbox();
        rig.scheduler.registry.insert(
            ObstacleKind::Bomb,
            Vec2::new(hitbox.min.x, hitbox.min.y - OBSTACLE_SIZE - 5.0),
            Vec2::new(0.0, 300.0),
        );

        let report = rig.frame(100.0);
        assert_eq!(report.collision, CollisionOutcome::None);
        assert_eq!(rig.scheduler.player.lives(), STARTING_LIVES);

        let report = rig.frame(200.0);
        assert_eq!(report.collision, CollisionOutcome::Hazard);
    }

    #[test]
    fn test_screens_and_score_text() {
        let mut rig = Rig::new(MemoryStore::new());
        rig.frame(0.0);
        rig.frame(FRAME_MS);
        rig.frame(2.0 * FRAME_MS);
        assert_eq!(rig.hud.menu_builds, 1);
        assert_eq!(rig.hud.game_screen_builds, 0);

        rig.scheduler.start();
        rig.scheduler
            .registry
            .insert(ObstacleKind::Bottle, rig.scheduler.player.pos, Vec2::ZERO);
        let report = rig.frame(3.0 * FRAME_MS);
        rig.frame(4.0 * FRAME_MS);
        assert_eq!(report.collision, CollisionOutcome::Benign);
        assert_eq!(rig.hud.game_screen_builds, 1);
        assert_eq!(rig.hud.score_text, "Score: 15");
        assert_eq!(rig.hud.highscore_text, "High Score: 0");
    }

    #[test]
    fn test_render_draws_every_entity() {
        let mut rig = Rig::new(MemoryStore::new());
        rig.scheduler.start();
        rig.frame(0.0);
        rig.scheduler
            .registry
            .insert(ObstacleKind::Can, Vec2::new(0.0, 100.0), Vec2::ZERO);
        rig.frame(FRAME_MS);

        assert_eq!(rig.surface.frames, 1);
        assert!(rig.surface.background.is_some());
        assert_eq!(rig.surface.count(|s| *s == Sprite::Player), 1);
        assert_eq!(rig.surface.count(|s| matches!(s, Sprite::Obstacle(_))), 1);
        assert_eq!(rig.surface.count(|s| *s == Sprite::Life), STARTING_LIVES as usize);
    }

    #[test]
    fn test_missing_surface_and_hud_are_skipped() {
        let mut store = MemoryStore::new();
        let mut scheduler = Scheduler::new(&store, &Settings::default(), FIELD, 1);
        scheduler.start();
        let mut host = Collaborators {
            store: &mut store,
            surface: None,
            hud: None,
        };
        scheduler.frame(0.0, &FrameInput::default(), &mut host);
        let report = scheduler.frame(FRAME_MS, &FrameInput::default(), &mut host);
        assert!(report.stepped);
        assert!(scheduler.session.latches.game.is_drawn());
    }

    #[test]
    fn test_steering_and_autopilot() {
        let mut rig = Rig::new(MemoryStore::new());
        rig.scheduler.start();
        rig.frame(0.0);

        let input = FrameInput {
            target_x: Some(0.0),
            autopilot: false,
        };
        for i in 1..30 {
            rig.frame_with(i as f64 * FRAME_MS, &input);
        }
        assert_eq!(rig.scheduler.player.pos.x, 0.0);

        // Bomb lined up over the can: autopilot moves away from it
        let center = rig.scheduler.player.center_x();
        rig.scheduler.registry.reset(0);
        rig.scheduler
            .registry
            .insert(ObstacleKind::Bomb, Vec2::new(center - 20.0, 200.0), Vec2::ZERO);
        let target = autopilot_target(&rig.scheduler.player, &rig.scheduler.registry);
        assert!(target.is_some_and(|x| x > center));

        // No threat: chase garbage
        rig.scheduler.registry.reset(0);
        rig.scheduler
            .registry
            .insert(ObstacleKind::Can, Vec2::new(300.0, 200.0), Vec2::ZERO);
        let target = autopilot_target(&rig.scheduler.player, &rig.scheduler.registry);
        assert_eq!(target, Some(320.0));
    }

    #[test]
    fn test_return_to_menu() {
        let mut rig = Rig::new(MemoryStore::new());
        rig.scheduler.start();
        rig.frame(0.0);
        rig.frame(FRAME_MS);
        rig.scheduler.session.score = 80;
        rig.drop_bomb_on_player();
        rig.frame(2.0 * FRAME_MS);
        assert_eq!(rig.scheduler.player.lives(), STARTING_LIVES - 1);

        rig.scheduler.return_to_menu();
        assert_eq!(rig.scheduler.session.phase(), Phase::Menu);
        assert_eq!(rig.scheduler.session.score, 0);
        assert_eq!(rig.scheduler.player.lives(), STARTING_LIVES);
        assert!(rig.scheduler.registry.is_empty());
        // Leaving mid-run is not a game over
        assert_eq!(rig.store.writes(), 0);

        rig.frame(3.0 * FRAME_MS);
        assert_eq!(rig.hud.menu_builds, 1);
    }

    #[test]
    fn test_resize_updates_playfield() {
        let mut rig = Rig::new(MemoryStore::new());
        rig.scheduler.resize(Vec2::new(300.0, 500.0));
        assert_eq!(rig.scheduler.registry.playfield().max, Vec2::new(300.0, 500.0));
        assert_eq!(
            rig.scheduler.player.hitbox().max.y,
            500.0 - PLAYER_BOTTOM_MARGIN
        );
    }
}
