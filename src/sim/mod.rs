//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Seeded RNG only
//! - Stable iteration order (by obstacle id)
//! - Drawing and storage go through `platform` / `persistence` traits

pub mod bounds;
pub mod frame;
pub mod lives;
pub mod obstacle;
pub mod player;
pub mod registry;
pub mod session;

pub use bounds::Aabb;
pub use frame::{Collaborators, FrameInput, FrameReport, LoopState, Scheduler, autopilot_target};
pub use lives::LifeIndicator;
pub use obstacle::{Obstacle, ObstacleKind};
pub use player::{CollisionOutcome, Player};
pub use registry::ObstacleRegistry;
pub use session::{Phase, ScreenLatch, ScreenLatches, SessionState};
