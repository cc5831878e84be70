//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One step per frame, driven by the caller
//! - Stable obstacle order (spawn order)
//! - All run state owned by a single `Run`

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod obstacle;
pub mod player;
pub mod run;
pub mod spawner;

pub use autopilot::should_jump;
pub use clock::FrameClock;
pub use collision::{first_hit, overlaps};
pub use obstacle::{Obstacle, ObstacleField};
pub use player::Player;
pub use run::{FrameView, Run, RunEvent, RunPhase, StepOutcome};
pub use spawner::ObstacleSpawner;
