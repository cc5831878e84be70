//! Late Runner - A side-scrolling obstacle dodging runner
//!
//! Core modules:
//! - `sim`: Simulation (player physics, obstacles, collisions, run state)
//! - `config`: Tunable run constants with JSON overrides
//! - `driver`: Frame loop glue between the host and the active run
//! - `audio`: Web Audio sound cues (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod config;
pub mod driver;
pub mod sim;

pub use config::{ConfigError, RunConfig};
pub use driver::{AudioSink, FrameControl, FrameDriver, FrameTicket, RenderSink, SinkError, SoundCue};

/// Game configuration constants
pub mod consts {
    /// Nominal frame interval used for the first frame of a run (60 Hz)
    pub const NOMINAL_FRAME_MS: f32 = 1000.0 / 60.0;
    /// Largest delta handed to the simulation (tab switches, debugger pauses)
    pub const MAX_FRAME_DELTA_MS: f32 = 100.0;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;
    /// Walkable surface; player and obstacles rest on it
    pub const GROUND_Y: f32 = 300.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;

    /// Downward acceleration per frame (pixels/frame²)
    pub const GRAVITY: f32 = 0.6;
    /// Vertical velocity set by a jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -12.0;

    /// Obstacle defaults
    pub const SPAWN_X: f32 = 800.0;
    pub const SPAWN_INTERVAL_MS: f32 = 2000.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 40.0;
    pub const OBSTACLE_HEIGHT_RANGE: f32 = 60.0;
    pub const OBSTACLE_MIN_WIDTH: f32 = 30.0;
    pub const OBSTACLE_WIDTH_RANGE: f32 = 20.0;

    /// Speed ramp (pixels/frame)
    pub const INITIAL_SPEED: f32 = 5.0;
    pub const SPEED_STEP: f32 = 0.5;
    pub const SPEED_INTERVAL_MS: f32 = 10_000.0;

    /// Distance units earned per millisecond survived
    pub const SCORE_PER_MS: f64 = 0.01;
}
