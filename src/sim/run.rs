//! Run state and the per-frame step
//!
//! A `Run` owns everything one play session needs: the player, the obstacle
//! field, the spawn and speed timers, the score and the phase. Nothing
//! survives into the next run; restarting means building a new `Run`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::first_hit;
use super::obstacle::{Obstacle, ObstacleField};
use super::player::Player;
use super::spawner::ObstacleSpawner;
use crate::config::RunConfig;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Active gameplay
    Running,
    /// Player hit an obstacle. Terminal.
    GameOver,
}

/// Things that happened during a step (for audio and logging)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
    Jumped,
    ObstacleSpawned,
    SpeedUp { speed: f32 },
    GameOver { score: u64 },
}

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Delta was zero, negative or not finite; nothing moved
    Skipped,
    /// Step completed, run still going
    Running,
    /// This step ended the run (reported once per run)
    GameOver { score: u64 },
    /// Run was already over; step ignored
    Ended,
}

/// Read-only view of a run for render sinks and the HUD
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub score: f64,
    pub speed: f32,
    pub phase: RunPhase,
    pub field_size: Vec2,
    pub ground_y: f32,
}

/// One play session
#[derive(Debug, Clone)]
pub struct Run {
    config: RunConfig,
    player: Player,
    obstacles: ObstacleField,
    spawner: ObstacleSpawner,
    /// Obstacle scroll speed (pixels/frame)
    speed: f32,
    speed_timer_ms: f32,
    /// Distance covered, unfloored
    score: f64,
    phase: RunPhase,
    final_score: Option<u64>,
    /// Steps completed (skipped frames not counted)
    frames: u64,
    events: Vec<RunEvent>,
}

impl Run {
    /// Start a run with an entropy-seeded obstacle generator
    pub fn new(config: RunConfig) -> Self {
        let spawner = ObstacleSpawner::new(&config);
        Self::with_spawner(config, spawner)
    }

    /// Start a run whose obstacle sequence is fixed by `seed`
    pub fn with_seed(config: RunConfig, seed: u64) -> Self {
        let spawner = ObstacleSpawner::with_seed(&config, seed);
        Self::with_spawner(config, spawner)
    }

    fn with_spawner(config: RunConfig, spawner: ObstacleSpawner) -> Self {
        let player = Player::new(
            config.player_x,
            Vec2::new(config.player_width, config.player_height),
            config.ground_y,
        );
        Self {
            speed: config.initial_speed,
            player,
            obstacles: ObstacleField::new(),
            spawner,
            speed_timer_ms: 0.0,
            score: 0.0,
            phase: RunPhase::Running,
            final_score: None,
            frames: 0,
            events: Vec::new(),
            config,
        }
    }

    /// Jump input. Ignored while airborne or after game over.
    pub fn jump(&mut self) -> bool {
        if self.phase != RunPhase::Running {
            return false;
        }
        let jumped = self.player.jump(self.config.jump_velocity);
        if jumped {
            self.events.push(RunEvent::Jumped);
        }
        jumped
    }

    /// Advance the run by one frame
    pub fn step(&mut self, delta_ms: f32) -> StepOutcome {
        if self.phase == RunPhase::GameOver {
            return StepOutcome::Ended;
        }
        if !delta_ms.is_finite() || delta_ms <= 0.0 {
            return StepOutcome::Skipped;
        }
        self.frames += 1;

        // Player physics
        self.player.integrate(self.config.gravity);
        self.player.clamp_to_ground(self.config.ground_y);

        // Spawn, scroll, prune
        if let Some(obstacle) = self.spawner.tick(delta_ms) {
            log::debug!(
                "Spawned obstacle {}x{} at frame {}",
                obstacle.size.x,
                obstacle.size.y,
                self.frames
            );
            self.obstacles.push(obstacle);
            self.events.push(RunEvent::ObstacleSpawned);
        }
        self.obstacles.advance(self.speed);

        // Collision ends the frame: no score, no speed ramp
        if first_hit(&self.player, &self.obstacles).is_some() {
            let score = self.score.floor() as u64;
            self.phase = RunPhase::GameOver;
            self.final_score = Some(score);
            self.events.push(RunEvent::GameOver { score });
            return StepOutcome::GameOver { score };
        }

        self.score += delta_ms as f64 * self.config.score_per_ms;

        // Speed ramp
        self.speed_timer_ms += delta_ms;
        if self.speed_timer_ms > self.config.speed_interval_ms {
            self.speed_timer_ms = 0.0;
            self.speed += self.config.speed_step;
            log::debug!("Speed up to {}", self.speed);
            self.events.push(RunEvent::SpeedUp { speed: self.speed });
        }

        StepOutcome::Running
    }

    /// Place an obstacle directly into the field (tests, tooling)
    pub fn insert_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<RunEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            player: &self.player,
            obstacles: self.obstacles.as_slice(),
            score: self.score,
            speed: self.speed,
            phase: self.phase,
            field_size: Vec2::new(self.config.field_width, self.config.field_height),
            ground_y: self.config.ground_y,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Floored score reported at game over
    pub fn final_score(&self) -> Option<u64> {
        self.final_score
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == RunPhase::GameOver
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }
}
