//! Frame driver
//!
//! Glue between a host frame loop (requestAnimationFrame, a native timer)
//! and the simulation. Owns the active run and its clock, runs one step per
//! frame callback, forwards each frame to render and audio sinks, and hands
//! the final score to the game-over callback exactly once.
//!
//! Sinks are best-effort: an error is logged and the frame carries on.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::config::{ConfigError, RunConfig};
use crate::sim::{FrameClock, FrameView, Run, RunEvent, StepOutcome, should_jump};

/// Failure reported by a render or audio collaborator
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("render failed: {0}")]
    Render(String),
    #[error("audio playback rejected: {0}")]
    Audio(String),
    #[error("sink unavailable")]
    Unavailable,
}

/// Sound cues emitted by a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Jump,
    SpeedUp,
    GameOver,
}

impl SoundCue {
    /// Map a run event to its cue (spawns are silent)
    pub fn for_event(event: &RunEvent) -> Option<Self> {
        match event {
            RunEvent::Jumped => Some(SoundCue::Jump),
            RunEvent::SpeedUp { .. } => Some(SoundCue::SpeedUp),
            RunEvent::GameOver { .. } => Some(SoundCue::GameOver),
            RunEvent::ObstacleSpawned => None,
        }
    }
}

/// Draws a frame (canvas, terminal, test recorder)
pub trait RenderSink {
    fn draw(&mut self, frame: &FrameView<'_>) -> Result<(), SinkError>;
}

/// Plays sound cues
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue) -> Result<(), SinkError>;
}

/// Lets the host keep a handle to a sink it gave the driver (mute toggles)
impl<S: AudioSink> AudioSink for Rc<RefCell<S>> {
    fn play(&mut self, cue: SoundCue) -> Result<(), SinkError> {
        self.borrow_mut().play(cue)
    }
}

/// Whether the host should schedule another frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// Identifies the run a scheduled frame callback belongs to.
///
/// Restarting invalidates every ticket handed out before, so a callback
/// left over from a cancelled run can never step the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTicket(u64);

type GameOverCallback = Box<dyn FnMut(u64)>;

/// Owns the active run and feeds it frames
pub struct FrameDriver {
    config: RunConfig,
    seed: Option<u64>,
    run: Option<Run>,
    clock: FrameClock,
    generation: u64,
    autopilot: bool,
    last_score: Option<u64>,
    render_sinks: Vec<Box<dyn RenderSink>>,
    audio_sinks: Vec<Box<dyn AudioSink>>,
    on_game_over: Option<GameOverCallback>,
}

impl FrameDriver {
    /// Validate the config and start the first run
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        Self::build(config, None)
    }

    /// Like [`FrameDriver::new`], with reproducible obstacle sequences.
    /// Each restart derives a fresh seed from `seed`.
    pub fn with_seed(config: RunConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::build(config, Some(seed))
    }

    fn build(config: RunConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            log::warn!("Rejected run config: {}", e);
            return Err(e);
        }
        let mut driver = Self {
            clock: FrameClock::new(config.max_frame_delta_ms),
            config,
            seed,
            run: None,
            generation: 0,
            autopilot: false,
            last_score: None,
            render_sinks: Vec::new(),
            audio_sinks: Vec::new(),
            on_game_over: None,
        };
        driver.start_run();
        Ok(driver)
    }

    fn start_run(&mut self) {
        self.generation += 1;
        self.clock = FrameClock::new(self.config.max_frame_delta_ms);
        self.run = Some(match self.seed {
            Some(seed) => Run::with_seed(self.config.clone(), seed.wrapping_add(self.generation)),
            None => Run::new(self.config.clone()),
        });
        log::info!("Run {} started", self.generation);
    }

    /// Discard whatever run is active and start a fresh one.
    /// Returns the ticket the host must pass to `frame` from now on.
    pub fn restart(&mut self) -> FrameTicket {
        if self.run.as_ref().is_some_and(|r| !r.is_over()) {
            log::info!("Run {} abandoned", self.generation);
        }
        self.start_run();
        self.ticket()
    }

    /// Ticket for the current run
    pub fn ticket(&self) -> FrameTicket {
        FrameTicket(self.generation)
    }

    pub fn add_render_sink(&mut self, sink: Box<dyn RenderSink>) {
        self.render_sinks.push(sink);
    }

    pub fn add_audio_sink(&mut self, sink: Box<dyn AudioSink>) {
        self.audio_sinks.push(sink);
    }

    /// Called with the floored final score when a run ends
    pub fn set_game_over_callback(&mut self, callback: impl FnMut(u64) + 'static) {
        self.on_game_over = Some(Box::new(callback));
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Jump input. No-op when no run is active or the player is airborne.
    pub fn jump(&mut self) -> bool {
        self.run.as_mut().is_some_and(|run| run.jump())
    }

    /// Active run, if any (runs are dropped when they end)
    pub fn run(&self) -> Option<&Run> {
        self.run.as_ref()
    }

    pub fn run_mut(&mut self) -> Option<&mut Run> {
        self.run.as_mut()
    }

    /// Final score of the most recently finished run
    pub fn last_score(&self) -> Option<u64> {
        self.last_score
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// One frame callback. `now_ms` is the host's high-resolution timestamp.
    pub fn frame(&mut self, ticket: FrameTicket, now_ms: f64) -> FrameControl {
        if ticket != self.ticket() {
            log::debug!("Dropping stale frame for run {}", ticket.0);
            return FrameControl::Stop;
        }
        let Some(run) = self.run.as_mut() else {
            return FrameControl::Stop;
        };

        let dt = self.clock.delta_ms(now_ms);
        if self.autopilot && should_jump(run) {
            run.jump();
        }
        let outcome = run.step(dt);

        for event in run.drain_events() {
            if let Some(cue) = SoundCue::for_event(&event) {
                play_cue(&mut self.audio_sinks, cue);
            }
        }
        draw_frame(&mut self.render_sinks, &run.view());

        match outcome {
            StepOutcome::GameOver { score } => {
                log::info!(
                    "Run {} over after {} frames, distance {} m",
                    self.generation,
                    run.frames(),
                    score
                );
                self.run = None;
                self.last_score = Some(score);
                if let Some(callback) = self.on_game_over.as_mut() {
                    callback(score);
                }
                FrameControl::Stop
            }
            StepOutcome::Ended => {
                self.run = None;
                FrameControl::Stop
            }
            StepOutcome::Running | StepOutcome::Skipped => FrameControl::Continue,
        }
    }
}

fn draw_frame(sinks: &mut [Box<dyn RenderSink>], frame: &FrameView<'_>) {
    for sink in sinks {
        if let Err(e) = sink.draw(frame) {
            log::warn!("Render error: {}", e);
        }
    }
}

fn play_cue(sinks: &mut [Box<dyn AudioSink>], cue: SoundCue) {
    for sink in sinks {
        if let Err(e) = sink.play(cue) {
            log::warn!("Audio error ({:?}): {}", cue, e);
        }
    }
}
