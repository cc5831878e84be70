//! Obstacle spawner
//!
//! Emits one obstacle every time the spawn timer passes the configured
//! interval. Geometry is random within the configured ranges.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::obstacle::Obstacle;
use crate::config::RunConfig;

/// Time-driven obstacle generator
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    timer_ms: f32,
    interval_ms: f32,
    spawn_x: f32,
    ground_y: f32,
    min_height: f32,
    height_range: f32,
    min_width: f32,
    width_range: f32,
    rng: Pcg32,
}

impl ObstacleSpawner {
    /// Spawner seeded from OS entropy
    pub fn new(config: &RunConfig) -> Self {
        Self::with_rng(config, Pcg32::from_rng(&mut rand::rng()))
    }

    /// Spawner with a fixed seed (replays, demos)
    pub fn with_seed(config: &RunConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(config: &RunConfig, rng: Pcg32) -> Self {
        Self {
            timer_ms: 0.0,
            interval_ms: config.spawn_interval_ms,
            spawn_x: config.spawn_x,
            ground_y: config.ground_y,
            min_height: config.obstacle_min_height,
            height_range: config.obstacle_height_range,
            min_width: config.obstacle_min_width,
            width_range: config.obstacle_width_range,
            rng,
        }
    }

    /// Milliseconds accumulated since the last spawn
    pub fn timer_ms(&self) -> f32 {
        self.timer_ms
    }

    /// Accumulate `delta_ms`; returns a new obstacle when the timer fires.
    /// Non-positive deltas are ignored.
    pub fn tick(&mut self, delta_ms: f32) -> Option<Obstacle> {
        if delta_ms > 0.0 {
            self.timer_ms += delta_ms;
        }
        if self.timer_ms <= self.interval_ms {
            return None;
        }
        self.timer_ms = 0.0;

        let height = sample(&mut self.rng, self.min_height, self.height_range);
        let width = sample(&mut self.rng, self.min_width, self.width_range);
        Some(Obstacle::on_ground(self.spawn_x, self.ground_y, width, height))
    }
}

/// Uniform in `[min, min + range)`; a zero range yields `min`
fn sample(rng: &mut Pcg32, min: f32, range: f32) -> f32 {
    let max = min + range;
    // Also catches ranges too small to move `min` at f32 precision
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_cadence() {
        let config = RunConfig::default();
        let mut spawner = ObstacleSpawner::new(&config);

        // 2000ms interval, strictly exceeded: 125 frames of 16ms = 2000ms, not yet
        for _ in 0..125 {
            assert!(spawner.tick(16.0).is_none());
        }
        assert_eq!(spawner.timer_ms(), 2000.0);
        assert!(spawner.tick(16.0).is_some());
        assert_eq!(spawner.timer_ms(), 0.0);
    }

    #[test]
    fn test_geometry_within_ranges() {
        let config = RunConfig::default();
        let mut spawner = ObstacleSpawner::new(&config);

        for _ in 0..200 {
            let o = spawner.tick(2001.0).expect("every tick should spawn");
            assert_eq!(o.pos.x, config.spawn_x);
            assert!(o.size.y >= 40.0 && o.size.y < 100.0, "height {}", o.size.y);
            assert!(o.size.x >= 30.0 && o.size.x < 50.0, "width {}", o.size.x);
            assert!((o.pos.y + o.size.y - config.ground_y).abs() < 1e-4);
        }
    }

    #[test]
    fn test_zero_range_uses_minimum() {
        let config = RunConfig {
            obstacle_height_range: 0.0,
            obstacle_width_range: 0.0,
            ..Default::default()
        };
        let mut spawner = ObstacleSpawner::new(&config);
        let o = spawner.tick(5000.0).unwrap();
        assert_eq!(o.size.x, config.obstacle_min_width);
        assert_eq!(o.size.y, config.obstacle_min_height);
    }

    #[test]
    fn test_negative_delta_does_not_rewind() {
        let config = RunConfig::default();
        let mut spawner = ObstacleSpawner::new(&config);
        spawner.tick(500.0);
        spawner.tick(-300.0);
        assert_eq!(spawner.timer_ms(), 500.0);
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let config = RunConfig::default();
        let mut a = ObstacleSpawner::with_seed(&config, 42);
        let mut b = ObstacleSpawner::with_seed(&config, 42);
        for _ in 0..10 {
            assert_eq!(a.tick(2500.0), b.tick(2500.0));
        }
    }
}
