//! Player body
//!
//! Vertical physics only: the player stays in a fixed lane while the world
//! scrolls past. Gravity and the jump impulse are applied per frame rather
//! than per millisecond, so jump height is the same at any frame rate but
//! jump duration is not.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner (x is the fixed lane)
    pub pos: Vec2,
    /// Bounding box (width, height)
    pub size: Vec2,
    /// Vertical velocity in pixels/frame (negative is up)
    pub vy: f32,
    pub on_ground: bool,
}

impl Player {
    /// Create a player standing on the ground line
    pub fn new(lane_x: f32, size: Vec2, ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(lane_x, ground_y - size.y),
            size,
            vy: 0.0,
            on_ground: true,
        }
    }

    /// Bottom edge y
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Apply one frame of gravity, then move by the new velocity
    pub fn integrate(&mut self, gravity: f32) {
        self.vy += gravity;
        self.pos.y += self.vy;
    }

    /// Land on the ground line if the bottom edge reached or crossed it
    pub fn clamp_to_ground(&mut self, ground_y: f32) {
        if self.bottom() >= ground_y {
            self.pos.y = ground_y - self.size.y;
            self.vy = 0.0;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }
    }

    /// Jump if grounded. Returns false (and changes nothing) while airborne.
    pub fn jump(&mut self, velocity: f32) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vy = velocity;
        self.on_ground = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: f32 = 300.0;
    const GRAVITY: f32 = 0.6;
    const JUMP: f32 = -12.0;

    fn player() -> Player {
        Player::new(50.0, Vec2::new(40.0, 60.0), GROUND)
    }

    #[test]
    fn test_starts_on_ground() {
        let p = player();
        assert!(p.on_ground);
        assert_eq!(p.pos.y, 240.0);
        assert_eq!(p.bottom(), GROUND);
    }

    #[test]
    fn test_grounded_integration_adds_gravity_then_clamps() {
        let mut p = player();
        let prior = p.vy;
        p.integrate(GRAVITY);
        assert_eq!(p.vy, prior + GRAVITY);
        assert!(p.bottom() > GROUND);

        p.clamp_to_ground(GROUND);
        assert_eq!(p.vy, 0.0);
        assert_eq!(p.pos.y, 240.0);
        assert!(p.on_ground);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut p = player();
        assert!(p.jump(JUMP));
        assert_eq!(p.vy, JUMP);
        assert!(!p.on_ground);

        // Airborne: no double jump
        p.integrate(GRAVITY);
        p.clamp_to_ground(GROUND);
        let vy = p.vy;
        assert!(!p.jump(JUMP));
        assert_eq!(p.vy, vy);
        assert!(!p.on_ground);
    }

    #[test]
    fn test_clamp_in_air_clears_on_ground() {
        let mut p = player();
        p.pos.y = 100.0;
        p.clamp_to_ground(GROUND);
        assert!(!p.on_ground);
        assert_eq!(p.pos.y, 100.0);
    }

    #[test]
    fn test_exact_contact_counts_as_landing() {
        let mut p = player();
        p.on_ground = false;
        p.vy = 3.0;
        p.pos.y = GROUND - p.size.y;
        p.clamp_to_ground(GROUND);
        assert!(p.on_ground);
        assert_eq!(p.vy, 0.0);
    }

    #[test]
    fn test_jump_arc_trace() {
        let mut p = player();
        assert!(p.jump(JUMP));

        let mut trace = Vec::new();
        for _ in 0..200 {
            let before = p.pos.y;
            p.integrate(GRAVITY);
            p.clamp_to_ground(GROUND);
            trace.push((before, p.pos.y, p.vy));
            if p.on_ground {
                break;
            }
        }

        assert!(p.on_ground);
        assert_eq!(p.pos.y, 240.0);

        // Apex: first frame whose velocity turned non-negative. Its own
        // displacement may be too small to register at f32 precision.
        let apex = trace
            .iter()
            .position(|&(_, _, vy)| vy >= 0.0)
            .expect("jump should peak");
        for &(before, after, _) in &trace[..apex] {
            assert!(after < before, "should rise while velocity is negative");
        }
        for &(before, after, _) in &trace[apex + 1..] {
            assert!(after > before, "should fall after the apex");
        }
        // Never below the ground line
        assert!(trace.iter().all(|&(_, y, _)| y + 60.0 <= GROUND));
    }
}
