//! Demo mode: jump over the next obstacle automatically
//!
//! Times the jump so the apex lands roughly over the middle of the next
//! obstacle. Tall, wide obstacles at low speed can still be unclearable.

use super::run::Run;

/// Whether a grounded player should jump this frame
pub fn should_jump(run: &Run) -> bool {
    let player = run.player();
    if !player.on_ground || run.is_over() {
        return false;
    }

    let config = run.config();
    let speed = run.speed();
    // Frames from takeoff to apex
    let apex_frames = -config.jump_velocity / config.gravity;

    let Some(next) = run
        .obstacles()
        .iter()
        .find(|o| o.right() > player.pos.x)
    else {
        return false;
    };

    // Gap between the player's front and the obstacle's leading edge
    let gap = next.pos.x - (player.pos.x + player.size.x);
    let trigger = speed * apex_frames - (player.size.x + next.size.x) / 2.0;
    gap <= trigger
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::sim::obstacle::Obstacle;

    #[test]
    fn test_no_obstacles_no_jump() {
        let run = Run::new(RunConfig::default());
        assert!(!should_jump(&run));
    }

    #[test]
    fn test_far_obstacle_no_jump() {
        let mut run = Run::new(RunConfig::default());
        run.insert_obstacle(Obstacle::on_ground(700.0, 300.0, 30.0, 40.0));
        assert!(!should_jump(&run));
    }

    #[test]
    fn test_near_obstacle_jumps() {
        let mut run = Run::new(RunConfig::default());
        // Trigger gap at speed 5: 5 * 20 - (40 + 30) / 2 = 65
        run.insert_obstacle(Obstacle::on_ground(90.0 + 60.0, 300.0, 30.0, 40.0));
        assert!(should_jump(&run));
    }

    #[test]
    fn test_airborne_never_jumps() {
        let mut run = Run::new(RunConfig::default());
        run.insert_obstacle(Obstacle::on_ground(150.0, 300.0, 30.0, 40.0));
        run.jump();
        run.step(16.0);
        assert!(!should_jump(&run));
    }

    #[test]
    fn test_passed_obstacle_is_ignored() {
        let mut run = Run::new(RunConfig::default());
        run.insert_obstacle(Obstacle::on_ground(0.0, 300.0, 30.0, 40.0));
        assert!(!should_jump(&run));
    }

    #[test]
    fn test_clears_small_obstacles() {
        let config = RunConfig {
            obstacle_height_range: 0.0,
            obstacle_width_range: 0.0,
            ..Default::default()
        };
        let mut run = Run::with_seed(config, 1);
        // 30 seconds of 16ms frames
        for _ in 0..1875 {
            if should_jump(&run) {
                run.jump();
            }
            run.step(16.0);
        }
        assert!(!run.is_over(), "autopilot crashed at score {}", run.score());
        assert!(run.score() > 290.0);
    }
}
