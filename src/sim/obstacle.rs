//! Obstacles and the scrolling obstacle field

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A block resting on the ground line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    /// Bounding box (width, height)
    pub size: Vec2,
}

impl Obstacle {
    /// Create an obstacle at `x` whose bottom edge sits on `ground_y`
    pub fn on_ground(x: f32, ground_y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, ground_y - height),
            size: Vec2::new(width, height),
        }
    }

    /// Right edge x
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Fully scrolled past the left edge of the field
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right() <= 0.0
    }
}

/// Active obstacles in spawn order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly spawned obstacle (newest last)
    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Scroll every obstacle left by `speed`, then drop the ones that left
    /// the screen. Survivors keep their relative order.
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.pos.x -= speed;
        }
        self.obstacles.retain(|o| !o.is_offscreen());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

impl<'a> IntoIterator for &'a ObstacleField {
    type Item = &'a Obstacle;
    type IntoIter = std::slice::Iter<'a, Obstacle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_on_ground_geometry() {
        let o = Obstacle::on_ground(800.0, 300.0, 30.0, 50.0);
        assert_eq!(o.pos, Vec2::new(800.0, 250.0));
        assert_eq!(o.pos.y + o.size.y, 300.0);
        assert_eq!(o.right(), 830.0);
    }

    #[test]
    fn test_pruned_after_exactly_166_advances() {
        let mut field = ObstacleField::new();
        field.push(Obstacle::on_ground(800.0, 300.0, 30.0, 50.0));

        for _ in 0..165 {
            field.advance(5.0);
        }
        assert_eq!(field.len(), 1);
        assert_eq!(field.as_slice()[0].right(), 5.0);

        field.advance(5.0);
        assert!(field.is_empty());
    }

    #[test]
    fn test_advance_only_moves_x() {
        let mut field = ObstacleField::new();
        let original = Obstacle::on_ground(400.0, 300.0, 45.0, 70.0);
        field.push(original);
        field.advance(7.5);

        let moved = field.as_slice()[0];
        assert_eq!(moved.pos.x, 392.5);
        assert_eq!(moved.pos.y, original.pos.y);
        assert_eq!(moved.size, original.size);
    }

    #[test]
    fn test_advance_preserves_order() {
        let mut field = ObstacleField::new();
        for (i, x) in [5.0, 300.0, 10.0, 600.0, 800.0].into_iter().enumerate() {
            field.push(Obstacle::on_ground(x, 300.0, 30.0, 40.0 + i as f32));
        }
        field.advance(40.0);

        // 5.0 and 10.0 leave the field; the rest keep spawn order
        let heights: Vec<f32> = field.iter().map(|o| o.size.y).collect();
        assert_eq!(heights, vec![41.0, 43.0, 44.0]);
    }

    proptest! {
        #[test]
        fn no_offscreen_obstacle_survives_advance(
            xs in prop::collection::vec(-100.0f32..900.0, 0..20),
            width in 1.0f32..60.0,
            speed in 0.0f32..20.0,
        ) {
            let mut field = ObstacleField::new();
            for x in &xs {
                field.push(Obstacle::on_ground(*x, 300.0, width, 40.0));
            }
            field.advance(speed);
            prop_assert!(field.iter().all(|o| o.pos.x + o.size.x > 0.0));
        }
    }
}
