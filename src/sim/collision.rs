//! Collision detection
//!
//! Axis-aligned box overlap between the player and obstacles. All four
//! comparisons are strict, so boxes that only share an edge do not collide.

use glam::Vec2;

use super::obstacle::Obstacle;
use super::player::Player;

/// Strict AABB intersection of two boxes given by top-left corner and size
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// Check whether the player overlaps an obstacle
#[inline]
pub fn overlaps(player: &Player, obstacle: &Obstacle) -> bool {
    aabb_overlap(player.pos, player.size, obstacle.pos, obstacle.size)
}

/// Index of the first obstacle (in field order) the player overlaps.
/// Stops at the first hit.
pub fn first_hit<'a, I>(player: &Player, obstacles: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    obstacles.into_iter().position(|o| overlaps(player, o))
}
