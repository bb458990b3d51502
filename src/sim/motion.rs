//! Obstacle motion with screen wrap
//!
//! Obstacles slide at a constant per-level speed and reappear on the
//! opposite edge once fully off-screen. They pass through each other.

use super::grid::{Direction, Lane};
use super::state::Obstacle;

/// Move one obstacle by one tick in `direction`, wrapping at the grid edges
#[inline]
pub fn advance(direction: Direction, obstacle: &mut Obstacle, grid_width: f32) {
    match direction {
        Direction::Left => {
            obstacle.x -= obstacle.speed;
            if obstacle.x + obstacle.width < 0.0 {
                obstacle.x = grid_width;
            }
        }
        Direction::Right => {
            obstacle.x += obstacle.speed;
            if obstacle.x > grid_width {
                obstacle.x = -obstacle.width;
            }
        }
    }
}

/// Advance every obstacle in every road lane
pub fn advance_lanes(lanes: &mut [Lane], grid_width: f32) {
    for lane in lanes.iter_mut() {
        let Some(direction) = lane.direction() else {
            continue;
        };
        for obstacle in &mut lane.obstacles {
            advance(direction, obstacle, grid_width);
        }
    }
}
