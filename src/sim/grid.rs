//! Lane layout and axis-aligned box geometry
//!
//! Lanes are horizontal strips one tile tall, indexed top to bottom. Lane 0
//! is the goal, the last lane is where the player starts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// AABB intersection. Strict on all four sides: touching edges don't overlap.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Travel direction of a road lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

/// What a lane is made of
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LaneKind {
    /// Grass/pavement - never hurts the player
    Safe {
        /// Fill colour hint for the renderer
        color: String,
    },
    /// Traffic lane with obstacles moving at `base_speed` px/tick
    Road { direction: Direction, base_speed: f32 },
}

impl LaneKind {
    pub fn safe(color: &str) -> Self {
        LaneKind::Safe {
            color: color.to_string(),
        }
    }

    pub fn road(direction: Direction, base_speed: f32) -> Self {
        LaneKind::Road {
            direction,
            base_speed,
        }
    }

    pub fn is_road(&self) -> bool {
        matches!(self, LaneKind::Road { .. })
    }
}

/// A lane at runtime, rebuilt from the template on every level init
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lane {
    pub index: usize,
    pub y: f32,
    pub kind: LaneKind,
    /// Effective obstacle speed for the current level (0 for safe lanes)
    pub speed: f32,
    /// Obstacles in insertion order (collision scan order)
    pub obstacles: Vec<Obstacle>,
}

impl Lane {
    pub fn new(index: usize, tile_size: f32, kind: LaneKind) -> Self {
        Self {
            index,
            y: lane_y(index, tile_size),
            kind,
            speed: 0.0,
            obstacles: Vec::new(),
        }
    }

    pub fn is_road(&self) -> bool {
        self.kind.is_road()
    }

    pub fn direction(&self) -> Option<Direction> {
        match self.kind {
            LaneKind::Road { direction, .. } => Some(direction),
            LaneKind::Safe { .. } => None,
        }
    }

    /// Whether `y` falls in this lane's half-open span `[y, y + tile)`
    #[inline]
    pub fn contains_y(&self, y: f32, tile_size: f32) -> bool {
        y >= self.y && y < self.y + tile_size
    }
}

/// Top edge of the lane with the given index
#[inline]
pub fn lane_y(index: usize, tile_size: f32) -> f32 {
    index as f32 * tile_size
}

/// Find the lane whose vertical span contains `y`
pub fn lane_at(lanes: &[Lane], y: f32, tile_size: f32) -> Option<&Lane> {
    lanes.iter().find(|lane| lane.contains_y(y, tile_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lanes() -> Vec<Lane> {
        vec![
            Lane::new(0, 40.0, LaneKind::safe("#66CDAA")),
            Lane::new(1, 40.0, LaneKind::road(Direction::Left, 2.5)),
            Lane::new(2, 40.0, LaneKind::safe("#556B2F")),
        ]
    }

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 40.0, 40.0);
        let b = Rect::new(20.0, 20.0, 40.0, 40.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 40.0, 40.0);
        let right = Rect::new(40.0, 0.0, 40.0, 40.0);
        let below = Rect::new(0.0, 40.0, 40.0, 40.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn test_lane_at_half_open_span() {
        let lanes = lanes();
        assert_eq!(lane_at(&lanes, 0.0, 40.0).map(|l| l.index), Some(0));
        assert_eq!(lane_at(&lanes, 39.9, 40.0).map(|l| l.index), Some(0));
        assert_eq!(lane_at(&lanes, 40.0, 40.0).map(|l| l.index), Some(1));
        assert_eq!(lane_at(&lanes, 119.0, 40.0).map(|l| l.index), Some(2));
        assert!(lane_at(&lanes, 120.0, 40.0).is_none());
        assert!(lane_at(&lanes, -1.0, 40.0).is_none());
    }

    #[test]
    fn test_lane_direction() {
        let lanes = lanes();
        assert_eq!(lanes[0].direction(), None);
        assert_eq!(lanes[1].direction(), Some(Direction::Left));
        assert!(lanes[1].is_road());
    }
}
