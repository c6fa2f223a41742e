//! 2D vectors, rectangles and room collision.
//!
//! All movement math uses `f32`. Evaluation order is fixed, so identical inputs
//! reproduce identical positions.

use std::ops::{Add, Mul, Sub};

use crate::ids::DoorId;

/// Position or direction in room space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const RIGHT: Self = Self { x: 1.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len <= f32::EPSILON {
            Vec2::ZERO
        } else {
            Vec2::new(self.x / len, self.y / len)
        }
    }

    /// Shortens the vector to at most `max` length. Input sticks can report
    /// diagonals longer than 1.
    pub fn clamp_length(self, max: f32) -> Vec2 {
        let len = self.length();
        if len > max && len > f32::EPSILON {
            self * (max / len)
        } else {
            self
        }
    }

    pub fn direction_to(self, target: Vec2) -> Vec2 {
        (target - self).normalized()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle given by its minimum corner and size.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.max_x() && point.y >= self.y && point.y <= self.max_y()
    }

    /// True if a circle of `radius` around `center` overlaps this rectangle.
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let nearest = Vec2::new(
            center.x.clamp(self.x, self.max_x()),
            center.y.clamp(self.y, self.max_y()),
        );
        center.distance(nearest) < radius
    }
}

/// Collision view of one room: bounds, static walls and door openings.
#[derive(Clone, Copy, Debug)]
pub struct RoomGeometry<'a> {
    pub bounds: Rect,
    pub walls: &'a [Rect],
}

/// A door as seen by movement: its rectangle and whether it can be walked into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorGate {
    pub id: DoorId,
    pub rect: Rect,
    pub open: bool,
}

/// Result of resolving one movement step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveOutcome {
    pub position: Vec2,
    /// First closed door that stopped the move, if any.
    pub blocked_by: Option<DoorId>,
}

impl RoomGeometry<'_> {
    /// Floor on the sub-step length for point-sized movers.
    const MIN_SUB_STEP: f32 = 0.05;

    /// Moves a circle of `radius` by `delta`, one axis at a time.
    ///
    /// Each axis is walked in sub-steps no longer than `radius`; the first
    /// sub-step that would overlap a wall or a closed door stops that axis, so
    /// entities slide along obstacles and a long frame cannot skip over a thin
    /// wall. The result is clamped inside the room bounds. Open doors never
    /// block.
    pub fn resolve_move(
        &self,
        from: Vec2,
        radius: f32,
        delta: Vec2,
        doors: &[DoorGate],
    ) -> MoveOutcome {
        let mut position = from;
        let mut blocked_by = None;
        let max_step = radius.max(Self::MIN_SUB_STEP);

        for step in [Vec2::new(delta.x, 0.0), Vec2::new(0.0, delta.y)] {
            if step.is_zero() {
                continue;
            }
            let count = (step.length() / max_step).ceil().max(1.0) as u32;
            let sub = step * (1.0 / count as f32);
            for _ in 0..count {
                let candidate = self.clamp_inside(position + sub, radius);
                if self.walls.iter().any(|w| w.intersects_circle(candidate, radius)) {
                    break;
                }
                if let Some(door) = doors
                    .iter()
                    .find(|d| !d.open && d.rect.intersects_circle(candidate, radius))
                {
                    blocked_by.get_or_insert(door.id);
                    break;
                }
                position = candidate;
            }
        }

        MoveOutcome {
            position,
            blocked_by,
        }
    }

    fn clamp_inside(&self, point: Vec2, radius: f32) -> Vec2 {
        let b = &self.bounds;
        let (min_x, max_x) = (b.x + radius, b.max_x() - radius);
        let (min_y, max_y) = (b.y + radius, b.max_y() - radius);
        Vec2::new(
            if min_x <= max_x { point.x.clamp(min_x, max_x) } else { b.center().x },
            if min_y <= max_y { point.y.clamp(min_y, max_y) } else { b.center().y },
        )
    }
}
