//! Axis-aligned rectangle utilities shared by the layout pipeline.
//!
//! All coordinates are in feet with the origin at the lower-left corner of the
//! building envelope. [`Rect`] is the only shape the engine knows about.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used when comparing positions produced by stepping arithmetic.
pub const EPSILON: f32 = 1e-4;

/// An axis-aligned rectangle given by its lower-left corner and size.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Lower-left corner.
    pub min: Vec2,
    /// Width (x) and depth (y).
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, depth: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, depth),
        }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Upper-right corner.
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    pub fn area(&self) -> f32 {
        self.size.x * self.size.y
    }

    /// Signed gap between the two rectangles along x. Negative values mean the
    /// x-projections overlap.
    pub fn gap_x(&self, other: &Rect) -> f32 {
        (other.min.x - self.max().x).max(self.min.x - other.max().x)
    }

    /// Signed gap between the two rectangles along y.
    pub fn gap_y(&self, other: &Rect) -> f32 {
        (other.min.y - self.max().y).max(self.min.y - other.max().y)
    }

    /// Length of the shared x-projection (negative when disjoint).
    pub fn overlap_len_x(&self, other: &Rect) -> f32 {
        self.max().x.min(other.max().x) - self.min.x.max(other.min.x)
    }

    /// Length of the shared y-projection (negative when disjoint).
    pub fn overlap_len_y(&self, other: &Rect) -> f32 {
        self.max().y.min(other.max().y) - self.min.y.max(other.min.y)
    }

    /// Returns `true` when the rectangles share a positive area. Faces that
    /// touch do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlap_len_x(other) > EPSILON && self.overlap_len_y(other) > EPSILON
    }

    /// Returns `true` when the rectangles intersect, or when two facing sides
    /// are separated by a gap narrower than `clearance`. Flush contact never
    /// overlaps, so rooms can still share a wall.
    pub fn overlaps(&self, other: &Rect, clearance: f32) -> bool {
        if self.intersects(other) {
            return true;
        }
        let sliver = |gap: f32| gap > EPSILON && gap < clearance;
        (sliver(self.gap_x(other)) && self.overlap_len_y(other) > EPSILON)
            || (sliver(self.gap_y(other)) && self.overlap_len_x(other) > EPSILON)
    }

    /// Two rooms share a wall when one pair of faces lies within `tolerance`
    /// of each other and the faces run alongside for at least `min_length`.
    pub fn shares_wall(&self, other: &Rect, tolerance: f32, min_length: f32) -> bool {
        (self.gap_x(other).abs() <= tolerance && self.overlap_len_y(other) >= min_length)
            || (self.gap_y(other).abs() <= tolerance && self.overlap_len_x(other) >= min_length)
    }

    /// Returns `true` when a face of `self` lies within `snap` of a face of
    /// `other` with a non-empty run between them.
    pub fn is_near_face(&self, other: &Rect, snap: f32) -> bool {
        (self.gap_x(other).abs() <= snap && self.overlap_len_y(other) > EPSILON)
            || (self.gap_y(other).abs() <= snap && self.overlap_len_x(other) > EPSILON)
    }

    /// Center-to-center distance.
    pub fn distance_to(&self, other: &Rect) -> f32 {
        self.center().distance(other.center())
    }

    /// Whether the rectangle lies inside `[0, width] x [0, depth]`.
    pub fn is_within(&self, width: f32, depth: f32) -> bool {
        let max = self.max();
        self.min.x >= -EPSILON
            && self.min.y >= -EPSILON
            && max.x <= width + EPSILON
            && max.y <= depth + EPSILON
    }

    /// Whether any face of the rectangle lies on the envelope boundary.
    pub fn touches_boundary(&self, width: f32, depth: f32, tolerance: f32) -> bool {
        let max = self.max();
        self.min.x <= tolerance
            || self.min.y <= tolerance
            || max.x >= width - tolerance
            || max.y >= depth - tolerance
    }

    /// Whether one of the rectangle's corners sits within `radius` of the
    /// matching envelope corner.
    pub fn is_near_corner(&self, width: f32, depth: f32, radius: f32) -> bool {
        let max = self.max();
        let pairs = [
            (self.min, Vec2::new(0.0, 0.0)),
            (Vec2::new(max.x, self.min.y), Vec2::new(width, 0.0)),
            (Vec2::new(self.min.x, max.y), Vec2::new(0.0, depth)),
            (max, Vec2::new(width, depth)),
        ];
        pairs
            .iter()
            .any(|(corner, envelope)| corner.distance(*envelope) <= radius)
    }
}

/// Positions from `lo` to `hi` (inclusive) at `step` increments. The upper
/// bound is always emitted so rooms can sit flush against the far edge.
pub fn steps(lo: f32, hi: f32, step: f32) -> Vec<f32> {
    if !lo.is_finite() || !hi.is_finite() || hi < lo - EPSILON {
        return Vec::new();
    }
    let step = if step.is_finite() && step > 0.0 {
        step
    } else {
        1.0
    };
    let count = ((hi - lo) / step + EPSILON).floor() as usize;
    let mut values: Vec<f32> = (0..=count).map(|k| lo + k as f32 * step).collect();
    if let Some(&last) = values.last() {
        if hi - last > EPSILON {
            values.push(hi);
        }
    }
    values
}
