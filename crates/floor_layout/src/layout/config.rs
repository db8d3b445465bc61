//! Tunable constants for a placement run.
//!
//! Every scoring weight and geometric tolerance lives here under a name. The
//! defaults carry the calibrated values; callers may override them but the
//! engine never derives them.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which side of the building the linear corridor runs along.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CorridorSide {
    #[default]
    Entry,
    Opposite,
}

/// Additive scoring weights used by the position scorer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ScoringWeights {
    /// Bonus for sharing a wall with a must-connect neighbor (scaled by strength).
    pub shared_wall_bonus: f32,
    /// Peak proximity bonus for rules that want the rooms close.
    pub proximity_bonus: f32,
    /// Distance at which the proximity bonus reaches zero.
    pub proximity_falloff: f32,
    /// Bonus when rooms that should be apart end up far apart.
    pub separation_bonus: f32,
    /// Distance beyond which the separation bonus applies.
    pub separation_distance: f32,
    /// Applied when rooms that should be apart share a wall.
    pub separation_penalty: f32,
    pub daylight_required_bonus: f32,
    pub daylight_required_penalty: f32,
    pub daylight_preferred_bonus: f32,
    /// Peak bonus for public rooms at the entry point.
    pub entry_bonus: f32,
    pub corridor_bonus: f32,
    pub plumbing_bonus: f32,
    pub corner_bonus: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            shared_wall_bonus: 100.0,
            proximity_bonus: 50.0,
            proximity_falloff: 20.0,
            separation_bonus: 20.0,
            separation_distance: 30.0,
            separation_penalty: -100.0,
            daylight_required_bonus: 50.0,
            daylight_required_penalty: -100.0,
            daylight_preferred_bonus: 25.0,
            entry_bonus: 50.0,
            corridor_bonus: 20.0,
            plumbing_bonus: 30.0,
            corner_bonus: 40.0,
        }
    }
}

/// Distance tiers used when judging adjacency satisfaction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct MetricThresholds {
    pub prefer_near_max: f32,
    pub should_separate_min: f32,
    pub must_separate_min: f32,
}

impl Default for MetricThresholds {
    fn default() -> Self {
        Self {
            prefer_near_max: 30.0,
            should_separate_min: 20.0,
            must_separate_min: 40.0,
        }
    }
}

/// Configuration for one placement run.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Candidate enumeration step in feet.
    pub step: f32,
    /// Width of primary corridors.
    pub corridor_width: f32,
    /// Side of the building the linear corridor hugs.
    pub linear_corridor_side: CorridorSide,
    /// Minimum gap between two rooms that do not share a flush wall.
    pub overlap_buffer: f32,
    /// Maximum gap between a room face and a corridor face to count as adjacent.
    pub corridor_snap: f32,
    /// Corner preference radius.
    pub corner_radius: f32,
    /// Maximum gap between two faces that still forms a shared wall.
    pub wall_tolerance: f32,
    /// Minimum shared run for a wall to take a door.
    pub min_shared_wall: f32,
    /// Distance from the envelope edge that still counts as an exterior wall.
    pub edge_tolerance: f32,
    /// Occupancy grid cell size.
    pub cell_size: f32,
    pub weights: ScoringWeights,
    pub thresholds: MetricThresholds,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            step: 2.0,
            corridor_width: 6.0,
            linear_corridor_side: CorridorSide::Entry,
            overlap_buffer: 0.5,
            corridor_snap: 1.0,
            corner_radius: 2.0,
            wall_tolerance: 1.0,
            min_shared_wall: 3.0,
            edge_tolerance: 0.5,
            cell_size: 1.0,
            weights: ScoringWeights::default(),
            thresholds: MetricThresholds::default(),
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the candidate enumeration step.
    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Sets the corridor width.
    pub fn with_corridor_width(mut self, corridor_width: f32) -> Self {
        self.corridor_width = corridor_width;
        self
    }

    /// Sets which side the linear corridor runs along.
    pub fn with_linear_corridor_side(mut self, side: CorridorSide) -> Self {
        self.linear_corridor_side = side;
        self
    }

    /// Sets the overlap buffer.
    pub fn with_overlap_buffer(mut self, overlap_buffer: f32) -> Self {
        self.overlap_buffer = overlap_buffer;
        self
    }

    /// Sets the occupancy grid cell size.
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Replaces the scoring weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Replaces the metric thresholds.
    pub fn with_thresholds(mut self, thresholds: MetricThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("step", self.step),
            ("corridor_width", self.corridor_width),
            ("cell_size", self.cell_size),
            ("min_shared_wall", self.min_shared_wall),
            (
                "weights.proximity_falloff",
                self.weights.proximity_falloff,
            ),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!("{name} must be > 0")));
            }
        }

        let non_negative = [
            ("overlap_buffer", self.overlap_buffer),
            ("corridor_snap", self.corridor_snap),
            ("corner_radius", self.corner_radius),
            ("wall_tolerance", self.wall_tolerance),
            ("edge_tolerance", self.edge_tolerance),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidConfig(format!("{name} must be >= 0")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_calibration() {
        let config = LayoutConfig::default();
        assert_eq!(config.step, 2.0);
        assert_eq!(config.corridor_width, 6.0);
        assert_eq!(config.overlap_buffer, 0.5);
        assert_eq!(config.weights.shared_wall_bonus, 100.0);
        assert_eq!(config.weights.separation_penalty, -100.0);
        assert_eq!(config.thresholds.must_separate_min, 40.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_overrides_fields() {
        let config = LayoutConfig::new()
            .with_step(1.0)
            .with_corridor_width(8.0)
            .with_linear_corridor_side(CorridorSide::Opposite);
        assert_eq!(config.step, 1.0);
        assert_eq!(config.corridor_width, 8.0);
        assert_eq!(config.linear_corridor_side, CorridorSide::Opposite);
    }

    #[test]
    fn validate_rejects_non_positive_step() {
        let err = LayoutConfig::new().with_step(0.0).validate();
        assert!(matches!(err, Err(Error::InvalidConfig(ref m)) if m.contains("step")));
        assert!(LayoutConfig::new()
            .with_overlap_buffer(-1.0)
            .validate()
            .is_err());
    }
}
