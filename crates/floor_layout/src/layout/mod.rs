//! Placement pipeline: circulation, candidate generation, scoring, selection,
//! and the engine that drives them for one strategy.
use std::collections::BTreeSet;

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::program::{
    AdjacencyTable, BuildingType, PlacementConstraint, PlacementPriority, ProgramRoom, RoomRule,
    RuleProvider, Zone,
};

pub mod candidates;
pub mod circulation;
pub mod config;
pub mod engine;
pub mod events;
pub mod grid;
pub mod metrics;
pub mod scoring;
pub mod selection;

/// Which exterior edge holds the main entry.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EntrySide {
    /// The `y = 0` edge.
    #[default]
    South,
    /// The `y = depth` edge.
    North,
    /// The `x = 0` edge.
    West,
    /// The `x = width` edge.
    East,
}

impl EntrySide {
    pub fn opposite(self) -> Self {
        match self {
            EntrySide::South => EntrySide::North,
            EntrySide::North => EntrySide::South,
            EntrySide::West => EntrySide::East,
            EntrySide::East => EntrySide::West,
        }
    }

    /// Whether the edge runs along the x axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, EntrySide::South | EntrySide::North)
    }
}

/// Circulation and zoning topology used for one scheme.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementStrategy {
    Linear,
    DoubleLoaded,
    Cluster,
    LShape,
    UShape,
    Perimeter,
}

impl PlacementStrategy {
    pub const ALL: [PlacementStrategy; 6] = [
        PlacementStrategy::Linear,
        PlacementStrategy::DoubleLoaded,
        PlacementStrategy::Cluster,
        PlacementStrategy::LShape,
        PlacementStrategy::UShape,
        PlacementStrategy::Perimeter,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PlacementStrategy::Linear => "linear",
            PlacementStrategy::DoubleLoaded => "double-loaded",
            PlacementStrategy::Cluster => "cluster",
            PlacementStrategy::LShape => "l-shape",
            PlacementStrategy::UShape => "u-shape",
            PlacementStrategy::Perimeter => "perimeter",
        }
    }
}

impl std::fmt::Display for PlacementStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The rectangular envelope rooms are placed into.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Building {
    pub width: f32,
    pub depth: f32,
    pub building_type: BuildingType,
    pub entry_side: EntrySide,
}

impl Building {
    pub fn new(width: f32, depth: f32) -> Self {
        Self {
            width,
            depth,
            building_type: BuildingType::Other,
            entry_side: EntrySide::South,
        }
    }

    pub fn with_building_type(mut self, building_type: BuildingType) -> Self {
        self.building_type = building_type;
        self
    }

    pub fn with_entry_side(mut self, entry_side: EntrySide) -> Self {
        self.entry_side = entry_side;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite()
            && self.width > 0.0
            && self.depth.is_finite()
            && self.depth > 0.0)
        {
            return Err(Error::InvalidEnvelope {
                width: self.width,
                depth: self.depth,
            });
        }
        Ok(())
    }

    pub fn area(&self) -> f32 {
        self.width * self.depth
    }

    /// Width over depth.
    pub fn aspect_ratio(&self) -> f32 {
        if self.depth > 0.0 {
            self.width / self.depth
        } else {
            0.0
        }
    }

    pub fn max_dimension(&self) -> f32 {
        self.width.max(self.depth)
    }

    /// Midpoint of the entry edge.
    pub fn entry_point(&self) -> Vec2 {
        match self.entry_side {
            EntrySide::South => Vec2::new(self.width * 0.5, 0.0),
            EntrySide::North => Vec2::new(self.width * 0.5, self.depth),
            EntrySide::West => Vec2::new(0.0, self.depth * 0.5),
            EntrySide::East => Vec2::new(self.width, self.depth * 0.5),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.depth)
    }
}

/// A circulation rectangle established before rooms are placed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corridor {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub depth: f32,
    pub is_primary: bool,
}

impl Corridor {
    pub fn new(x: f32, y: f32, width: f32, depth: f32, is_primary: bool) -> Self {
        Self {
            x,
            y,
            width,
            depth,
            is_primary,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.depth)
    }

    pub fn area(&self) -> f32 {
        self.width * self.depth
    }
}

/// A program room with its rule data resolved for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomProfile {
    pub name: String,
    pub base_name: String,
    pub width: f32,
    pub depth: f32,
    pub zone: Zone,
    pub priority: PlacementPriority,
    pub rule: RoomRule,
    /// Sum of absolute adjacency strengths touching the room.
    pub adjacency_weight: u32,
}

impl RoomProfile {
    /// Ask the provider about `room` (by its base name).
    pub fn resolve(
        room: &ProgramRoom,
        building_type: BuildingType,
        rules: &dyn RuleProvider,
        adjacency: &AdjacencyTable,
    ) -> Self {
        Self {
            name: room.name.clone(),
            base_name: room.base_name.clone(),
            width: room.width,
            depth: room.depth,
            zone: rules.room_zone(building_type, &room.base_name),
            priority: rules.placement_priority(building_type, &room.base_name),
            rule: rules.room_rule(building_type, &room.base_name),
            adjacency_weight: adjacency.total_weight(&room.base_name),
        }
    }

    /// Footprint of the room with its lower-left corner at `position`.
    pub fn rect_at(&self, position: Vec2) -> Rect {
        Rect::from_min_size(position, Vec2::new(self.width, self.depth))
    }

    pub fn has(&self, constraint: PlacementConstraint) -> bool {
        self.rule.has(constraint)
    }
}

/// A committed room.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedRoom {
    /// Program-unique name.
    pub name: String,
    /// Name used for rule lookups.
    pub base_name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub depth: f32,
    pub zone: Zone,
    pub has_exterior_wall: bool,
    /// Rooms this one has a door to.
    pub connected_to: BTreeSet<String>,
}

impl PlacedRoom {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.depth)
    }

    pub fn area(&self) -> f32 {
        self.width * self.depth
    }

    pub fn is_connected_to(&self, name: &str) -> bool {
        self.connected_to.contains(name)
    }
}
