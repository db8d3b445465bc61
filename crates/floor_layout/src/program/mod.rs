//! Room programs and the rule data that describes them.
//!
//! A room program is the abstract input to the engine: named rectangles with no
//! position. Everything the engine knows about a room beyond its size comes from
//! a [`rules::RuleProvider`]: its [`Zone`], [`PlacementPriority`], [`RoomRule`]
//! and its [`AdjacencyRule`]s with the other rooms.
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod normalize;
pub mod rules;

pub use normalize::{normalize_program, validate_program, ProgramRoom, RoomProgram};
pub use rules::{AdjacencyTable, RuleProvider, TableRules};

/// A requested room: a name and a footprint in feet.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct RoomRequest {
    pub name: String,
    pub width: f32,
    pub depth: f32,
}

impl RoomRequest {
    pub fn new(name: impl Into<String>, width: f32, depth: f32) -> Self {
        Self {
            name: name.into(),
            width,
            depth,
        }
    }

    pub fn area(&self) -> f32 {
        self.width * self.depth
    }
}

/// Coarse functional category of a room.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    Public,
    SemiPublic,
    Private,
    Service,
}

impl Zone {
    /// Placement order rank; public rooms are placed first.
    pub fn rank(self) -> u8 {
        match self {
            Zone::Public => 0,
            Zone::SemiPublic => 1,
            Zone::Private => 2,
            Zone::Service => 3,
        }
    }
}

/// Where in the envelope a room would ideally sit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlacementPriority {
    NearEntry,
    Perimeter,
    Middle,
    Core,
    Back,
}

impl PlacementPriority {
    pub fn rank(self) -> u8 {
        match self {
            PlacementPriority::NearEntry => 0,
            PlacementPriority::Perimeter => 1,
            PlacementPriority::Middle => 2,
            PlacementPriority::Core => 3,
            PlacementPriority::Back => 4,
        }
    }
}

/// Whether a room must, should, or need not touch an exterior wall.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DaylightRequirement {
    Required,
    Preferred,
    #[default]
    NotRequired,
}

/// Hard placement constraints a room rule can carry.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlacementConstraint {
    /// Only positions flush with an exterior edge.
    Perimeter,
    /// Only positions inset from every exterior edge.
    Core,
    /// Prefers sharing a wall with other plumbing rooms.
    PlumbingCluster,
    /// Prefers a building corner.
    Corner,
}

/// Sizing-rule data for one room: daylight need and hard constraints.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomRule {
    pub daylight: DaylightRequirement,
    pub constraints: BTreeSet<PlacementConstraint>,
}

impl RoomRule {
    pub fn new(daylight: DaylightRequirement) -> Self {
        Self {
            daylight,
            constraints: BTreeSet::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: PlacementConstraint) -> Self {
        self.constraints.insert(constraint);
        self
    }

    pub fn has(&self, constraint: PlacementConstraint) -> bool {
        self.constraints.contains(&constraint)
    }
}

/// Signed strength of a pairwise room relationship.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AdjacencyStrength {
    MustSeparate,
    ShouldSeparate,
    #[default]
    Neutral,
    PreferNear,
    ShouldAdjacent,
    MustConnect,
}

impl AdjacencyStrength {
    pub fn value(self) -> i8 {
        match self {
            AdjacencyStrength::MustSeparate => -2,
            AdjacencyStrength::ShouldSeparate => -1,
            AdjacencyStrength::Neutral => 0,
            AdjacencyStrength::PreferNear => 1,
            AdjacencyStrength::ShouldAdjacent => 2,
            AdjacencyStrength::MustConnect => 3,
        }
    }

    pub fn from_value(value: i8) -> Option<Self> {
        match value {
            -2 => Some(AdjacencyStrength::MustSeparate),
            -1 => Some(AdjacencyStrength::ShouldSeparate),
            0 => Some(AdjacencyStrength::Neutral),
            1 => Some(AdjacencyStrength::PreferNear),
            2 => Some(AdjacencyStrength::ShouldAdjacent),
            3 => Some(AdjacencyStrength::MustConnect),
            _ => None,
        }
    }

    /// Contribution to a room's total adjacency weight.
    pub fn weight(self) -> u32 {
        self.value().unsigned_abs() as u32
    }

    pub fn wants_proximity(self) -> bool {
        self.value() > 0
    }

    pub fn wants_separation(self) -> bool {
        self.value() < 0
    }

    /// Strong enough for a door when the rooms share a wall.
    pub fn is_door_capable(self) -> bool {
        self >= AdjacencyStrength::ShouldAdjacent
    }
}

/// A symmetric relationship between two room names.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyRule {
    pub room_a: String,
    pub room_b: String,
    pub strength: AdjacencyStrength,
}

impl AdjacencyRule {
    pub fn new(
        room_a: impl Into<String>,
        room_b: impl Into<String>,
        strength: AdjacencyStrength,
    ) -> Self {
        Self {
            room_a: room_a.into(),
            room_b: room_b.into(),
            strength,
        }
    }

    pub fn involves(&self, name: &str) -> bool {
        self.room_a == name || self.room_b == name
    }
}

/// Building use, passed through to the rule provider and used for strategy fit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BuildingType {
    Residential,
    Office,
    Healthcare,
    Education,
    Retail,
    Hospitality,
    #[default]
    Other,
}
