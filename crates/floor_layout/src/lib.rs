#![forbid(unsafe_code)]
//! floor_layout: Automated floor-plan layout with strategy-driven circulation,
//! heuristic room placement and scheme ranking.
//!
//! Modules:
//! - program: room requests, normalization, and the rule provider contract
//! - geometry: axis-aligned rectangle tests shared by every stage
//! - layout: corridors, candidate generation, scoring, the placement engine, metrics, events
//! - schemes: strategy fit, one engine run per strategy, composite ranking
//!
//! For a walkthrough, see the demos in the `floor_layout_examples` crate.
pub mod error;
pub mod geometry;
pub mod layout;
pub mod program;
pub mod schemes;

/// Convenient re-exports for common types. Import with `use floor_layout::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::geometry::Rect;
    pub use crate::layout::candidates::{CandidateSource, PlacementMode};
    pub use crate::layout::circulation::layout_corridors;
    pub use crate::layout::config::{CorridorSide, LayoutConfig, MetricThresholds, ScoringWeights};
    pub use crate::layout::engine::{
        place_rooms, try_place_rooms, LayoutEngine, LayoutPhase, LayoutResult, PlacementRecord,
        RoomOutcome, SkipReason,
    };
    pub use crate::layout::events::{
        AsEventSink, EventSink, FnSink, LayoutEvent, LayoutEventKind, MultiSink, VecSink,
    };
    pub use crate::layout::metrics::LayoutMetrics;
    pub use crate::layout::scoring::ScoreBreakdown;
    pub use crate::layout::{Building, Corridor, EntrySide, PlacedRoom, PlacementStrategy};
    pub use crate::program::{
        normalize_program, validate_program, AdjacencyRule, AdjacencyStrength, AdjacencyTable,
        BuildingType, DaylightRequirement, PlacementConstraint, PlacementPriority, RoomProgram,
        RoomRequest, RoomRule, RuleProvider, TableRules, Zone,
    };
    pub use crate::schemes::{
        generate_schemes, rank_schemes, try_generate_schemes, CompositeWeights, Scheme,
        SchemeConfig, SchemeGenerator,
    };
}
