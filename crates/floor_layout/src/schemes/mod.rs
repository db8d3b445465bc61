//! Scheme generation: pick the best-fitting strategies, run the placement
//! engine once per strategy, and rank the results.
//!
//! Every run gets its own occupancy grid and room list; only the normalized
//! program and the rule data are shared. With the `parallel` feature the runs
//! fan out over a rayon pool, and events recorded by each worker are replayed
//! into the caller's sink in strategy order, so output is identical to the
//! sequential path.
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::layout::config::LayoutConfig;
use crate::layout::engine::{run_placement, LayoutEngine, LayoutResult, RoomOutcome};
use crate::layout::events::{EventSink, LayoutEvent, LayoutEventKind, VecSink};
use crate::layout::metrics::LayoutMetrics;
use crate::layout::{Building, Corridor, PlacedRoom, PlacementStrategy};
use crate::program::{
    normalize_program, validate_program, AdjacencyTable, RoomProgram, RoomRequest, RuleProvider,
};

pub mod fit;
pub mod ranking;

pub use fit::{building_type_bonus, fit_score, select_strategies};
pub use ranking::{composite_score, rank_schemes};

/// Weights of the composite ranking score.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeWeights {
    pub efficiency: f32,
    pub adjacency: f32,
    pub daylight: f32,
    pub placement: f32,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            efficiency: 0.30,
            adjacency: 0.35,
            daylight: 0.20,
            placement: 0.15,
        }
    }
}

/// Configuration for strategy fit and scheme ranking.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SchemeConfig {
    pub weights: CompositeWeights,
    /// Fit score every strategy starts from.
    pub fit_base: f32,
    /// Added when the envelope's aspect ratio lies inside the strategy's band.
    pub aspect_bonus: f32,
    /// Subtracted per unit of aspect ratio outside the band.
    pub aspect_penalty_per_unit: f32,
    /// Program-to-envelope area ratio above which the program counts as tight.
    pub tight_program_threshold: f32,
    /// Multiplies typical efficiency for tight programs.
    pub tight_bonus_factor: f32,
    /// Added to courtyard and perimeter strategies when the program is slack.
    pub slack_bonus: f32,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            weights: CompositeWeights::default(),
            fit_base: 50.0,
            aspect_bonus: 20.0,
            aspect_penalty_per_unit: 20.0,
            tight_program_threshold: 0.75,
            tight_bonus_factor: 10.0,
            slack_bonus: 5.0,
        }
    }
}

impl SchemeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the composite ranking weights.
    pub fn with_weights(mut self, weights: CompositeWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the tight-program threshold.
    pub fn with_tight_program_threshold(mut self, threshold: f32) -> Self {
        self.tight_program_threshold = threshold;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        for (name, value) in [
            ("weights.efficiency", w.efficiency),
            ("weights.adjacency", w.adjacency),
            ("weights.daylight", w.daylight),
            ("weights.placement", w.placement),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidConfig(format!("{name} must be >= 0")));
            }
        }
        for (name, value) in [
            ("fit_base", self.fit_base),
            ("aspect_bonus", self.aspect_bonus),
            ("aspect_penalty_per_unit", self.aspect_penalty_per_unit),
            ("tight_bonus_factor", self.tight_bonus_factor),
            ("slack_bonus", self.slack_bonus),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("{name} must be finite")));
            }
        }
        if !(self.tight_program_threshold.is_finite() && self.tight_program_threshold > 0.0) {
            return Err(Error::InvalidConfig(
                "tight_program_threshold must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// One candidate layout for a program.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Scheme {
    pub strategy: PlacementStrategy,
    pub fit_score: f32,
    pub composite_score: f32,
    pub placed_rooms: Vec<PlacedRoom>,
    pub corridors: Vec<Corridor>,
    pub metrics: LayoutMetrics,
    pub outcomes: Vec<RoomOutcome>,
    pub strengths: Vec<String>,
    pub tradeoffs: Vec<String>,
    pub building_width: f32,
    pub building_depth: f32,
}

impl Scheme {
    fn from_result(result: LayoutResult, fit_score: f32, weights: &CompositeWeights) -> Self {
        let composite_score = composite_score(&result.metrics, weights);
        let strengths = ranking::describe_strengths(result.strategy, &result.metrics);
        let tradeoffs = ranking::describe_tradeoffs(result.strategy, &result.metrics);
        Self {
            strategy: result.strategy,
            fit_score,
            composite_score,
            placed_rooms: result.placed_rooms,
            corridors: result.corridors,
            metrics: result.metrics,
            outcomes: result.outcomes,
            strengths,
            tradeoffs,
            building_width: result.building.width,
            building_depth: result.building.depth,
        }
    }
}

pub struct SchemeGenerator<'a> {
    pub engine: LayoutEngine<'a>,
    pub config: SchemeConfig,
}

impl<'a> SchemeGenerator<'a> {
    pub fn try_new(
        layout: LayoutConfig,
        config: SchemeConfig,
        rules: &'a dyn RuleProvider,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engine: LayoutEngine::try_new(layout, rules)?,
            config,
        })
    }

    pub fn new(layout: LayoutConfig, config: SchemeConfig, rules: &'a dyn RuleProvider) -> Self {
        debug_assert!(
            config.tight_program_threshold > 0.0,
            "tight_program_threshold must be > 0"
        );
        Self {
            engine: LayoutEngine::new(layout, rules),
            config,
        }
    }

    /// Generates up to `count` schemes for `program`, ranked best first.
    pub fn generate(
        &self,
        building: &Building,
        program: &RoomProgram,
        count: usize,
    ) -> Vec<Scheme> {
        self.generate_inner(building, program, count, None)
    }

    pub fn generate_with_events(
        &self,
        building: &Building,
        program: &RoomProgram,
        count: usize,
        sink: &mut dyn EventSink,
    ) -> Vec<Scheme> {
        self.generate_inner(building, program, count, Some(sink))
    }

    fn generate_inner(
        &self,
        building: &Building,
        program: &RoomProgram,
        count: usize,
        sink: Option<&mut dyn EventSink>,
    ) -> Vec<Scheme> {
        if let Some(s) = sink {
            generate_with_events_internal(
                building,
                program,
                count,
                self.engine.rules,
                &self.engine.config,
                &self.config,
                s,
            )
        } else {
            generate_with_events_internal(
                building,
                program,
                count,
                self.engine.rules,
                &self.engine.config,
                &self.config,
                &mut (),
            )
        }
    }
}

/// Normalizes `requests` and generates up to `count` ranked schemes.
pub fn generate_schemes(
    building: &Building,
    requests: &[RoomRequest],
    count: usize,
    rules: &dyn RuleProvider,
    layout: &LayoutConfig,
    config: &SchemeConfig,
) -> Vec<Scheme> {
    let program = normalize_program(requests);
    generate_with_events_internal(building, &program, count, rules, layout, config, &mut ())
}

/// Validates every input, then generates ranked schemes.
pub fn try_generate_schemes(
    building: &Building,
    requests: &[RoomRequest],
    count: usize,
    rules: &dyn RuleProvider,
    layout: &LayoutConfig,
    config: &SchemeConfig,
) -> Result<Vec<Scheme>> {
    layout.validate()?;
    config.validate()?;
    building.validate()?;
    validate_program(requests)?;
    Ok(generate_schemes(building, requests, count, rules, layout, config))
}

/// Runs one strategy, recording events into a private buffer when asked.
fn run_strategy(
    building: &Building,
    program: &RoomProgram,
    strategy: PlacementStrategy,
    rules: &dyn RuleProvider,
    adjacency: &AdjacencyTable,
    layout: &LayoutConfig,
    record: bool,
) -> (LayoutResult, Vec<LayoutEvent>) {
    if record {
        let mut buffer = VecSink::new();
        let result = run_placement(
            building,
            program,
            strategy,
            rules,
            adjacency,
            layout,
            &mut buffer,
        );
        (result, buffer.into_inner())
    } else {
        let result = run_placement(building, program, strategy, rules, adjacency, layout, &mut ());
        (result, Vec::new())
    }
}

fn generate_with_events_internal(
    building: &Building,
    program: &RoomProgram,
    count: usize,
    rules: &dyn RuleProvider,
    layout: &LayoutConfig,
    config: &SchemeConfig,
    sink: &mut dyn EventSink,
) -> Vec<Scheme> {
    let selected = select_strategies(building, program.total_area(), count, config);
    if selected.is_empty() {
        warn!("No strategies selected (count = {count}); returning no schemes.");
        return Vec::new();
    }
    info!(
        "Generating {} scheme(s) for {} room(s): {:?}.",
        selected.len(),
        program.len(),
        selected.iter().map(|(s, _)| s.label()).collect::<Vec<_>>()
    );

    let adjacency = AdjacencyTable::from_rules(rules.adjacencies(building.building_type));
    let record = !is_silent(sink);

    #[cfg(feature = "parallel")]
    let runs: Vec<(LayoutResult, Vec<LayoutEvent>)> = selected
        .par_iter()
        .map(|&(strategy, _)| {
            run_strategy(building, program, strategy, rules, &adjacency, layout, record)
        })
        .collect();
    #[cfg(not(feature = "parallel"))]
    let runs: Vec<(LayoutResult, Vec<LayoutEvent>)> = selected
        .iter()
        .map(|&(strategy, _)| {
            run_strategy(building, program, strategy, rules, &adjacency, layout, record)
        })
        .collect();

    let mut schemes = Vec::with_capacity(runs.len());
    for ((result, events), &(_, fit)) in runs.into_iter().zip(&selected) {
        for event in events {
            if sink.wants(event.kind()) {
                sink.send(event);
            }
        }
        schemes.push(Scheme::from_result(result, fit, &config.weights));
    }

    rank_schemes(&mut schemes);

    for (rank, scheme) in schemes.iter().enumerate() {
        info!(
            "Rank {}: '{}' composite {:.3} (fit {:.1}).",
            rank + 1,
            scheme.strategy,
            scheme.composite_score,
            scheme.fit_score
        );
        if sink.wants(LayoutEventKind::SchemeRanked) {
            sink.send(LayoutEvent::SchemeRanked {
                rank: rank + 1,
                strategy: scheme.strategy,
                fit_score: scheme.fit_score,
                composite_score: scheme.composite_score,
            });
        }
    }
    schemes
}

/// Whether the sink discards every per-run event kind.
fn is_silent(sink: &dyn EventSink) -> bool {
    [
        LayoutEventKind::RunStarted,
        LayoutEventKind::PhaseEntered,
        LayoutEventKind::CorridorsEstablished,
        LayoutEventKind::PlacementOrderResolved,
        LayoutEventKind::CandidatesGenerated,
        LayoutEventKind::RoomPlaced,
        LayoutEventKind::RoomSkipped,
        LayoutEventKind::ConnectionsResolved,
        LayoutEventKind::RunFinished,
        LayoutEventKind::Warning,
    ]
    .iter()
    .all(|&kind| !sink.wants(kind))
}
