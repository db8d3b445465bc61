//! Event types and sinks for observing layout runs.
//!
//! This module defines [`LayoutEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while running a placement via
//! [`crate::layout::engine::LayoutEngine`] or generating schemes via
//! [`crate::schemes::SchemeGenerator`].
use crate::layout::candidates::{CandidateSource, PlacementMode};
use crate::layout::engine::{LayoutPhase, SkipReason};
use crate::layout::metrics::LayoutMetrics;
use crate::layout::{Building, Corridor, PlacedRoom, PlacementStrategy};

/// Describes events emitted by layout operations.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum LayoutEvent {
    /// Emitted when a placement run starts for one strategy.
    RunStarted {
        strategy: PlacementStrategy,
        building: Building,
        /// Number of rooms in the normalized program.
        room_count: usize,
    },

    /// Emitted on every engine state transition.
    PhaseEntered {
        strategy: PlacementStrategy,
        phase: LayoutPhase,
    },

    /// Emitted once the strategy's corridors are in the grid.
    CorridorsEstablished {
        strategy: PlacementStrategy,
        corridors: Vec<Corridor>,
    },

    /// Emitted with the resolved room placement order.
    PlacementOrderResolved {
        strategy: PlacementStrategy,
        order: Vec<String>,
    },

    /// Emitted after candidate generation for a room.
    CandidatesGenerated {
        strategy: PlacementStrategy,
        room: String,
        mode: PlacementMode,
        source: CandidateSource,
        /// Positions that survived filtering.
        count: usize,
    },

    /// Emitted when a room is committed.
    RoomPlaced {
        strategy: PlacementStrategy,
        room: PlacedRoom,
        /// Winning position score.
        score: f32,
    },

    /// Emitted when a room could not be placed.
    RoomSkipped {
        strategy: PlacementStrategy,
        room: String,
        reason: SkipReason,
    },

    /// Emitted after the connection pass.
    ConnectionsResolved {
        strategy: PlacementStrategy,
        /// Number of unordered room pairs that received a door.
        connections: usize,
    },

    /// Emitted when a placement run finishes.
    RunFinished {
        strategy: PlacementStrategy,
        metrics: LayoutMetrics,
    },

    /// Emitted once per scheme after ranking, best first.
    SchemeRanked {
        rank: usize,
        strategy: PlacementStrategy,
        fit_score: f32,
        composite_score: f32,
    },

    /// Non-fatal warning generated during layout.
    Warning {
        /// Context string (e.g. strategy, room name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`LayoutEvent`], used by sinks to filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutEventKind {
    RunStarted,
    PhaseEntered,
    CorridorsEstablished,
    PlacementOrderResolved,
    CandidatesGenerated,
    RoomPlaced,
    RoomSkipped,
    ConnectionsResolved,
    RunFinished,
    SchemeRanked,
    Warning,
}

impl LayoutEvent {
    pub fn kind(&self) -> LayoutEventKind {
        match self {
            LayoutEvent::RunStarted { .. } => LayoutEventKind::RunStarted,
            LayoutEvent::PhaseEntered { .. } => LayoutEventKind::PhaseEntered,
            LayoutEvent::CorridorsEstablished { .. } => LayoutEventKind::CorridorsEstablished,
            LayoutEvent::PlacementOrderResolved { .. } => LayoutEventKind::PlacementOrderResolved,
            LayoutEvent::CandidatesGenerated { .. } => LayoutEventKind::CandidatesGenerated,
            LayoutEvent::RoomPlaced { .. } => LayoutEventKind::RoomPlaced,
            LayoutEvent::RoomSkipped { .. } => LayoutEventKind::RoomSkipped,
            LayoutEvent::ConnectionsResolved { .. } => LayoutEventKind::ConnectionsResolved,
            LayoutEvent::RunFinished { .. } => LayoutEventKind::RunFinished,
            LayoutEvent::SchemeRanked { .. } => LayoutEventKind::SchemeRanked,
            LayoutEvent::Warning { .. } => LayoutEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`LayoutEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: LayoutEvent);

    /// Whether events of `kind` should be built at all. Emitters check this
    /// before constructing an event.
    #[inline]
    fn wants(&self, _kind: LayoutEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = LayoutEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: LayoutEvent) {}

    #[inline]
    fn wants(&self, _kind: LayoutEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to a
/// set of kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<LayoutEvent>,
    only: Option<Vec<LayoutEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            only: None,
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
            only: None,
        }
    }

    /// Collect only events of the given kinds.
    pub fn only(kinds: impl IntoIterator<Item = LayoutEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<LayoutEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[LayoutEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: LayoutEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: LayoutEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn sinks(&self) -> &[S] {
        &self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: LayoutEvent) {
        let kind = event.kind();
        let targets: Vec<usize> = (0..self.sinks.len())
            .filter(|&i| self.sinks[i].wants(kind))
            .collect();
        let Some((&last, rest)) = targets.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: LayoutEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

/// Minimal adapter trait for types that can expose an [`EventSink`].
pub trait AsEventSink {
    fn as_event_sink(&mut self) -> &mut dyn EventSink;
}

impl<S: EventSink> AsEventSink for S {
    fn as_event_sink(&mut self) -> &mut dyn EventSink {
        self
    }
}
