//! Rule providers: the adjacency table, zone classifier and room-sizing rules.
//!
//! The engine never owns rule data. It asks a [`RuleProvider`] once per run and
//! caches adjacency strengths in an [`AdjacencyTable`] for symmetric lookup.
use std::collections::HashMap;

use tracing::debug;

use crate::program::{
    AdjacencyRule, AdjacencyStrength, BuildingType, PlacementPriority, RoomRule, Zone,
};

/// Source of rule data for a building type.
pub trait RuleProvider: Send + Sync {
    /// Pairwise relationship rules for the building type.
    fn adjacencies(&self, building_type: BuildingType) -> Vec<AdjacencyRule>;

    /// Zone of a room, looked up by its base name.
    fn room_zone(&self, building_type: BuildingType, room_name: &str) -> Zone;

    /// Coarse placement priority of a room.
    fn placement_priority(&self, building_type: BuildingType, room_name: &str)
        -> PlacementPriority;

    /// Daylight need and hard constraints of a room.
    fn room_rule(&self, building_type: BuildingType, room_name: &str) -> RoomRule;
}

/// In-memory rule tables, applied to every building type.
///
/// Names without an entry fall back to the configured defaults
/// (`SemiPublic`, `Middle`, no daylight need, no constraints).
#[derive(Clone, Debug)]
pub struct TableRules {
    adjacencies: Vec<AdjacencyRule>,
    zones: HashMap<String, Zone>,
    priorities: HashMap<String, PlacementPriority>,
    room_rules: HashMap<String, RoomRule>,
    default_zone: Zone,
    default_priority: PlacementPriority,
}

impl Default for TableRules {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRules {
    pub fn new() -> Self {
        Self {
            adjacencies: Vec::new(),
            zones: HashMap::new(),
            priorities: HashMap::new(),
            room_rules: HashMap::new(),
            default_zone: Zone::SemiPublic,
            default_priority: PlacementPriority::Middle,
        }
    }

    /// Add an adjacency rule.
    pub fn with_adjacency(
        mut self,
        room_a: impl Into<String>,
        room_b: impl Into<String>,
        strength: AdjacencyStrength,
    ) -> Self {
        self.adjacencies
            .push(AdjacencyRule::new(room_a, room_b, strength));
        self
    }

    /// Classify a room: zone and placement priority.
    pub fn with_room(
        mut self,
        name: impl Into<String>,
        zone: Zone,
        priority: PlacementPriority,
    ) -> Self {
        let name = name.into();
        self.zones.insert(name.clone(), zone);
        self.priorities.insert(name, priority);
        self
    }

    /// Set the sizing rule (daylight and constraints) of a room.
    pub fn with_room_rule(mut self, name: impl Into<String>, rule: RoomRule) -> Self {
        self.room_rules.insert(name.into(), rule);
        self
    }

    pub fn with_default_zone(mut self, zone: Zone) -> Self {
        self.default_zone = zone;
        self
    }

    pub fn with_default_priority(mut self, priority: PlacementPriority) -> Self {
        self.default_priority = priority;
        self
    }
}

impl RuleProvider for TableRules {
    fn adjacencies(&self, _building_type: BuildingType) -> Vec<AdjacencyRule> {
        self.adjacencies.clone()
    }

    fn room_zone(&self, _building_type: BuildingType, room_name: &str) -> Zone {
        self.zones
            .get(room_name)
            .copied()
            .unwrap_or(self.default_zone)
    }

    fn placement_priority(
        &self,
        _building_type: BuildingType,
        room_name: &str,
    ) -> PlacementPriority {
        self.priorities
            .get(room_name)
            .copied()
            .unwrap_or(self.default_priority)
    }

    fn room_rule(&self, _building_type: BuildingType, room_name: &str) -> RoomRule {
        self.room_rules.get(room_name).cloned().unwrap_or_default()
    }
}

/// Symmetric adjacency lookup built from a provider's rule list.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyTable {
    strengths: HashMap<(String, String), AdjacencyStrength>,
    weights: HashMap<String, u32>,
    rules: Vec<AdjacencyRule>,
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_owned(), b.to_owned())
    } else {
        (b.to_owned(), a.to_owned())
    }
}

impl AdjacencyTable {
    /// Build the table. When a pair is listed more than once the last rule wins.
    pub fn from_rules(rules: Vec<AdjacencyRule>) -> Self {
        let mut strengths = HashMap::with_capacity(rules.len());
        for rule in &rules {
            let key = pair_key(&rule.room_a, &rule.room_b);
            if let Some(previous) = strengths.insert(key, rule.strength) {
                if previous != rule.strength {
                    debug!(
                        "Adjacency rule {}/{} redefined: {:?} -> {:?}.",
                        rule.room_a, rule.room_b, previous, rule.strength
                    );
                }
            }
        }

        let mut weights: HashMap<String, u32> = HashMap::new();
        for ((a, b), strength) in &strengths {
            *weights.entry(a.clone()).or_default() += strength.weight();
            if a != b {
                *weights.entry(b.clone()).or_default() += strength.weight();
            }
        }

        let mut deduped: Vec<AdjacencyRule> = strengths
            .iter()
            .map(|((a, b), s)| AdjacencyRule::new(a.clone(), b.clone(), *s))
            .collect();
        deduped.sort_by(|x, y| (&x.room_a, &x.room_b).cmp(&(&y.room_a, &y.room_b)));

        Self {
            strengths,
            weights,
            rules: deduped,
        }
    }

    /// Strength between two base names, regardless of order.
    pub fn strength(&self, a: &str, b: &str) -> AdjacencyStrength {
        self.strengths
            .get(&pair_key(a, b))
            .copied()
            .unwrap_or(AdjacencyStrength::Neutral)
    }

    /// Sum of absolute strengths of every rule touching `name`.
    pub fn total_weight(&self, name: &str) -> u32 {
        self.weights.get(name).copied().unwrap_or(0)
    }

    /// One rule per unordered pair, sorted by name for deterministic iteration.
    pub fn rules(&self) -> &[AdjacencyRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
