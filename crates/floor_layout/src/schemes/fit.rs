//! Strategy fit: how well a placement strategy suits an envelope and program
//! before any room is placed.
use tracing::trace;

use crate::layout::{Building, PlacementStrategy};
use crate::program::BuildingType;
use crate::schemes::SchemeConfig;

impl PlacementStrategy {
    /// Width-over-depth range the strategy is comfortable with.
    pub fn aspect_band(self) -> (f32, f32) {
        match self {
            PlacementStrategy::Linear => (2.0, 4.0),
            PlacementStrategy::DoubleLoaded => (1.5, 3.0),
            PlacementStrategy::Cluster => (0.75, 1.5),
            PlacementStrategy::LShape => (1.0, 2.0),
            PlacementStrategy::UShape => (1.2, 2.2),
            PlacementStrategy::Perimeter => (0.8, 1.3),
        }
    }

    /// Net-to-gross ratio the strategy usually achieves.
    pub fn typical_efficiency(self) -> f32 {
        match self {
            PlacementStrategy::Linear => 0.80,
            PlacementStrategy::DoubleLoaded => 0.85,
            PlacementStrategy::Cluster => 0.75,
            PlacementStrategy::LShape => 0.78,
            PlacementStrategy::UShape => 0.70,
            PlacementStrategy::Perimeter => 0.82,
        }
    }
}

/// Bonus for strategies that suit a building use.
pub fn building_type_bonus(building_type: BuildingType, strategy: PlacementStrategy) -> f32 {
    use BuildingType as B;
    use PlacementStrategy as S;
    match (building_type, strategy) {
        (B::Office, S::DoubleLoaded) => 15.0,
        (B::Office, S::Cluster) => 10.0,
        (B::Healthcare, S::DoubleLoaded) => 20.0,
        (B::Healthcare, S::Linear) => 10.0,
        (B::Residential, S::Cluster) => 15.0,
        (B::Residential, S::LShape) => 10.0,
        (B::Residential, S::UShape) => 5.0,
        (B::Education, S::DoubleLoaded) => 15.0,
        (B::Education, S::LShape) => 10.0,
        (B::Retail, S::Perimeter) => 15.0,
        (B::Retail, S::Linear) => 5.0,
        (B::Hospitality, S::DoubleLoaded) => 15.0,
        (B::Hospitality, S::UShape) => 10.0,
        _ => 0.0,
    }
}

/// Aspect-ratio term: a flat bonus inside the band, a linear penalty outside.
fn aspect_term(aspect: f32, band: (f32, f32), config: &SchemeConfig) -> f32 {
    let (lo, hi) = band;
    if aspect >= lo && aspect <= hi {
        config.aspect_bonus
    } else {
        let distance = if aspect < lo { lo - aspect } else { aspect - hi };
        -config.aspect_penalty_per_unit * distance
    }
}

/// Fit score of `strategy` for `building` with `program_area` square feet of
/// requested rooms.
pub fn fit_score(
    strategy: PlacementStrategy,
    building: &Building,
    program_area: f32,
    config: &SchemeConfig,
) -> f32 {
    let mut score = config.fit_base;
    score += aspect_term(building.aspect_ratio(), strategy.aspect_band(), config);
    score += building_type_bonus(building.building_type, strategy);

    let envelope = building.area();
    if envelope > 0.0 && program_area > config.tight_program_threshold * envelope {
        score += config.tight_bonus_factor * strategy.typical_efficiency();
    } else if matches!(
        strategy,
        PlacementStrategy::UShape | PlacementStrategy::Perimeter
    ) {
        score += config.slack_bonus;
    }
    score
}

/// The `count` best-fitting strategies, highest fit first. Equal fits keep
/// catalogue order.
pub fn select_strategies(
    building: &Building,
    program_area: f32,
    count: usize,
    config: &SchemeConfig,
) -> Vec<(PlacementStrategy, f32)> {
    let mut scored: Vec<(PlacementStrategy, f32)> = PlacementStrategy::ALL
        .iter()
        .map(|&s| (s, fit_score(s, building, program_area, config)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(count.min(PlacementStrategy::ALL.len()));
    trace!("Selected strategies: {:?}.", scored);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SchemeConfig {
        SchemeConfig::default()
    }

    #[test]
    fn aspect_band_bonus_and_penalty() {
        let c = config();
        // 100 x 40 -> aspect 2.5, inside the linear band.
        let long = Building::new(100.0, 40.0);
        assert_eq!(fit_score(PlacementStrategy::Linear, &long, 0.0, &c), 70.0);
        // Cluster band tops out at 1.5: one unit beyond costs 20.
        assert_eq!(fit_score(PlacementStrategy::Cluster, &long, 0.0, &c), 30.0);
    }

    #[test]
    fn building_type_bonuses_apply() {
        let c = config();
        let office = Building::new(60.0, 30.0).with_building_type(BuildingType::Office);
        let healthcare = office.with_building_type(BuildingType::Healthcare);
        let dl_office = fit_score(PlacementStrategy::DoubleLoaded, &office, 0.0, &c);
        let dl_health = fit_score(PlacementStrategy::DoubleLoaded, &healthcare, 0.0, &c);
        assert_eq!(dl_office, 85.0);
        assert_eq!(dl_health, 90.0);
        assert_eq!(
            building_type_bonus(BuildingType::Other, PlacementStrategy::Linear),
            0.0
        );
    }

    #[test]
    fn tight_programs_favor_efficient_strategies() {
        let c = config();
        let square = Building::new(40.0, 40.0);
        let tight = 0.8 * square.area();
        let slack = 0.5 * square.area();
        let perimeter_tight = fit_score(PlacementStrategy::Perimeter, &square, tight, &c);
        let perimeter_slack = fit_score(PlacementStrategy::Perimeter, &square, slack, &c);
        assert!((perimeter_tight - (50.0 + 20.0 + 8.2)).abs() < 1e-4);
        assert_eq!(perimeter_slack, 75.0);
        let cluster_slack = fit_score(PlacementStrategy::Cluster, &square, slack, &c);
        assert_eq!(cluster_slack, 70.0);
    }

    #[test]
    fn selection_is_ordered_and_clamped() {
        let c = config();
        let office = Building::new(60.0, 30.0).with_building_type(BuildingType::Office);
        let top = select_strategies(&office, 0.0, 2, &c);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, PlacementStrategy::DoubleLoaded);
        assert!(top[0].1 >= top[1].1);
        assert_eq!(select_strategies(&office, 0.0, 99, &c).len(), 6);
        assert!(select_strategies(&office, 0.0, 0, &c).is_empty());
    }
}
