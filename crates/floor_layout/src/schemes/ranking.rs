//! Composite scoring, ranking and the human-readable summary of a scheme.
use crate::layout::metrics::LayoutMetrics;
use crate::layout::PlacementStrategy;
use crate::schemes::{CompositeWeights, Scheme};

/// Weighted sum of the four headline metrics.
pub fn composite_score(metrics: &LayoutMetrics, weights: &CompositeWeights) -> f32 {
    weights.efficiency * metrics.efficiency
        + weights.adjacency * metrics.adjacency_satisfaction
        + weights.daylight * metrics.daylight_ratio
        + weights.placement * metrics.placement_success
}

/// Sort schemes by composite score, best first. The sort is stable, so
/// re-ranking an already ranked list leaves it unchanged.
pub fn rank_schemes(schemes: &mut [Scheme]) {
    schemes.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));
}

fn percent(value: f32) -> u32 {
    (value * 100.0).round() as u32
}

/// What the scheme does well.
pub fn describe_strengths(strategy: PlacementStrategy, metrics: &LayoutMetrics) -> Vec<String> {
    let mut out = Vec::new();
    if metrics.placed_count > 0 && metrics.placement_success >= 1.0 {
        out.push("All requested rooms placed".to_string());
    }
    if metrics.efficiency >= 0.6 {
        out.push(format!("High space efficiency ({}%)", percent(metrics.efficiency)));
    }
    if metrics.rules_evaluated > 0 && metrics.adjacency_satisfaction >= 0.8 {
        out.push(format!(
            "Strong adjacency satisfaction ({}%)",
            percent(metrics.adjacency_satisfaction)
        ));
    }
    if metrics.placed_count > 0 && metrics.daylight_ratio >= 0.8 {
        out.push(format!(
            "Daylight for {}% of rooms",
            percent(metrics.daylight_ratio)
        ));
    }
    out.push(
        match strategy {
            PlacementStrategy::Linear => "Simple single-corridor circulation",
            PlacementStrategy::DoubleLoaded => "Rooms on both sides of one corridor",
            PlacementStrategy::Cluster => "Rooms grouped around shared circulation",
            PlacementStrategy::LShape => "Two wings allow zoning separation",
            PlacementStrategy::UShape => "Courtyard brings light to inner faces",
            PlacementStrategy::Perimeter => "Maximizes exterior wall exposure",
        }
        .to_string(),
    );
    out
}

/// What the scheme gives up.
pub fn describe_tradeoffs(strategy: PlacementStrategy, metrics: &LayoutMetrics) -> Vec<String> {
    let mut out = Vec::new();
    let missing = metrics.requested_count.saturating_sub(metrics.placed_count);
    if missing > 0 {
        out.push(format!("{missing} room(s) could not be placed"));
    }
    if metrics.rules_evaluated > 0 && metrics.adjacency_satisfaction < 0.5 {
        out.push(format!(
            "Weak adjacency satisfaction ({}%)",
            percent(metrics.adjacency_satisfaction)
        ));
    }
    if metrics.placed_count > 0 && metrics.daylight_ratio < 0.5 {
        out.push(format!(
            "{}% of rooms lack an exterior wall",
            percent(1.0 - metrics.daylight_ratio)
        ));
    }
    if metrics.circulation_ratio > 0.2 {
        out.push(format!(
            "Circulation takes {}% of the floor",
            percent(metrics.circulation_ratio)
        ));
    }
    out.push(
        match strategy {
            PlacementStrategy::Linear => "Long travel distances along the corridor",
            PlacementStrategy::DoubleLoaded => "Corridor-side rooms may lack daylight",
            PlacementStrategy::Cluster => "Central corridor limits room depth",
            PlacementStrategy::LShape => "Corridor spur adds circulation area",
            PlacementStrategy::UShape => "Courtyard reduces usable floor area",
            PlacementStrategy::Perimeter => "No dedicated circulation path",
        }
        .to_string(),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(eff: f32, adj: f32, day: f32, success: f32) -> LayoutMetrics {
        LayoutMetrics {
            efficiency: eff,
            circulation_ratio: 0.1,
            adjacency_satisfaction: adj,
            daylight_ratio: day,
            placement_success: success,
            placed_count: 4,
            requested_count: 4,
            rules_evaluated: 2,
            rules_satisfied: 2,
        }
    }

    #[test]
    fn composite_uses_weighted_sum() {
        let score = composite_score(&metrics(0.5, 1.0, 0.5, 1.0), &CompositeWeights::default());
        assert!((score - (0.15 + 0.35 + 0.10 + 0.15)).abs() < 1e-6);
    }

    #[test]
    fn perfect_metrics_score_one() {
        let score = composite_score(&metrics(1.0, 1.0, 1.0, 1.0), &CompositeWeights::default());
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn summaries_reflect_metrics() {
        let good = metrics(0.7, 0.9, 0.9, 1.0);
        let strengths = describe_strengths(PlacementStrategy::Perimeter, &good);
        assert!(strengths.iter().any(|s| s.contains("efficiency (70%)")));
        assert!(strengths.iter().any(|s| s.contains("All requested")));

        let mut poor = metrics(0.3, 0.25, 0.2, 0.5);
        poor.placed_count = 2;
        poor.circulation_ratio = 0.3;
        let tradeoffs = describe_tradeoffs(PlacementStrategy::Linear, &poor);
        assert!(tradeoffs.iter().any(|t| t == "2 room(s) could not be placed"));
        assert!(tradeoffs.iter().any(|t| t.contains("Weak adjacency")));
        assert!(tradeoffs.iter().any(|t| t.contains("80% of rooms")));
        assert!(tradeoffs.iter().any(|t| t.contains("30%")));
    }
}
