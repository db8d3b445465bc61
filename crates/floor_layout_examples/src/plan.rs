use std::fmt::Write as _;

use floor_layout::prelude::{Corridor, LayoutMetrics, PlacedRoom, Scheme};

/// Character grid settings for [`render_plan`].
#[derive(Clone, Debug)]
pub struct PlanStyle {
    /// Feet per character cell.
    pub cell_size: f32,
    pub empty: char,
    pub corridor: char,
}

impl Default for PlanStyle {
    fn default() -> Self {
        Self {
            cell_size: 2.0,
            empty: '.',
            corridor: '#',
        }
    }
}

fn label(index: usize) -> char {
    const LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    LABELS.get(index).map(|b| *b as char).unwrap_or('?')
}

/// Draw the plan with north at the top, followed by a room legend.
pub fn render_plan(
    width: f32,
    depth: f32,
    corridors: &[Corridor],
    rooms: &[PlacedRoom],
    style: &PlanStyle,
) -> String {
    let cell = style.cell_size.max(0.1);
    let cols = (width / cell).ceil().max(0.0) as usize;
    let rows = (depth / cell).ceil().max(0.0) as usize;

    let mut out = String::new();
    for row in (0..rows).rev() {
        let y = (row as f32 + 0.5) * cell;
        for col in 0..cols {
            let x = (col as f32 + 0.5) * cell;
            let inside = |min_x: f32, min_y: f32, w: f32, d: f32| {
                x >= min_x && x < min_x + w && y >= min_y && y < min_y + d
            };
            let ch = rooms
                .iter()
                .position(|r| inside(r.x, r.y, r.width, r.depth))
                .map(label)
                .or_else(|| {
                    corridors
                        .iter()
                        .any(|c| inside(c.x, c.y, c.width, c.depth))
                        .then_some(style.corridor)
                })
                .unwrap_or(style.empty);
            out.push(ch);
        }
        out.push('\n');
    }

    for (i, room) in rooms.iter().enumerate() {
        let _ = write!(
            out,
            "  {} {:<14} {:>5.1} x {:<5.1} at ({:.1}, {:.1})",
            label(i),
            room.name,
            room.width,
            room.depth,
            room.x,
            room.y
        );
        if room.has_exterior_wall {
            out.push_str(" [exterior]");
        }
        if !room.connected_to.is_empty() {
            let doors: Vec<&str> = room.connected_to.iter().map(String::as_str).collect();
            let _ = write!(out, " doors: {}", doors.join(", "));
        }
        out.push('\n');
    }
    out
}

pub fn format_metrics(metrics: &LayoutMetrics) -> String {
    format!(
        "efficiency {:.0}% | circulation {:.0}% | adjacency {:.0}% ({}/{}) | daylight {:.0}% | placed {}/{}",
        metrics.efficiency * 100.0,
        metrics.circulation_ratio * 100.0,
        metrics.adjacency_satisfaction * 100.0,
        metrics.rules_satisfied,
        metrics.rules_evaluated,
        metrics.daylight_ratio * 100.0,
        metrics.placed_count,
        metrics.requested_count,
    )
}

/// Print a ranked scheme with its summary and plan.
pub fn print_scheme(rank: usize, scheme: &Scheme, style: &PlanStyle) {
    println!(
        "#{rank} {} (composite {:.3}, fit {:.1})",
        scheme.strategy, scheme.composite_score, scheme.fit_score
    );
    println!("  {}", format_metrics(&scheme.metrics));
    for s in &scheme.strengths {
        println!("  + {s}");
    }
    for t in &scheme.tradeoffs {
        println!("  - {t}");
    }
    print!(
        "{}",
        render_plan(
            scheme.building_width,
            scheme.building_depth,
            &scheme.corridors,
            &scheme.placed_rooms,
            style,
        )
    );
    println!();
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use floor_layout::prelude::Zone;

    use super::*;

    #[test]
    fn plan_draws_rooms_corridors_and_legend() {
        let rooms = vec![PlacedRoom {
            name: "Office".into(),
            base_name: "Office".into(),
            x: 0.0,
            y: 0.0,
            width: 4.0,
            depth: 2.0,
            zone: Zone::Private,
            has_exterior_wall: true,
            connected_to: BTreeSet::new(),
        }];
        let corridors = vec![Corridor::new(0.0, 2.0, 8.0, 2.0, true)];
        let plan = render_plan(8.0, 4.0, &corridors, &rooms, &PlanStyle::default());
        let lines: Vec<&str> = plan.lines().collect();
        assert_eq!(lines[0], "####");
        assert_eq!(lines[1], "AA..");
        assert!(lines[2].contains("Office") && lines[2].contains("[exterior]"));
    }
}
