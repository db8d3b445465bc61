use floor_layout::prelude::*;
use floor_layout_examples::{
    format_metrics, init_tracing, office_program, office_rules, render_plan, PlanStyle,
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let rules = office_rules();
    let building = Building::new(96.0, 44.0).with_building_type(BuildingType::Office);
    let program = RoomProgram::try_from_requests(&office_program())?;

    let config = LayoutConfig::default().with_corridor_width(6.0).with_step(2.0);
    let engine = LayoutEngine::try_new(config, &rules)?;

    let mut skipped = Vec::new();
    let mut sink = FnSink::new(|event| {
        if let LayoutEvent::RoomSkipped { room, reason, .. } = event {
            skipped.push((room, reason));
        }
    });
    let result =
        engine.place_with_events(&building, &program, PlacementStrategy::DoubleLoaded, &mut sink);

    println!("{}", format_metrics(&result.metrics));
    print!(
        "{}",
        render_plan(
            building.width,
            building.depth,
            &result.corridors,
            &result.placed_rooms,
            &PlanStyle::default(),
        )
    );
    for (room, reason) in &skipped {
        println!("skipped {room}: {reason:?}");
    }
    Ok(())
}
