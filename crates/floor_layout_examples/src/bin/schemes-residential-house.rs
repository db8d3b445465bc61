use floor_layout::prelude::*;
use floor_layout_examples::{
    init_tracing, print_scheme, residential_program, residential_rules, PlanStyle,
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let rules = residential_rules();
    let building = Building::new(56.0, 48.0)
        .with_building_type(BuildingType::Residential)
        .with_entry_side(EntrySide::West);
    let program = RoomProgram::try_from_requests(&residential_program())?;

    let generator = SchemeGenerator::try_new(
        LayoutConfig::default().with_linear_corridor_side(CorridorSide::Opposite),
        SchemeConfig::default(),
        &rules,
    )?;

    let mut ranked = VecSink::only([LayoutEventKind::SchemeRanked, LayoutEventKind::Warning]);
    let schemes = generator.generate_with_events(&building, &program, 6, &mut ranked);
    tracing::info!("Collected {} ranking event(s).", ranked.len());

    let style = PlanStyle {
        cell_size: 1.0,
        ..PlanStyle::default()
    };
    for (i, scheme) in schemes.iter().enumerate() {
        print_scheme(i + 1, scheme, &style);
    }
    Ok(())
}
