use floor_layout::prelude::*;
use floor_layout_examples::{init_tracing, office_program, office_rules, print_scheme, PlanStyle};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let rules = office_rules();
    let building = Building::new(100.0, 48.0)
        .with_building_type(BuildingType::Office)
        .with_entry_side(EntrySide::South);

    let schemes = try_generate_schemes(
        &building,
        &office_program(),
        4,
        &rules,
        &LayoutConfig::default(),
        &SchemeConfig::default(),
    )?;

    let style = PlanStyle::default();
    for (i, scheme) in schemes.iter().enumerate() {
        print_scheme(i + 1, scheme, &style);
    }
    Ok(())
}
