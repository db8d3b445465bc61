#![forbid(unsafe_code)]

mod plan;
mod programs;

pub use plan::{format_metrics, print_scheme, render_plan, PlanStyle};
pub use programs::{office_program, office_rules, residential_program, residential_rules};

/// Install a formatting subscriber once. `RUST_LOG` overrides the default
/// `info` filter.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
