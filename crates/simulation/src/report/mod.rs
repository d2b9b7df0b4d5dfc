//! On-demand diagnostic report: scalars, prototype sanity, path speeds and
//! the vehicle census, rendered as text and logged.

mod checks;
mod plugin;
mod systems;
mod text;
mod types;

pub use checks::{
    summarize_light_prototypes, summarize_paths, LightPrototypeSummary, LightPrototypeView,
    MismatchCounts, PathSummary, SpeedRange,
};
pub use plugin::ReportPlugin;
pub use systems::{generate_report, ReportSources};
pub use text::{build_report, ReportInput};
pub use types::DiagnosticReport;
