//! Cheap, pollable status rows for a settings panel.

mod cache;
mod format;
mod plugin;
mod systems;
mod templates;

pub use cache::{Refresh, StatusCache, StatusRows, StatusView};
pub use format::{clock_hms, format_n0, format_template, TemplateError};
pub use plugin::StatusPlugin;
pub use systems::refresh_status;
pub use templates::{
    render_row, Rendered, StatusTemplates, HEAVY_ROW_TEMPLATE, LIGHT_ROW_TEMPLATE, NO_CITY_HEAVY,
    NO_CITY_LIGHT, PLACEHOLDER_TEXT,
};
