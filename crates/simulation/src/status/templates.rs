use bevy::prelude::*;

use crate::census::VehicleCensus;

use super::format::{format_n0, format_template, TemplateError};

pub const LIGHT_ROW_TEMPLATE: &str =
    "{0} active | {1} bikes | {2} e-scooter | {3} / {4} parked/total";
pub const HEAVY_ROW_TEMPLATE: &str = "{0} active | {1} parked | {2} total | updated {3}";
pub const PLACEHOLDER_TEXT: &str = "Status not loaded.";
pub const NO_CITY_LIGHT: &str = "No city... \u{af}\\_(\u{30c4})_/\u{af} ...No stats";
pub const NO_CITY_HEAVY: &str = "run the city a few minutes for data.";

/// Host-supplied row templates (e.g. localized). `None` uses the built-in text.
#[derive(Resource, Debug, Clone, Default)]
pub struct StatusTemplates {
    pub light_row: Option<String>,
    pub heavy_row: Option<String>,
}

/// A row plus the template fault hit while rendering it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub fault: Option<TemplateError>,
}

/// Try the override, then the built-in template, then the raw template text.
pub fn render_row(
    override_template: Option<&str>,
    default_template: &str,
    args: &[String],
) -> Rendered {
    let mut fault = None;
    if let Some(custom) = override_template {
        match format_template(custom, args) {
            Ok(text) => return Rendered { text, fault: None },
            Err(e) => fault = Some(e),
        }
    }
    match format_template(default_template, args) {
        Ok(text) => Rendered { text, fault },
        Err(e) => Rendered {
            text: default_template.to_string(),
            fault: fault.or(Some(e)),
        },
    }
}

impl StatusTemplates {
    pub fn light_row(&self, census: &VehicleCensus) -> Rendered {
        let light = &census.light;
        let args = [
            light.active,
            light.bikes(),
            light.scooters(),
            light.parked,
            light.status_total(),
        ]
        .map(format_n0);
        render_row(self.light_row.as_deref(), LIGHT_ROW_TEMPLATE, &args)
    }

    pub fn heavy_row(&self, census: &VehicleCensus, clock: &str) -> Rendered {
        let heavy = &census.heavy;
        let args = [
            format_n0(heavy.active),
            format_n0(heavy.parked),
            format_n0(heavy.status_total()),
            clock.to_string(),
        ];
        render_row(self.heavy_row.as_deref(), HEAVY_ROW_TEMPLATE, &args)
    }
}
