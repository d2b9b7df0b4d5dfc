//! User-facing tuning settings and the effective scalars derived from them.
//!
//! [`TuningSettings`] is the persisted configuration object (JSON via serde).
//! Engines never read it directly; they receive an [`EffectiveScalars`] value
//! computed once per trigger, where a disabled configuration collapses every
//! scalar to 1.0 (pure baseline restoration) and enabled values are clamped to
//! their valid ranges.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::config::{
    DAMPING_SCALAR_MAX, DAMPING_SCALAR_MIN, PATH_SPEED_SCALAR_MAX, PATH_SPEED_SCALAR_MIN,
    SPEED_SCALAR_MAX, SPEED_SCALAR_MIN, STATUS_REFRESH_SECS_DEFAULT, STATUS_REFRESH_SECS_FLOOR,
    STIFFNESS_SCALAR_MAX, STIFFNESS_SCALAR_MIN,
};
use crate::log_once::WarnOnce;

const VANILLA: f32 = 1.0;

pub const SETTINGS_UNAVAILABLE_KEY: &str = "settings-unavailable";

const DEFAULT_ENABLED: bool = true;
const DEFAULT_SPEED: f32 = 2.0;
const DEFAULT_STIFFNESS: f32 = 1.0;
const DEFAULT_DAMPING: f32 = 1.0;
const DEFAULT_PATH_SPEED: f32 = 1.0;

// ---------------------------------------------------------------------------
// TuningSettings
// ---------------------------------------------------------------------------

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningSettings {
    pub enabled: bool,
    /// Top speed multiplier. Acceleration and braking follow its square root.
    pub speed_scalar: f32,
    /// Higher -> less lean (smaller sway amplitude).
    pub stiffness_scalar: f32,
    /// Higher -> sway settles faster (smaller damping factors).
    pub damping_scalar: f32,
    /// Path surface speed limit multiplier.
    pub path_speed_scalar: f32,
    /// Per-pass summaries and sample lists in the diagnostic report.
    pub verbose_logging: bool,
    /// Minimum seconds between status recomputations.
    pub status_refresh_secs: u32,
}

impl Default for TuningSettings {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_ENABLED,
            speed_scalar: DEFAULT_SPEED,
            stiffness_scalar: DEFAULT_STIFFNESS,
            damping_scalar: DEFAULT_DAMPING,
            path_speed_scalar: DEFAULT_PATH_SPEED,
            verbose_logging: false,
            status_refresh_secs: STATUS_REFRESH_SECS_DEFAULT,
        }
    }
}

impl TuningSettings {
    /// Effective scalars for one retuning pass.
    pub fn effective(&self) -> EffectiveScalars {
        if !self.enabled {
            return EffectiveScalars::NEUTRAL;
        }
        EffectiveScalars {
            speed: clamp_finite(self.speed_scalar, SPEED_SCALAR_MIN, SPEED_SCALAR_MAX),
            stiffness: clamp_finite(
                self.stiffness_scalar,
                STIFFNESS_SCALAR_MIN,
                STIFFNESS_SCALAR_MAX,
            ),
            damping: clamp_finite(self.damping_scalar, DAMPING_SCALAR_MIN, DAMPING_SCALAR_MAX),
            path_speed: clamp_finite(
                self.path_speed_scalar,
                PATH_SPEED_SCALAR_MIN,
                PATH_SPEED_SCALAR_MAX,
            ),
        }
    }

    /// True if any scalar is NaN or infinite (those fall back to 1.0).
    pub fn has_non_finite(&self) -> bool {
        ![
            self.speed_scalar,
            self.stiffness_scalar,
            self.damping_scalar,
            self.path_speed_scalar,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Status refresh interval with the floor applied.
    pub fn refresh_interval_secs(&self) -> u32 {
        self.status_refresh_secs.max(STATUS_REFRESH_SECS_FLOOR)
    }

    /// Scalars back to 1.0. The caller should also request a baseline
    /// restoring pass.
    pub fn reset_to_vanilla(&mut self) {
        self.speed_scalar = VANILLA;
        self.stiffness_scalar = VANILLA;
        self.damping_scalar = VANILLA;
        self.path_speed_scalar = VANILLA;
    }

    /// Every field back to its shipped default, keeping the debug toggle.
    pub fn reset_to_defaults(&mut self) {
        let verbose = self.verbose_logging;
        *self = Self::default();
        self.verbose_logging = verbose;
    }

    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Like [`TuningSettings::load`], but an unreadable or malformed file
    /// yields the defaults and a single warning.
    pub fn load_or_default(path: &Path, warnings: &mut WarnOnce) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warnings.warn(SETTINGS_UNAVAILABLE_KEY, || {
                    format!("Settings: cannot load {}: {e}; using defaults", path.display())
                });
                Self::default()
            }
        }
    }
}

fn clamp_finite(value: f32, min: f32, max: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        VANILLA
    }
}

// ---------------------------------------------------------------------------
// EffectiveScalars
// ---------------------------------------------------------------------------

/// Clamped, enable-resolved multipliers handed to the engines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveScalars {
    pub speed: f32,
    pub stiffness: f32,
    pub damping: f32,
    pub path_speed: f32,
}

impl EffectiveScalars {
    pub const NEUTRAL: Self = Self {
        speed: VANILLA,
        stiffness: VANILLA,
        damping: VANILLA,
        path_speed: VANILLA,
    };

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

impl Default for EffectiveScalars {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

// ---------------------------------------------------------------------------
// SettingsError
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings I/O error: {e}"),
            SettingsError::Json(e) => write!(f, "settings JSON error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}
