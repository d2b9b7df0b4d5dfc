use bevy::prelude::*;
use std::fmt;

/// Faults that abort a retuning pass before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub enum RetuneError {
    /// A baseline or computed target is NaN or infinite.
    NonFinite {
        prototype: Entity,
        field: &'static str,
    },
}

impl RetuneError {
    /// Stable key for warn-once logging; one warning per distinct cause.
    pub fn cause_key(&self) -> String {
        match self {
            RetuneError::NonFinite { field, .. } => format!("retune-non-finite-{field}"),
        }
    }
}

impl fmt::Display for RetuneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetuneError::NonFinite { prototype, field } => write!(
                f,
                "non-finite {field} on prototype {}:{}",
                prototype.index(),
                prototype.generation()
            ),
        }
    }
}

impl std::error::Error for RetuneError {}
