use bevy::prelude::*;

/// Latest diagnostic report. A request is served on the next fixed tick.
#[derive(Resource, Debug, Default)]
pub struct DiagnosticReport {
    pending: bool,
    text: Option<String>,
    generated: u32,
}

impl DiagnosticReport {
    pub fn request(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Reports produced so far.
    pub fn generated(&self) -> u32 {
        self.generated
    }

    pub(crate) fn store(&mut self, text: String) {
        self.pending = false;
        self.generated += 1;
        self.text = Some(text);
    }
}
