use bevy::core::FrameCount;
use bevy::prelude::*;
use std::convert::Infallible;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::census::{CensusScan, ReportDetail};
use crate::log_once::WarnOnce;
use crate::session::SessionState;
use crate::settings::TuningSettings;

use super::cache::{Refresh, StatusCache, StatusRows};
use super::templates::StatusTemplates;

const TEMPLATE_FAULT_KEY: &str = "status-template";

/// UI poll: refresh the two status rows when due.
#[allow(clippy::too_many_arguments)]
pub fn refresh_status(
    frame: Res<FrameCount>,
    time: Res<Time<Real>>,
    session: Res<State<SessionState>>,
    settings: Res<TuningSettings>,
    templates: Res<StatusTemplates>,
    mut cache: ResMut<StatusCache>,
    mut warnings: ResMut<WarnOnce>,
    scan: CensusScan,
) {
    let in_session = *session.get() == SessionState::InCity;
    let interval = Duration::from_secs(u64::from(settings.refresh_interval_secs()));

    let outcome = cache.refresh_if_needed(frame.0, time.elapsed(), in_session, interval, || {
        let census = scan.take(ReportDetail::Summary);
        let clock = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let light = templates.light_row(&census);
        let heavy = templates.heavy_row(&census, &super::format::clock_hms(clock));
        for fault in [light.fault, heavy.fault].into_iter().flatten() {
            warnings.warn(TEMPLATE_FAULT_KEY, || {
                format!("Status: template fault ({fault}); using fallback text")
            });
        }
        Ok::<_, Infallible>(StatusRows {
            light: light.text,
            heavy: heavy.text,
        })
    });

    if let Refresh::Failed(cause) = outcome {
        warnings.warn("status-refresh-failed", || {
            format!("Status: refresh failed ({cause}); showing placeholder")
        });
    }
}
