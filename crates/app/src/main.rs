//! `fastbikes`: headless runner for the light-vehicle retuning plugin.
//!
//! Default mode builds a seeded synthetic city, enters it, ticks until the
//! path lane run drains and prints the diagnostic report and status rows.
//!
//! Usage: fastbikes [SETTINGS.json] [--seed N] [--json] [--agent]

mod agent_mode;
mod runner;

use std::path::PathBuf;

use bevy::prelude::*;

use simulation::census::ReportDetail;
use simulation::log_once::WarnOnce;
use simulation::session::SessionState;
use simulation::settings::TuningSettings;
use simulation::synthetic_city::{CityLayout, SyntheticCity};

const USAGE: &str = "usage: fastbikes [SETTINGS.json] [--seed N] [--json] [--agent]";

#[derive(Debug, Default)]
struct Args {
    settings: Option<PathBuf>,
    seed: Option<u64>,
    json: bool,
    agent: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--agent" => parsed.agent = true,
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse()
                    .map_err(|e| format!("bad --seed {value:?}: {e}"))?;
                parsed.seed = Some(seed);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}")),
            path => parsed.settings = Some(PathBuf::from(path)),
        }
    }
    Ok(parsed)
}

fn load_settings(path: Option<&PathBuf>) -> TuningSettings {
    let Some(path) = path else {
        return TuningSettings::default();
    };
    // Load warnings happen before the app (and its WarnOnce) exist.
    TuningSettings::load_or_default(path, &mut WarnOnce::default())
}

fn main() {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            std::process::exit(2);
        }
    };

    let settings = load_settings(args.settings.as_ref());
    let mut app = runner::build_app(settings);

    let layout = CityLayout {
        seed: args.seed.unwrap_or(CityLayout::default().seed),
        ..Default::default()
    };
    let city = SyntheticCity::spawn(app.world_mut(), &layout);
    info!(
        "Synthetic city seed={}: {} path lanes, {} vehicles",
        layout.seed,
        city.path_lanes.len(),
        city.vehicles.len()
    );
    runner::set_session(&mut app, SessionState::InCity);

    if args.agent {
        agent_mode::run_agent_mode(&mut app);
        return;
    }

    runner::tick(&mut app, 1);
    let ticks = runner::drain_lanes(&mut app) + 1;
    info!("Path lane run drained after {ticks} ticks");

    if args.json {
        let census = runner::census(&mut app, ReportDetail::Summary);
        match serde_json::to_string_pretty(&census) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("cannot serialize census: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if let Some(report) = runner::report(&mut app) {
        println!("{report}");
    }
    let (light, heavy) = runner::status_lines(&mut app);
    println!("Light vehicles: {light}");
    println!("Heavy vehicles: {heavy}");
}
