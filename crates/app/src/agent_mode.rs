//! Headless `--agent` mode: a blocking loop that reads JSON commands from
//! stdin and writes JSON responses to stdout, one per line.
//!
//! ## Protocol
//!
//! Each line of stdin is a JSON object with a `"cmd"` discriminator, e.g.
//! `{"cmd":"tick","ticks":5}` or `{"cmd":"set_settings","settings":{...}}`.
//! Each line of stdout is a response with a `"type"` discriminator.

use std::io::{BufRead, Write};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use simulation::census::{ReportDetail, VehicleCensus};
use simulation::lane_batch::LaneBatchScheduler;
use simulation::requests::TuningRequest;
use simulation::settings::TuningSettings;
use simulation::TickCounter;

use crate::runner;

#[derive(Debug, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum AgentCommand {
    Tick { ticks: u32 },
    DrainLanes,
    Apply,
    RestoreBaseline,
    ResetToVanilla,
    SetSettings { settings: TuningSettings },
    Report,
    Status,
    Census { verbose: bool },
    Quit,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentResponse {
    Ready,
    Ticked { tick: u64, lanes: LaneProgress },
    Ok,
    Report { text: String },
    Status { light: String, heavy: String },
    Census { census: VehicleCensus },
    Error { message: String },
    Goodbye,
}

#[derive(Debug, Serialize)]
pub struct LaneProgress {
    pub remaining: usize,
    pub total: usize,
    pub runs_completed: u32,
}

impl LaneProgress {
    fn read(app: &App) -> Self {
        let scheduler = app.world().resource::<LaneBatchScheduler>();
        let (remaining, total) = scheduler.progress().unwrap_or((0, 0));
        Self {
            remaining,
            total,
            runs_completed: scheduler.stats.runs_completed,
        }
    }
}

pub fn run_agent_mode(app: &mut App) {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    respond(&mut stdout, &AgentResponse::Ready);
    // Log to stderr so it does not interfere with the JSON protocol on stdout.
    eprintln!("fastbikes agent mode ready, waiting for commands on stdin");

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("stdin read error: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<AgentCommand>(&line) {
            Ok(cmd) => process_command(cmd, app),
            Err(e) => AgentResponse::Error {
                message: format!("Parse error: {e}"),
            },
        };
        let is_goodbye = matches!(response, AgentResponse::Goodbye);
        respond(&mut stdout, &response);
        if is_goodbye {
            break;
        }
    }

    eprintln!("fastbikes agent mode shutting down");
}

fn respond(out: &mut impl Write, response: &AgentResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            let _ = writeln!(out, "{json}");
        }
        Err(e) => {
            let _ = writeln!(out, r#"{{"type":"error","message":"serialize: {e}"}}"#);
        }
    }
    let _ = out.flush();
}

fn ticked(app: &App) -> AgentResponse {
    AgentResponse::Ticked {
        tick: app.world().resource::<TickCounter>().0,
        lanes: LaneProgress::read(app),
    }
}

pub fn process_command(cmd: AgentCommand, app: &mut App) -> AgentResponse {
    match cmd {
        AgentCommand::Tick { ticks } => {
            runner::tick(app, ticks);
            ticked(app)
        }
        AgentCommand::DrainLanes => {
            runner::drain_lanes(app);
            ticked(app)
        }
        AgentCommand::Apply => {
            runner::send(app, TuningRequest::Apply);
            AgentResponse::Ok
        }
        AgentCommand::RestoreBaseline => {
            runner::send(app, TuningRequest::RestoreBaseline);
            AgentResponse::Ok
        }
        AgentCommand::ResetToVanilla => {
            app.world_mut()
                .resource_mut::<TuningSettings>()
                .reset_to_vanilla();
            runner::send(app, TuningRequest::RestoreBaseline);
            AgentResponse::Ok
        }
        AgentCommand::SetSettings { settings } => {
            *app.world_mut().resource_mut::<TuningSettings>() = settings;
            AgentResponse::Ok
        }
        AgentCommand::Report => match runner::report(app) {
            Some(text) => AgentResponse::Report { text },
            None => AgentResponse::Error {
                message: "no report produced (is a city loaded?)".to_string(),
            },
        },
        AgentCommand::Status => {
            let (light, heavy) = runner::status_lines(app);
            AgentResponse::Status { light, heavy }
        }
        AgentCommand::Census { verbose } => AgentResponse::Census {
            census: runner::census(app, ReportDetail::from_verbose(verbose)),
        },
        AgentCommand::Quit => AgentResponse::Goodbye,
    }
}
