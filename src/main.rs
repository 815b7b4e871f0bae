//=========================================================================
// Outpost — Headless Host
//=========================================================================
//
// Drives a runtime without a window: loads the config, spawns the logic
// thread, plays a scripted list of host commands in real time and prints
// what the UI would show.
//
//=========================================================================

use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::{error, info};

use outpost_runtime::prelude::*;

//=== CLI =================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Script {
    /// Load the level and activate every terminal.
    Win,
    /// Load the level and let the countdown run out.
    Lose,
    /// Walk through the menus: options, play, pause, options, back, resume.
    Tour,
}

/// Headless host for the outpost runtime.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file. Defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Logic ticks per second (overrides the config).
    #[arg(long)]
    tps: Option<f64>,

    /// Countdown budget in seconds (overrides the config).
    #[arg(long, value_name = "SECONDS")]
    time_limit: Option<f32>,

    /// Scripted session to play.
    #[arg(long, value_enum, default_value_t = Script::Win)]
    script: Script,
}

//=== Script Steps ========================================================

enum ScriptStep {
    Send(HostCommand),
    Wait(f32),
}

fn script_steps(script: Script, config: &RuntimeConfig) -> Vec<ScriptStep> {
    // Long enough for the loading screen to finish.
    let load_time = 4.0;
    let outro = config.outcome.timings.intro_delay + config.outcome.timings.hold_delay + 0.5;

    let mut steps = vec![ScriptStep::Send(HostCommand::PlayClicked), ScriptStep::Wait(load_time)];

    match script {
        Script::Win => {
            for name in &config.level.terminals {
                steps.push(ScriptStep::Send(HostCommand::Interact(name.clone())));
                steps.push(ScriptStep::Wait(0.5));
            }
            steps.push(ScriptStep::Wait(outro));
        }
        Script::Lose => {
            steps.push(ScriptStep::Wait(config.outcome.time_limit + outro));
        }
        Script::Tour => {
            steps = vec![
                ScriptStep::Send(HostCommand::OptionsClicked),
                ScriptStep::Wait(0.5),
                ScriptStep::Send(HostCommand::OptionsBackClicked),
                ScriptStep::Wait(0.5),
                ScriptStep::Send(HostCommand::PlayClicked),
                ScriptStep::Wait(load_time),
            ];
            for name in config.level.doors.iter().chain(&config.level.chests) {
                steps.push(ScriptStep::Send(HostCommand::Interact(name.clone())));
                steps.push(ScriptStep::Wait(0.5));
            }
            steps.extend([
                ScriptStep::Send(HostCommand::PauseRequested),
                ScriptStep::Wait(1.0),
                ScriptStep::Send(HostCommand::OptionsClicked),
                ScriptStep::Wait(0.5),
                ScriptStep::Send(HostCommand::OptionsBackClicked),
                ScriptStep::Wait(0.5),
                ScriptStep::Send(HostCommand::ResumeClicked),
                ScriptStep::Wait(1.0),
            ]);
        }
    }

    steps.push(ScriptStep::Send(HostCommand::ExitClicked));
    steps
}

//=== Output ==============================================================

fn print_snapshot(snapshot: &SessionSnapshot) {
    let panels: Vec<String> = snapshot
        .ui
        .visible_panels
        .iter()
        .map(|p| format!("{:?}", p))
        .collect();

    let outcome = match &snapshot.outcome {
        Some(o) => format!(
            "{} {}/{} ({}s left)",
            o.state, o.objectives_completed, o.objectives_to_win, o.remaining
        ),
        None => "no level".to_string(),
    };

    println!(
        "[{:?}] panels: [{}] timer: {} cursor: {} time x{} | {} | player {}",
        snapshot.ui.state,
        panels.join(", "),
        match (&snapshot.ui.timer_text, snapshot.ui.timer_visible) {
            (Some(text), true) => text.as_str(),
            _ => "--:--",
        },
        snapshot.ui.cursor,
        snapshot.ui.time_scale,
        outcome,
        if snapshot.player_enabled { "on" } else { "off" },
    );
}

//=== Entry Point =========================================================

fn load_config(cli: &Cli) -> Result<RuntimeConfig, RuntimeError> {
    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::load_from_file(path)?,
        None => RuntimeConfig::new(),
    };

    if let Some(tps) = cli.tps {
        config.tps = tps;
    }
    if let Some(limit) = cli.time_limit {
        config.outcome.time_limit = limit;
    }

    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> Result<(), RuntimeError> {
    let config = load_config(&cli)?;
    let steps = script_steps(cli.script, &config);

    info!("Running {:?} script", cli.script);
    let handle = RuntimeBuilder::new().with_config(config).build().spawn();

    for step in steps {
        match step {
            ScriptStep::Send(command) => {
                println!("> {:?}", command);
                handle.send(command)?;
            }
            ScriptStep::Wait(seconds) => {
                thread::sleep(Duration::from_secs_f32(seconds));
                if let Some(snapshot) = handle.latest_snapshot() {
                    print_snapshot(&snapshot);
                }
            }
        }
    }

    let session = handle.join()?;
    print_snapshot(&session.snapshot());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
