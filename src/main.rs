//! Boulder Runner entry point
//!
//! Headless native host: drives a session through the fixed-step driver and
//! prints the lane as text once per simulated second.
//!
//! Usage: boulder-runner [classic|boulder] [--seed N] [--ticks N]
//!        [--tuning FILE] [--character NAME] [--manual] [--json] [--realtime]

use std::time::{Duration, Instant};

use boulder_runner::consts::{SIM_DT, TICK_RATE_HZ};
use boulder_runner::sim::RunEvent;
use boulder_runner::view::{RunView, render_text};
use boulder_runner::{Character, FixedStepDriver, RunTuning, Session, SessionPhase, Variant};

/// In manual mode the host presses jump this often
const MANUAL_JUMP_EVERY: u64 = 45;

struct Options {
    variant: Variant,
    seed: u64,
    max_ticks: u64,
    tuning_path: Option<String>,
    character: Character,
    manual: bool,
    json: bool,
    realtime: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            variant: Variant::Classic,
            seed: 0x5EED,
            max_ticks: 60 * u64::from(TICK_RATE_HZ),
            tuning_path: None,
            character: Character::Human,
            manual: false,
            json: false,
            realtime: false,
        }
    }
}

fn parse_args() -> Options {
    let mut opts = Options::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => match args.next().and_then(|v| v.parse().ok()) {
                Some(seed) => opts.seed = seed,
                None => log::warn!("--seed needs a number"),
            },
            "--ticks" => match args.next().and_then(|v| v.parse().ok()) {
                Some(ticks) => opts.max_ticks = ticks,
                None => log::warn!("--ticks needs a number"),
            },
            "--tuning" => opts.tuning_path = args.next(),
            "--character" => match args.next().as_deref().and_then(Character::from_str) {
                Some(character) => opts.character = character,
                None => log::warn!(
                    "--character needs one of: {}",
                    Character::ALL.map(|c| c.as_str()).join(", ")
                ),
            },
            "--manual" => opts.manual = true,
            "--json" => opts.json = true,
            "--realtime" => opts.realtime = true,
            other => match Variant::from_str(other) {
                Some(variant) => opts.variant = variant,
                None => log::warn!("Ignoring unknown argument {:?}", other),
            },
        }
    }
    opts
}

fn load_tuning(opts: &Options) -> RunTuning {
    let Some(path) = &opts.tuning_path else {
        return opts.variant.tuning();
    };
    match RunTuning::from_json_file(path) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("{}; falling back to the {} preset", e, opts.variant.as_str());
            opts.variant.tuning()
        }
    }
}

fn main() {
    env_logger::init();
    let opts = parse_args();
    log::info!(
        "Boulder Runner starting ({} variant, seed {})",
        opts.variant.as_str(),
        opts.seed
    );

    let mut session = Session::new(load_tuning(&opts), opts.seed);
    session.open_character_select();
    session.select_character(opts.character);

    let mut driver = FixedStepDriver::new();
    driver.set_autopilot(!opts.manual);

    let frame = Duration::from_secs_f32(SIM_DT);
    while session.phase == SessionPhase::Playing && session.run.time_ticks < opts.max_ticks {
        let started = Instant::now();

        // Quit checks and input happen between frames, never mid-tick
        if opts.manual && driver.frames % MANUAL_JUMP_EVERY == 0 {
            driver.queue_jump();
        }

        let report = driver.advance(&mut session, SIM_DT);
        for event in &report.events {
            match event {
                RunEvent::Recycled { .. } | RunEvent::Collected { .. } => {
                    log::debug!("Score {}", session.run.score)
                }
                RunEvent::Crashed { id } => log::info!("Crashed into obstacle {}", id),
                _ => {}
            }
        }

        let ticks = session.run.time_ticks;
        if report.steps > 0 && ticks % u64::from(TICK_RATE_HZ) == 0 {
            print_frame(&session, opts.json);
        }

        if opts.realtime {
            if let Some(rest) = frame.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    print_frame(&session, opts.json);
    println!(
        "Final score: {} ({:.1}s)",
        session.run.score,
        session.run.elapsed_secs()
    );
    for (rank, entry) in session.high_scores.entries.iter().enumerate() {
        println!(
            "#{} {} - {} ({} ticks)",
            rank + 1,
            entry.character.as_str(),
            entry.score,
            entry.ticks
        );
    }
}

fn print_frame(session: &Session, json: bool) {
    if json {
        match serde_json::to_string(&RunView::from(&session.run)) {
            Ok(line) => println!("{}", line),
            Err(e) => log::error!("Failed to serialize frame: {}", e),
        }
    } else {
        println!("{}\n", render_text(&session.run, 80, 12));
    }
}
