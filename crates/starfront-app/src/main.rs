//! starfront: headless arena runner.
//!
//! Usage:
//!   starfront [--config arena.json] [--seconds 30] [--seed 7] [--dump final.json]

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use thiserror::Error;

use starfront_app::game_loop::{spawn_game_loop, LoopError};
use starfront_app::state::{LoopCommand, SharedState};
use starfront_core::config::{ConfigError, SimConfig};
use starfront_sim::{EngineError, SimulationEngine};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Loop(#[from] LoopError),
    #[error("game loop thread panicked")]
    LoopPanicked,
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write snapshot dump: {0}")]
    Dump(#[from] std::io::Error),
}

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    seconds: Option<f64>,
    seed: Option<u64>,
    dump: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "help" || a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let options = match parse_options(&args[1..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(err) = run(options) {
        log::error!("{err}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "starfront: headless arena simulation\n\
         \n\
           --config <path>   JSON arena config (default: built-in 1600x1024, 7 hostiles)\n\
           --seconds <n>     Run for n seconds, then shut down (default: until killed)\n\
           --seed <n>        Override the config's RNG seed\n\
           --dump <path>     Write the final snapshot as JSON\n\
         \n\
         Logging follows RUST_LOG (default: info).\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    for arg in args.iter().filter(|a| a.starts_with("--")) {
        if !matches!(arg.as_str(), "--config" | "--seconds" | "--seed" | "--dump") {
            return Err(format!("Unknown option: {arg}"));
        }
        if flag_value(args, arg).is_none() {
            return Err(format!("Missing value for {arg}"));
        }
    }

    options.config = flag_value(args, "--config").map(PathBuf::from);
    options.dump = flag_value(args, "--dump").map(PathBuf::from);
    if let Some(raw) = flag_value(args, "--seconds") {
        let seconds: f64 = raw
            .parse()
            .map_err(|_| format!("Invalid --seconds value: {raw}"))?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(format!("--seconds must be a non-negative number, got {raw}"));
        }
        options.seconds = Some(seconds);
    }
    if let Some(raw) = flag_value(args, "--seed") {
        options.seed = Some(
            raw.parse()
                .map_err(|_| format!("Invalid --seed value: {raw}"))?,
        );
    }
    Ok(options)
}

fn run(options: Options) -> Result<(), AppError> {
    let mut config = match &options.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.seed = seed;
    }

    let engine = SimulationEngine::new(&config)?;
    let shared = SharedState::new();
    let (commands, handle) = spawn_game_loop(engine, shared.clone())?;

    match options.seconds {
        Some(seconds) => std::thread::sleep(Duration::from_secs_f64(seconds)),
        None => {
            while shared.is_running() {
                std::thread::sleep(Duration::from_secs(1));
            }
        }
    }

    // The loop may already be gone; joining reports how it ended.
    let _ = commands.send(LoopCommand::Shutdown);
    handle.join().map_err(|_| AppError::LoopPanicked)?;

    let Some(snapshot) = shared.snapshot() else {
        log::info!("No updates ran");
        return Ok(());
    };
    log::info!(
        "Finished at tick {} ({:.1}s simulated): {:?}, {} entities, {} collision checks",
        snapshot.time.tick,
        snapshot.time.elapsed_secs(),
        snapshot.outcome,
        snapshot.entity_count(),
        snapshot.collisions_checked
    );

    if let Some(path) = &options.dump {
        std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        log::info!("Snapshot written to {}", path.display());
    }
    Ok(())
}
