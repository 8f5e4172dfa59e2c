//! Block Replay - Headless Builder Driver
//!
//! Replays a recorded input script against a builder session and prints the
//! resulting construction as JSON. Useful for reproducing placement bugs
//! without a renderer.
//!
//! Run with: `cargo run --bin block_replay -- script.json [--cache state.json] [--store dir] [--config editor.json]`
//!
//! Script format:
//!
//! ```json
//! { "steps": [
//!     { "step": "pointer", "phase": "down", "position": {"x": 10, "y": 10}, "device": "touch",
//!       "ray": {"origin": [0, 30, 0], "direction": [0, -1, 0]} },
//!     { "step": "frame", "ray": {"origin": [2, 30, 2], "direction": [0, -1, 0]}, "advance_ms": 16 },
//!     { "step": "action", "action": "set_mode", "mode": "erase" },
//!     { "step": "settle", "timeout_ms": 2000 }
//! ] }
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use serde::Deserialize;

use block_forge_engine::game::persistence::{FileLocalCache, JsonDirCreationStore, LocalCache, MemoryLocalCache};
use block_forge_engine::game::{BuilderSession, EditorAction, EditorConfig, StoreWorker};
use block_forge_engine::input::{InputCapture, InputSurface, PointerEvent};
use block_forge_engine::physics::Ray;

const USAGE: &str = "usage: block_replay <script.json> [--cache <file>] [--store <dir>] [--config <file>]";

fn default_frame_ms() -> u64 {
    16
}

fn default_settle_ms() -> u64 {
    2000
}

#[derive(Debug, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
enum ReplayStep {
    Pointer(PointerEvent),
    Frame {
        #[serde(default)]
        ray: Option<Ray>,
        #[serde(default = "default_frame_ms")]
        advance_ms: u64,
    },
    Action(EditorAction),
    /// Wait for one store response
    Settle {
        #[serde(default = "default_settle_ms")]
        timeout_ms: u64,
    },
}

#[derive(Debug, Deserialize)]
struct ReplayScript {
    steps: Vec<ReplayStep>,
}

#[derive(Debug, Default)]
struct Args {
    script: PathBuf,
    cache: Option<PathBuf>,
    store: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut script = None;
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| iter.next().map(PathBuf::from).ok_or(format!("{flag} needs a value"));
        match arg.as_str() {
            "--cache" => args.cache = Some(value("--cache")?),
            "--store" => args.store = Some(value("--store")?),
            "--config" => args.config = Some(value("--config")?),
            "-h" | "--help" => return Err(USAGE.to_string()),
            other if other.starts_with("--") => return Err(format!("unknown flag {other}\n{USAGE}")),
            other => script = Some(PathBuf::from(other)),
        }
    }

    args.script = script.ok_or_else(|| USAGE.to_string())?;
    Ok(args)
}

/// Stand-in for a browser canvas; capture only logs.
struct HeadlessSurface;

impl InputSurface for HeadlessSurface {
    fn set_scroll_locked(&mut self, locked: bool) {
        log::debug!("[Replay] scroll locked: {}", locked);
    }

    fn set_gestures_suppressed(&mut self, suppressed: bool) {
        log::debug!("[Replay] gestures suppressed: {}", suppressed);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => EditorConfig::from_json_file(path)?,
        None => EditorConfig::default(),
    };

    let cache: Box<dyn LocalCache> = match &args.cache {
        Some(path) => Box::new(FileLocalCache::new(path)),
        None => Box::new(MemoryLocalCache::new()),
    };

    let mut session = BuilderSession::new(config, cache);
    if let Some(dir) = &args.store {
        session = session.with_store(StoreWorker::spawn(JsonDirCreationStore::new(dir))?);
    }
    if session.restore_from_cache() {
        println!("[Replay] Restored {} bricks from cache", session.construction().len());
    }

    let script: ReplayScript = serde_json::from_str(&std::fs::read_to_string(&args.script)?)?;
    println!("[Replay] {} steps from {}", script.steps.len(), args.script.display());

    let mut surface = HeadlessSurface;
    let _capture = InputCapture::acquire(&mut surface);
    let mut now = Instant::now();

    for (i, step) in script.steps.into_iter().enumerate() {
        match step {
            ReplayStep::Pointer(event) => {
                let outcome = session.handle_pointer(&event, now);
                log::info!("[Replay] #{} pointer {:?} -> {:?}", i, event.phase, outcome);
            }
            ReplayStep::Frame { ray, advance_ms } => {
                now += Duration::from_millis(advance_ms);
                session.update_frame(ray.as_ref(), now);
            }
            ReplayStep::Action(action) => {
                log::info!("[Replay] #{} action {:?}", i, action);
                session.apply_action(action, now);
            }
            ReplayStep::Settle { timeout_ms } => {
                let event = match session.store() {
                    Some(store) => store.recv_timeout(Duration::from_millis(timeout_ms))?,
                    None => None,
                };
                match event {
                    Some(event) => session.handle_store_event(event, now),
                    None => log::warn!("[Replay] #{} no store response", i),
                }
            }
        }

        for notice in session.drain_notices() {
            println!("[Replay] {:?}: {}", notice.level, notice.message);
        }
    }

    session.flush_autosave();
    println!("{}", serde_json::to_string_pretty(session.construction())?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[Replay] Error: {e}");
            ExitCode::FAILURE
        }
    }
}
