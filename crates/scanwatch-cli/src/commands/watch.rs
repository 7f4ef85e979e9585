//! `watch`: poll a scan until it reaches a terminal status.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::Args;
use scanwatch_core::model::ScanStatus;
use scanwatch_core::watcher::{start_watch, WatchHandle};
use tracing::{info, warn};

use super::{ApiArgs, ExitCode};
use crate::render;
use crate::state::{WatchPhase, WatchState};

/// How often the terminal is refreshed while watching.
const TICK: Duration = Duration::from_millis(100);

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Scan identifier
    pub scan_id: String,

    /// Poll interval in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Print only the final dashboard
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(api: &ApiArgs, args: &WatchArgs) -> anyhow::Result<ExitCode> {
    let settings = super::settings(api, args.interval_ms)?;
    let client = super::client(&settings)?;

    let interrupted = Arc::new(AtomicBool::new(false));
    install_interrupt_handler(Arc::clone(&interrupted));

    let handle = start_watch(client, args.scan_id.as_str().into(), settings.watch)
        .context("failed to start the watch thread")?;
    let state = follow(handle, &interrupted, args.quiet);

    let now = Instant::now();
    if let (Some(details), Some(progress)) = (&state.details, &state.progress) {
        println!();
        print!("{}", render::dashboard(details, progress, state.displayed_percent(now)));
    }

    match state.phase {
        WatchPhase::Finished(ScanStatus::Completed) => {
            if let Some(elapsed) = state.elapsed {
                info!("Scan {} completed after {:.1?} of watching", args.scan_id, elapsed);
            }
            Ok(ExitCode::Success)
        }
        WatchPhase::Finished(status) => {
            eprintln!("scan {} ended {}", args.scan_id, status.label());
            Ok(ExitCode::ScanUnsuccessful)
        }
        WatchPhase::Failed(message) => bail!("watching scan {} failed: {message}", args.scan_id),
        WatchPhase::Cancelled => {
            eprintln!("stopped watching scan {}", args.scan_id);
            Ok(ExitCode::Interrupted)
        }
        WatchPhase::Idle | WatchPhase::Watching => Ok(ExitCode::ScanUnsuccessful),
    }
}

/// First Ctrl+C cancels the watch; a second one exits immediately.
fn install_interrupt_handler(interrupted: Arc<AtomicBool>) {
    let result = ctrlc::set_handler(move || {
        if interrupted.swap(true, Ordering::SeqCst) {
            std::process::exit(ExitCode::Interrupted as i32);
        }
    });
    if let Err(e) = result {
        warn!("Ctrl+C will not stop the watch cleanly: {e}");
    }
}

/// Pump watcher events once per tick until the watch ends.
///
/// Progress lines are printed as they change unless `quiet`. Once
/// `interrupted` is set the watch is cancelled and the loop stops without
/// waiting for the animation to settle.
fn follow(handle: WatchHandle, interrupted: &AtomicBool, quiet: bool) -> WatchState {
    let mut state = WatchState::new();
    state.attach(handle);

    let mut last_line = String::new();
    loop {
        let now = Instant::now();
        let stop = interrupted.load(Ordering::SeqCst);
        if stop {
            state.cancel();
        }
        state.process_events(now);

        if !quiet {
            if let (Some(details), Some(progress)) = (&state.details, &state.progress) {
                let line = render::progress_line(details, progress, state.displayed_percent(now));
                if line != last_line {
                    println!("{line}");
                    last_line = line;
                }
            }
        }

        if state.is_done() && (quiet || stop || state.animator.is_settled(now)) {
            return state;
        }
        thread::sleep(TICK);
    }
}
