/// End-to-end tests for `WatchState` (the terminal front end state).
///
/// These drive the real watcher thread with an in-memory source and pump
/// `process_events()` the way the `watch` command does, without any HTTP.
use scanwatch_cli::state::{WatchPhase, WatchState, MAX_POLL_ERRORS};
use scanwatch_core::client::{ClientError, StatusSource};
use scanwatch_core::model::{FolderMetrics, ScanDetails, ScanStatus};
use scanwatch_core::progress::ProgressAnimator;
use scanwatch_core::watcher::{start_watch, WatchOptions};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Reports ten more files per poll until all 40 are scanned, then completes.
struct CountingSource {
    polls: AtomicU64,
}

impl StatusSource for CountingSource {
    fn fetch(&self, scan_id: &str) -> Result<ScanDetails, ClientError> {
        let n = self.polls.fetch_add(1, Ordering::SeqCst);
        let scanned = (n * 10).min(40);
        let status = if n > 4 {
            ScanStatus::Completed
        } else {
            ScanStatus::InProgress
        };
        Ok(scan(scan_id, status, 40, scanned))
    }
}

/// Always fails with a transient server error.
struct BrokenSource;

impl StatusSource for BrokenSource {
    fn fetch(&self, _scan_id: &str) -> Result<ScanDetails, ClientError> {
        Err(ClientError::Status {
            status: 503,
            body: "maintenance".into(),
        })
    }
}

fn scan(id: &str, status: ScanStatus, total: u64, scanned: u64) -> ScanDetails {
    ScanDetails {
        id: id.into(),
        project_id: "proj".into(),
        scan_name: "nightly".into(),
        status,
        findings: 0,
        total_files: total,
        files_scanned: scanned,
        created_at: "2025-08-08T07:18:02.223".into(),
        end_time: None,
        triggered_by: "ci".into(),
        metrics: FolderMetrics::default(),
    }
}

fn fast() -> WatchOptions {
    WatchOptions {
        interval: Duration::from_millis(5),
        max_interval: Duration::from_millis(10),
        max_consecutive_errors: 3,
    }
}

/// Pump `process_events()` until the watch is done or the deadline expires,
/// returning every percentage observed along the way.
fn pump_until_done(state: &mut WatchState) -> Vec<u8> {
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut seen = Vec::new();
    while !state.is_done() {
        assert!(Instant::now() < deadline, "watch did not finish within 10 seconds");
        state.process_events(Instant::now());
        if let Some(p) = state.progress {
            if seen.last() != Some(&p.percentage) {
                seen.push(p.percentage);
            }
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    seen
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn new_state_is_idle() {
    let mut state = WatchState::new();
    assert_eq!(state.phase, WatchPhase::Idle);
    assert!(!state.is_done());
    assert!(!state.process_events(Instant::now()));
}

#[test]
fn attach_sets_watching_phase() {
    let source = Arc::new(CountingSource { polls: AtomicU64::new(0) });
    let handle = start_watch(source, "s1".into(), fast()).unwrap();
    let mut state = WatchState::new();
    state.attach(handle);
    assert_eq!(state.phase, WatchPhase::Watching);
}

/// Derived percentages climb, stay below 100 until completion, and the
/// final state carries the completed record.
#[test]
fn completes_with_full_progress() {
    let source = Arc::new(CountingSource { polls: AtomicU64::new(0) });
    let handle = start_watch(source, "s2".into(), fast()).unwrap();
    let mut state = WatchState::new();
    state.attach(handle);

    let seen = pump_until_done(&mut state);

    assert_eq!(state.phase, WatchPhase::Finished(ScanStatus::Completed));
    assert_eq!(seen.last(), Some(&100));
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{seen:?}");
    assert!(
        seen[..seen.len() - 1].iter().all(|&p| p <= 99),
        "nothing reaches 100 before completion: {seen:?}"
    );
    assert!(state.handle.is_none(), "handle is released once done");
    assert_eq!(state.progress.map(|p| p.phase_label()), Some("Scan Complete"));
    assert!(state.elapsed.is_some());
}

/// The animator follows derived values but derivation ignores it.
#[test]
fn animation_trails_derived_progress() {
    let source = Arc::new(CountingSource { polls: AtomicU64::new(0) });
    let handle = start_watch(source, "s3".into(), fast()).unwrap();
    let mut state = WatchState::with_animator(ProgressAnimator::with_timing(
        Duration::from_secs(60),
        Duration::from_secs(60),
    ));
    state.attach(handle);
    pump_until_done(&mut state);

    // Still inside the long delay: the display has not moved yet.
    assert_eq!(state.displayed_percent(Instant::now()), 0);
    assert_eq!(state.progress.map(|p| p.percentage), Some(100));
    assert_eq!(state.animator.target(), 100);
}

/// Repeated transient failures end in `Failed`, and errors are recorded.
#[test]
fn broken_source_fails_with_errors() {
    let handle = start_watch(BrokenSource, "s4".into(), fast()).unwrap();
    let mut state = WatchState::new();
    state.attach(handle);
    pump_until_done(&mut state);

    match &state.phase {
        WatchPhase::Failed(message) => assert!(message.contains("503"), "{message}"),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(state.poll_errors.len(), 3);
    assert!(state.poll_errors.len() <= MAX_POLL_ERRORS);
    assert!(state.details.is_none());
}

/// Cancelling through the state ends the watch as `Cancelled`.
#[test]
fn cancel_from_state() {
    let slow = WatchOptions {
        interval: Duration::from_secs(60),
        ..fast()
    };
    let source = Arc::new(CountingSource { polls: AtomicU64::new(0) });
    let handle = start_watch(source, "s5".into(), slow).unwrap();
    let mut state = WatchState::new();
    state.attach(handle);
    state.cancel();
    pump_until_done(&mut state);
    assert_eq!(state.phase, WatchPhase::Cancelled);
}
