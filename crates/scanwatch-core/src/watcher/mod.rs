/// Watcher: polls one scan on a background thread.
///
/// Each successful poll is run through [`derive_progress`] and forwarded as
/// a [`WatchEvent::Update`]. Failed polls back off exponentially up to
/// `max_interval`; permanent failures (4xx, undecodable bodies) or too many
/// consecutive transient ones end the watch with [`WatchEvent::Failed`].
///
/// The latest successful record is also kept in a shared slot so a front
/// end can render without draining the channel first.
pub mod events;

pub use events::WatchEvent;

use crate::client::StatusSource;
use crate::model::{ScanDetails, ScanId};
use crate::progress::derive_progress;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Maximum number of events that may queue up in the channel.
///
/// One event per poll at the default interval gives the front end minutes of
/// headroom; past that the watcher blocks rather than buffering unboundedly.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Granularity of the cancel-flag check while sleeping between polls.
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Shared slot holding the most recent successful poll.
pub type LatestScan = Arc<Mutex<Option<ScanDetails>>>;

/// Polling cadence and failure tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    pub interval: Duration,
    pub max_interval: Duration,
    pub max_consecutive_errors: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_interval: Duration::from_secs(30),
            max_consecutive_errors: 5,
        }
    }
}

/// Handle to a running or finished watch.
pub struct WatchHandle {
    /// Receiver for events from the watch thread.
    pub events_rx: Receiver<WatchEvent>,
    /// Most recent successful poll, if any.
    pub latest: LatestScan,
    scan_id: ScanId,
    cancel_flag: Arc<AtomicBool>,
    _thread: Option<thread::JoinHandle<()>>,
}

impl WatchHandle {
    /// Request the watcher to stop at its next check.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }

    pub fn scan_id(&self) -> &str {
        &self.scan_id
    }

    /// Clone of the most recent successful poll.
    pub fn latest(&self) -> Option<ScanDetails> {
        self.latest.lock().clone()
    }
}

/// Start watching `scan_id` on a background thread.
pub fn start_watch<S>(
    source: S,
    scan_id: ScanId,
    options: WatchOptions,
) -> std::io::Result<WatchHandle>
where
    S: StatusSource + Send + 'static,
{
    let (events_tx, events_rx) = crossbeam_channel::bounded::<WatchEvent>(EVENT_CHANNEL_CAPACITY);
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let latest: LatestScan = Arc::new(Mutex::new(None));

    let worker = Worker {
        source,
        scan_id: scan_id.clone(),
        options,
        events_tx,
        cancel_flag: cancel_flag.clone(),
        latest: latest.clone(),
    };
    let thread = thread::Builder::new()
        .name("scanwatch-poller".into())
        .spawn(move || worker.run())?;

    Ok(WatchHandle {
        events_rx,
        latest,
        scan_id,
        cancel_flag,
        _thread: Some(thread),
    })
}

struct Worker<S> {
    source: S,
    scan_id: ScanId,
    options: WatchOptions,
    events_tx: Sender<WatchEvent>,
    cancel_flag: Arc<AtomicBool>,
    latest: LatestScan,
}

impl<S: StatusSource> Worker<S> {
    fn run(self) {
        info!("Watching scan {}", self.scan_id);
        let started = Instant::now();
        let mut delay = self.options.interval;
        let mut consecutive: u32 = 0;

        loop {
            if self.cancelled() {
                self.emit(WatchEvent::Cancelled);
                return;
            }

            match self.source.fetch(&self.scan_id) {
                Ok(details) => {
                    consecutive = 0;
                    delay = self.options.interval;

                    let progress = derive_progress(&details.snapshot());
                    let status = details.status.clone();
                    debug!(
                        "Scan {}: {} {}/{} -> {}% ({})",
                        self.scan_id,
                        status,
                        details.files_scanned,
                        details.total_files,
                        progress.percentage,
                        progress.phase_label()
                    );
                    *self.latest.lock() = Some(details.clone());

                    if !self.emit(WatchEvent::Update { details, progress }) {
                        return;
                    }
                    if status.is_terminal() {
                        info!("Scan {} finished: {}", self.scan_id, status);
                        self.emit(WatchEvent::Finished {
                            status,
                            elapsed: started.elapsed(),
                        });
                        return;
                    }
                }
                Err(err) => {
                    consecutive += 1;
                    let message = err.to_string();
                    warn!("Poll {} of scan {} failed: {}", consecutive, self.scan_id, message);

                    if !err.is_transient() || consecutive >= self.options.max_consecutive_errors {
                        self.emit(WatchEvent::Failed { message });
                        return;
                    }
                    if !self.emit(WatchEvent::Error { message, consecutive }) {
                        return;
                    }
                    delay = (delay * 2).min(self.options.max_interval);
                }
            }

            if !self.sleep(delay) {
                self.emit(WatchEvent::Cancelled);
                return;
            }
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }

    /// Send an event. Returns `false` once the receiver is gone.
    fn emit(&self, event: WatchEvent) -> bool {
        if self.events_tx.send(event).is_err() {
            debug!("Watch receiver dropped; stopping poller for {}", self.scan_id);
            return false;
        }
        true
    }

    /// Sleep for `total`, waking early on cancel. Returns `false` if cancelled.
    fn sleep(&self, total: Duration) -> bool {
        let deadline = Instant::now() + total;
        loop {
            if self.cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep(SLEEP_SLICE.min(deadline - now));
        }
    }
}
