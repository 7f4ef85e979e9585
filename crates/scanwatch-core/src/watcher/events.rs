/// Watch events: lightweight messages sent from the polling thread to the
/// front end via a crossbeam channel.
use crate::model::{ScanDetails, ScanStatus};
use crate::progress::ProgressResult;
use std::time::Duration;

/// Progress updates sent from the watch thread to the front end.
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// A poll succeeded. `progress` is derived from `details`.
    Update {
        details: ScanDetails,
        progress: ProgressResult,
    },
    /// A poll failed; the watcher will retry after backing off.
    Error {
        message: String,
        consecutive: u32,
    },
    /// The scan reached a terminal status. No further events follow.
    Finished {
        status: ScanStatus,
        elapsed: Duration,
    },
    /// The watcher gave up after a permanent or repeated failure.
    Failed { message: String },
    /// Watching was cancelled through the handle.
    Cancelled,
}

impl WatchEvent {
    /// True for events after which the channel goes quiet.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Finished { .. } | Self::Failed { .. } | Self::Cancelled
        )
    }
}
