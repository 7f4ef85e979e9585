/// Progress derivation: maps a polled scan-status snapshot to the
/// percentage and phase label shown to the user.
///
/// Everything here is pure: no I/O, no hidden state, no memoisation.
/// The same snapshot always yields the same [`ProgressResult`]. Display
/// smoothing lives in [`animation`] and never feeds back into derivation.
pub mod animation;
pub mod phase;

pub use animation::ProgressAnimator;
pub use phase::{compute_phase, Phase, PHASE_TABLE};

use crate::model::{ScanStatus, ScanStatusSnapshot};

/// Highest percentage a scan may show before the backend reports `completed`.
pub const MAX_UNCONFIRMED_PERCENT: u8 = 99;

/// Display state derived from one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressResult {
    /// Always within `0..=100`.
    pub percentage: u8,
    pub phase: Phase,
}

impl ProgressResult {
    pub fn phase_label(&self) -> &'static str {
        self.phase.label()
    }
}

/// Compute the display percentage for a snapshot.
///
/// Rules, first match wins:
/// 1. `completed` → 100
/// 2. `failed` / `cancelled` → 0
/// 3. no files discovered → 0
/// 4. `floor(files_scanned * 100 / total_files)`, capped at 99
///
/// Integer arithmetic keeps the floor exact (29 of 100 is 29, not 28).
pub fn compute_percentage(snapshot: &ScanStatusSnapshot) -> u8 {
    match snapshot.status {
        ScanStatus::Completed => return 100,
        ScanStatus::Failed | ScanStatus::Cancelled => return 0,
        _ => {}
    }
    if snapshot.total_files == 0 {
        return 0;
    }

    // u128 so `files_scanned * 100` cannot overflow for any u64 input.
    let raw = u128::from(snapshot.files_scanned) * 100 / u128::from(snapshot.total_files);
    raw.min(u128::from(MAX_UNCONFIRMED_PERCENT)) as u8
}

/// Derive percentage and phase from a snapshot.
pub fn derive_progress(snapshot: &ScanStatusSnapshot) -> ProgressResult {
    let percentage = compute_percentage(snapshot);
    ProgressResult {
        percentage,
        phase: compute_phase(percentage, &snapshot.status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(status: &str, total: u64, scanned: u64) -> ScanStatusSnapshot {
        ScanStatusSnapshot::new(status, total, scanned)
    }

    #[test]
    fn completed_is_always_full() {
        for (total, scanned) in [(0, 0), (10, 3), (5, 50)] {
            let result = derive_progress(&snap("completed", total, scanned));
            assert_eq!(result.percentage, 100);
            assert_eq!(result.phase_label(), "Scan Complete");
        }
    }

    #[test]
    fn failed_and_cancelled_are_zero() {
        let failed = derive_progress(&snap("failed", 50, 20));
        assert_eq!(failed.percentage, 0);
        assert_eq!(failed.phase_label(), "Scan Failed");

        let cancelled = derive_progress(&snap("cancelled", 50, 49));
        assert_eq!(cancelled.percentage, 0);
        assert_eq!(cancelled.phase_label(), "Scan Cancelled");
    }

    #[test]
    fn no_files_discovered_is_zero() {
        assert_eq!(compute_percentage(&snap("in_progress", 0, 0)), 0);
        // Scanned count without a total is still zero, not a division panic.
        assert_eq!(compute_percentage(&snap("in_progress", 0, 17)), 0);
    }

    #[test]
    fn unconfirmed_scan_never_reaches_100() {
        assert_eq!(compute_percentage(&snap("in_progress", 10, 10)), 99);
        assert_eq!(compute_percentage(&snap("in_progress", 10, 25)), 99);
        assert_eq!(compute_percentage(&snap("in_progress", 1, u64::MAX)), 99);
    }

    #[test]
    fn in_progress_mid_scan() {
        let result = derive_progress(&snap("in_progress", 353, 142));
        assert_eq!(result.percentage, 40);
        assert_eq!(result.phase_label(), "Scanning Files");
    }

    #[test]
    fn pending_waits_to_start() {
        let result = derive_progress(&snap("pending", 100, 0));
        assert_eq!(result.percentage, 0);
        assert_eq!(result.phase_label(), "Waiting to Start");
    }

    #[test]
    fn one_of_ten_is_scanning_files() {
        let result = derive_progress(&snap("in_progress", 10, 1));
        assert_eq!(result.percentage, 10);
        assert_eq!(result.phase_label(), "Scanning Files");
    }

    #[test]
    fn failed_with_partial_counts() {
        let result = derive_progress(&snap("failed", 50, 20));
        assert_eq!(result.percentage, 0);
        assert_eq!(result.phase_label(), "Scan Failed");
    }

    #[test]
    fn floor_is_exact() {
        assert_eq!(compute_percentage(&snap("in_progress", 100, 29)), 29);
        assert_eq!(compute_percentage(&snap("in_progress", 3, 2)), 66);
    }

    #[test]
    fn unknown_status_uses_phase_table() {
        let result = derive_progress(&snap("queued_for_retry", 100, 85));
        assert_eq!(result.percentage, 85);
        assert_eq!(result.phase_label(), "Analyzing Results");
    }

    #[test]
    fn derivation_is_idempotent() {
        let s = snap("in_progress", 353, 142);
        assert_eq!(derive_progress(&s), derive_progress(&s));
    }
}
