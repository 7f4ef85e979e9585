/// Phase labels: which stage of scanning is presumed active.
///
/// The backend does not report phases; they are inferred from the
/// derived percentage, with terminal and pending statuses taking priority.
use crate::model::ScanStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    WaitingToStart,
    InitializingScan,
    ScanningFiles,
    AnalyzingResults,
    GeneratingReport,
    Complete,
    Failed,
    Cancelled,
}

impl Phase {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::WaitingToStart => "Waiting to Start",
            Self::InitializingScan => "Initializing Scan",
            Self::ScanningFiles => "Scanning Files",
            Self::AnalyzingResults => "Analyzing Results",
            Self::GeneratingReport => "Generating Report",
            Self::Complete => "Scan Complete",
            Self::Failed => "Scan Failed",
            Self::Cancelled => "Scan Cancelled",
        }
    }
}

/// A half-open `[start, end)` percentage interval mapped to a phase.
#[derive(Debug, Clone, Copy)]
pub struct PhaseRange {
    pub phase: Phase,
    pub start: u8,
    pub end: u8,
}

impl PhaseRange {
    fn contains(&self, percentage: u8) -> bool {
        percentage >= self.start && percentage < self.end
    }
}

/// Phase table for non-terminal scans, in ascending order.
pub const PHASE_TABLE: [PhaseRange; 4] = [
    PhaseRange {
        phase: Phase::InitializingScan,
        start: 0,
        end: 5,
    },
    PhaseRange {
        phase: Phase::ScanningFiles,
        start: 5,
        end: 80,
    },
    PhaseRange {
        phase: Phase::AnalyzingResults,
        start: 80,
        end: 95,
    },
    PhaseRange {
        phase: Phase::GeneratingReport,
        start: 95,
        end: 100,
    },
];

/// Pick the phase for a percentage and status.
///
/// Status overrides are checked first. A percentage of 100 on a scan that
/// is not `completed` matches no interval and falls back to
/// [`Phase::ScanningFiles`].
pub fn compute_phase(percentage: u8, status: &ScanStatus) -> Phase {
    match status {
        ScanStatus::Completed => return Phase::Complete,
        ScanStatus::Failed => return Phase::Failed,
        ScanStatus::Cancelled => return Phase::Cancelled,
        ScanStatus::Pending => return Phase::WaitingToStart,
        ScanStatus::InProgress | ScanStatus::Unknown(_) => {}
    }

    PHASE_TABLE
        .iter()
        .find(|range| range.contains(percentage))
        .map_or(Phase::ScanningFiles, |range| range.phase)
}
