//! Scan records exchanged with the backend scanning service.
//!
//! Field names match the JSON the service emits, so every record here
//! derives `serde` directly without renames.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend identifier for a scan or project (24-char hex object ids).
pub type ScanId = CompactString;

/// Lifecycle state of a scan.
///
/// Values the backend may add later are kept verbatim in `Unknown` and are
/// treated as non-terminal everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScanStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Cancelled,
    Unknown(String),
}

impl ScanStatus {
    /// The snake_case string used on the wire.
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Unknown(raw) => raw,
        }
    }

    /// Human-readable label, e.g. "in progress".
    pub fn label(&self) -> String {
        self.as_wire().replacen('_', " ", 1)
    }

    /// Completed, failed, or cancelled; no further polling is meaningful.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl From<String> for ScanStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => Self::Pending,
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<&str> for ScanStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }
}

impl From<ScanStatus> for String {
    fn from(status: ScanStatus) -> Self {
        match status {
            ScanStatus::Unknown(raw) => raw,
            known => known.as_wire().to_owned(),
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// The three fields progress derivation depends on.
///
/// `files_scanned` is not guaranteed to be `<= total_files`; consumers must
/// tolerate overruns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStatusSnapshot {
    pub status: ScanStatus,
    pub total_files: u64,
    pub files_scanned: u64,
}

impl ScanStatusSnapshot {
    pub fn new(status: impl Into<ScanStatus>, total_files: u64, files_scanned: u64) -> Self {
        Self {
            status: status.into(),
            total_files,
            files_scanned,
        }
    }
}

/// Code metrics collected for the scanned folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderMetrics {
    pub total_loc: u64,
    pub total_functions: u64,
    pub languages: Vec<String>,
}

/// Full scan record returned by `GET api/scans/{id}` and the create endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanDetails {
    pub id: ScanId,
    pub project_id: ScanId,
    pub scan_name: String,
    pub status: ScanStatus,
    #[serde(default)]
    pub findings: u64,
    #[serde(default)]
    pub total_files: u64,
    #[serde(default)]
    pub files_scanned: u64,
    pub created_at: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub triggered_by: String,
    #[serde(default)]
    pub metrics: FolderMetrics,
}

impl ScanDetails {
    /// Extract the fields progress derivation reads.
    pub fn snapshot(&self) -> ScanStatusSnapshot {
        ScanStatusSnapshot {
            status: self.status.clone(),
            total_files: self.total_files,
            files_scanned: self.files_scanned,
        }
    }

    /// Files not yet processed. Saturates at zero on overrun.
    pub fn files_remaining(&self) -> u64 {
        self.total_files.saturating_sub(self.files_scanned)
    }
}

/// Paging metadata returned alongside scan lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
}

/// Response of `GET api/scans/project/{project_id}/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanListResponse {
    pub scans: Vec<ScanDetails>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "6895a4aafd752429c18740bb",
        "project_id": "68874418e816acffbf7c7729",
        "scan_name": "HDBFS Security Scan",
        "status": "in_progress",
        "created_at": "2025-08-08T07:18:02.223",
        "triggered_by": "68863cf8ee93d4964a00d585",
        "total_files": 353,
        "files_scanned": 142,
        "findings": 7,
        "end_time": null,
        "metrics": { "total_functions": 0, "total_loc": 0, "languages": [] }
    }"#;

    #[test]
    fn decodes_backend_record() {
        let scan: ScanDetails = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(scan.id, "6895a4aafd752429c18740bb");
        assert_eq!(scan.status, ScanStatus::InProgress);
        assert_eq!(scan.total_files, 353);
        assert_eq!(scan.files_scanned, 142);
        assert_eq!(scan.end_time, None);
        assert_eq!(scan.files_remaining(), 211);
    }

    #[test]
    fn unknown_status_is_preserved() {
        let json = SAMPLE.replace("in_progress", "queued_for_retry");
        let scan: ScanDetails = serde_json::from_str(&json).unwrap();
        assert_eq!(scan.status, ScanStatus::Unknown("queued_for_retry".into()));
        assert!(!scan.status.is_terminal());

        let back = serde_json::to_value(&scan).unwrap();
        assert_eq!(back["status"], "queued_for_retry");
    }

    #[test]
    fn missing_metrics_default_to_empty() {
        let json = r#"{
            "id": "a", "project_id": "b", "scan_name": "n",
            "status": "pending", "created_at": "2025-08-08T07:18:02"
        }"#;
        let scan: ScanDetails = serde_json::from_str(json).unwrap();
        assert_eq!(scan.metrics, FolderMetrics::default());
        assert_eq!(scan.findings, 0);
    }

    #[test]
    fn terminal_statuses() {
        assert!(ScanStatus::Completed.is_terminal());
        assert!(ScanStatus::Failed.is_terminal());
        assert!(ScanStatus::Cancelled.is_terminal());
        assert!(!ScanStatus::Pending.is_terminal());
        assert!(!ScanStatus::InProgress.is_terminal());
    }

    #[test]
    fn label_replaces_first_underscore() {
        assert_eq!(ScanStatus::InProgress.label(), "in progress");
        assert_eq!(ScanStatus::Completed.label(), "completed");
    }

    #[test]
    fn overrun_does_not_underflow_remaining() {
        let mut scan: ScanDetails = serde_json::from_str(SAMPLE).unwrap();
        scan.files_scanned = 400;
        assert_eq!(scan.files_remaining(), 0);
    }
}
