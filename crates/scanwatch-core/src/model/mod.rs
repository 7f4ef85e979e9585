/// Data model for scans as reported by the backend scanning service.
///
/// Re-exports the wire records and the formatting helpers used to display them.
pub mod format;
pub mod scan;

pub use scan::{
    FolderMetrics, Pagination, ScanDetails, ScanId, ScanListResponse, ScanStatus,
    ScanStatusSnapshot,
};
