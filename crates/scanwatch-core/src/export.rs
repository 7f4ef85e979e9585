/// CSV export of scan lists, one row per scan with its derived progress.
use crate::model::ScanDetails;
use crate::progress::derive_progress;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct ScanRow<'a> {
    id: &'a str,
    scan_name: &'a str,
    status: &'a str,
    percentage: u8,
    phase: &'static str,
    files_scanned: u64,
    total_files: u64,
    findings: u64,
    created_at: &'a str,
    end_time: &'a str,
}

impl<'a> From<&'a ScanDetails> for ScanRow<'a> {
    fn from(scan: &'a ScanDetails) -> Self {
        let progress = derive_progress(&scan.snapshot());
        Self {
            id: &scan.id,
            scan_name: &scan.scan_name,
            status: scan.status.as_wire(),
            percentage: progress.percentage,
            phase: progress.phase_label(),
            files_scanned: scan.files_scanned,
            total_files: scan.total_files,
            findings: scan.findings,
            created_at: &scan.created_at,
            end_time: scan.end_time.as_deref().unwrap_or(""),
        }
    }
}

/// Write `scans` as CSV with a header row.
pub fn write_scans_csv<W: Write>(scans: &[ScanDetails], writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    for scan in scans {
        out.serialize(ScanRow::from(scan))?;
    }
    out.flush()?;
    Ok(())
}

/// Write `scans` to a CSV file at `path`, replacing any existing file.
pub fn export_scans_csv(scans: &[ScanDetails], path: &Path) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_scans_csv(scans, file)?;
    info!("Exported {} scan(s) to {}", scans.len(), path.display());
    Ok(())
}
