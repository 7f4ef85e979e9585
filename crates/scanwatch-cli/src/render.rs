//! Plain-text rendering of scans for the terminal.

use scanwatch_core::display::{text_bar, StatusDisplay};
use scanwatch_core::model::format::{format_count, format_timestamp};
use scanwatch_core::model::{ScanDetails, ScanListResponse, ScanStatus};
use scanwatch_core::progress::{derive_progress, ProgressResult};
use std::fmt::Write;

/// Width of the text progress bar, excluding brackets.
pub const BAR_WIDTH: usize = 30;

/// One-line progress summary, redrawn on every watch tick.
pub fn progress_line(details: &ScanDetails, progress: &ProgressResult, displayed: u8) -> String {
    let mut line = format!(
        "{} {:>3}% {}",
        text_bar(f32::from(displayed), BAR_WIDTH),
        displayed,
        progress.phase_label()
    );
    if details.status == ScanStatus::InProgress {
        let _ = write!(
            line,
            " ({} / {} files)",
            format_count(details.files_scanned),
            format_count(details.total_files)
        );
    }
    line
}

/// Full dashboard for a single scan.
pub fn dashboard(details: &ScanDetails, progress: &ProgressResult, displayed: u8) -> String {
    let look = StatusDisplay::for_status(&details.status);
    let mut out = String::new();

    let _ = writeln!(out, "{}", details.scan_name);
    let _ = writeln!(out, "  ID:        {}", details.id);
    let _ = writeln!(out, "  Status:    {} {}", look.icon.glyph(), details.status.label());
    let _ = writeln!(out, "  Phase:     {}", progress.phase_label());
    let _ = writeln!(
        out,
        "  Progress:  {} {}%",
        text_bar(f32::from(displayed), BAR_WIDTH),
        displayed
    );
    if details.status == ScanStatus::InProgress {
        let _ = writeln!(
            out,
            "  Files:     {} / {} ({} remaining)",
            format_count(details.files_scanned),
            format_count(details.total_files),
            format_count(details.files_remaining())
        );
    } else {
        let _ = writeln!(out, "  Files:     {}", format_count(details.total_files));
    }
    let _ = writeln!(out, "  Findings:  {}", format_count(details.findings));
    let _ = writeln!(out, "  Started:   {}", format_timestamp(&details.created_at));
    if let Some(end) = &details.end_time {
        let _ = writeln!(out, "  Ended:     {}", format_timestamp(end));
    }
    let _ = writeln!(out, "  Lines:     {}", format_count(details.metrics.total_loc));
    let _ = writeln!(out, "  Functions: {}", format_count(details.metrics.total_functions));
    if !details.metrics.languages.is_empty() {
        let _ = writeln!(out, "  Languages: {}", details.metrics.languages.join(", "));
    }
    out
}

/// Table of scans for `list`.
pub fn scan_table(list: &ScanListResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24}  {:<28}  {:<12}  {:>4}  {:>8}",
        "ID", "NAME", "STATUS", "%", "FINDINGS"
    );
    for scan in &list.scans {
        let progress = derive_progress(&scan.snapshot());
        let _ = writeln!(
            out,
            "{:<24}  {:<28}  {:<12}  {:>4}  {:>8}",
            scan.id,
            truncate(&scan.scan_name, 28),
            scan.status.label(),
            progress.percentage,
            format_count(scan.findings)
        );
    }
    let p = list.pagination;
    let _ = writeln!(
        out,
        "page {} of {} ({} scans total)",
        p.page,
        p.pages.max(1),
        format_count(p.total)
    );
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
