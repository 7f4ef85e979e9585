//! `delete`: remove a scan.

use anyhow::Context;
use clap::Args;

use super::{ApiArgs, ExitCode};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Scan identifier
    pub scan_id: String,
}

pub fn run(api: &ApiArgs, args: &DeleteArgs) -> anyhow::Result<ExitCode> {
    let settings = super::settings(api, None)?;
    let client = super::client(&settings)?;
    client
        .delete_scan(&args.scan_id)
        .with_context(|| format!("failed to delete scan {}", args.scan_id))?;
    println!("deleted {}", args.scan_id);
    Ok(ExitCode::Success)
}
