//! `status`: fetch a scan once and print it.

use anyhow::Context;
use clap::Args;
use scanwatch_core::progress::derive_progress;
use serde_json::json;

use super::{ApiArgs, ExitCode};
use crate::render;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Scan identifier
    pub scan_id: String,

    /// Print the record and derived progress as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(api: &ApiArgs, args: &StatusArgs) -> anyhow::Result<ExitCode> {
    let settings = super::settings(api, None)?;
    let client = super::client(&settings)?;

    let details = client
        .get_scan(&args.scan_id)
        .with_context(|| format!("failed to fetch scan {}", args.scan_id))?;
    let progress = derive_progress(&details.snapshot());

    if args.json {
        let out = json!({
            "scan": details,
            "progress": {
                "percentage": progress.percentage,
                "phase": progress.phase_label(),
            },
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", render::dashboard(&details, &progress, progress.percentage));
    }
    Ok(ExitCode::Success)
}
