//! `findings`: download a scan's findings export.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use super::{ApiArgs, ExitCode};

#[derive(Args, Debug)]
pub struct FindingsArgs {
    /// Scan identifier
    pub scan_id: String,

    /// Destination file
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,
}

pub fn run(api: &ApiArgs, args: &FindingsArgs) -> anyhow::Result<ExitCode> {
    let settings = super::settings(api, None)?;
    let client = super::client(&settings)?;

    let bytes = client
        .download_findings_csv(&args.scan_id)
        .with_context(|| format!("failed to download findings of scan {}", args.scan_id))?;
    std::fs::write(&args.output, &bytes)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!("Wrote {} bytes to {}", bytes.len(), args.output.display());
    println!("{}", args.output.display());
    Ok(ExitCode::Success)
}
