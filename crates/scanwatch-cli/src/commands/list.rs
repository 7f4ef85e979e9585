//! `list`: page through a project's scans, optionally exporting CSV.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use scanwatch_core::client::ListQuery;
use scanwatch_core::export::export_scans_csv;

use super::{ApiArgs, ExitCode};
use crate::render;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project identifier
    pub project_id: String,

    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u32>,

    /// Scans per page
    #[arg(long)]
    pub limit: Option<u32>,

    /// Filter by scan name
    #[arg(long)]
    pub search: Option<String>,

    /// Also write the listed scans to this CSV file
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

pub fn run(api: &ApiArgs, args: &ListArgs) -> anyhow::Result<ExitCode> {
    let settings = super::settings(api, None)?;
    let client = super::client(&settings)?;

    let query = ListQuery {
        page: args.page,
        limit: args.limit,
        search: args.search.clone(),
    };
    let list = client
        .list_project_scans(&args.project_id, &query)
        .with_context(|| format!("failed to list scans of project {}", args.project_id))?;

    print!("{}", render::scan_table(&list));

    if let Some(path) = &args.csv {
        export_scans_csv(&list.scans, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(ExitCode::Success)
}
