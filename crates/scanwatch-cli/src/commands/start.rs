//! `start`: create a scan from a zip archive or a GitHub repository.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use scanwatch_core::forms::{
    FormErrors, FormField, GithubScanForm, ScanSource, UnsupportedSource, ZipScanForm,
};
use scanwatch_core::model::ScanDetails;

use super::{ApiArgs, ExitCode};

#[derive(Subcommand, Debug)]
pub enum StartCommand {
    /// Upload a zip archive of the source tree
    Zip(ZipArgs),
    /// Import a repository from GitHub
    Github(GithubArgs),
    /// Import from Azure DevOps (not implemented)
    Azure,
}

/// Fields shared by every scan source.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Project the scan belongs to
    #[arg(long, default_value = "")]
    pub project: String,

    /// Display name of the scan
    #[arg(long, default_value = "")]
    pub name: String,

    /// Follow the new scan until it finishes
    #[arg(long)]
    pub watch: bool,
}

#[derive(Args, Debug)]
pub struct ZipArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Zip archive to upload
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GithubArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// GitHub access token
    #[arg(long, env = "SCANWATCH_GIT_TOKEN", default_value = "", hide_env_values = true)]
    pub token: String,

    /// Repository owner (user or organisation)
    #[arg(long, default_value = "")]
    pub owner: String,

    /// Repository name
    #[arg(long, default_value = "")]
    pub repo: String,
}

pub fn run(api: &ApiArgs, cmd: &StartCommand) -> anyhow::Result<ExitCode> {
    let (created, common) = match cmd {
        StartCommand::Zip(args) => {
            let form = ZipScanForm {
                project_id: args.common.project.clone(),
                scan_name: args.common.name.clone(),
                zip_file: args.file.clone(),
            };
            if let Err(errors) = form.validate() {
                report(&errors);
                return Ok(ExitCode::Error);
            }
            let client = super::client(&super::settings(api, None)?)?;
            let created = client
                .start_zip_scan(&form)
                .context("failed to create zip scan")?;
            (created, &args.common)
        }
        StartCommand::Github(args) => {
            let form = GithubScanForm {
                project_id: args.common.project.clone(),
                scan_name: args.common.name.clone(),
                git_token: args.token.clone(),
                git_repo: args.repo.clone(),
                git_rowner: args.owner.clone(),
            };
            if let Err(errors) = form.validate() {
                report(&errors);
                return Ok(ExitCode::Error);
            }
            let client = super::client(&super::settings(api, None)?)?;
            let created = client
                .start_github_scan(&form)
                .context("failed to create GitHub scan")?;
            (created, &args.common)
        }
        StartCommand::Azure => return Err(UnsupportedSource(ScanSource::Azure).into()),
    };

    announce(&created);
    if common.watch {
        let args = super::watch::WatchArgs {
            scan_id: created.id.to_string(),
            interval_ms: None,
            quiet: false,
        };
        return super::watch::run(api, &args);
    }
    Ok(ExitCode::Success)
}

fn report(errors: &FormErrors) {
    for (field, message) in errors.iter() {
        eprintln!("error: --{}: {message}", flag_for(field));
    }
}

fn flag_for(field: FormField) -> &'static str {
    match field {
        FormField::ProjectId => "project",
        FormField::ScanName => "name",
        FormField::ZipFile => "file",
        FormField::GitToken => "token",
        FormField::GitRepo => "repo",
        FormField::GitRepoOwner => "owner",
    }
}

fn announce(scan: &ScanDetails) {
    println!(
        "created scan {} ({}) in project {}: {}",
        scan.id,
        scan.scan_name,
        scan.project_id,
        scan.status.label()
    );
}
