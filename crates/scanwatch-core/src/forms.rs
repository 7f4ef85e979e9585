/// Scan-creation forms and their client-side validation.
///
/// Validation collects every failing field instead of stopping at the
/// first, so a front end can mark all of them at once. Emptiness is judged
/// on trimmed values; the values themselves are submitted untouched.
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// A form input that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    ProjectId,
    ScanName,
    ZipFile,
    GitToken,
    GitRepo,
    GitRepoOwner,
}

impl FormField {
    /// Field name as submitted to the backend.
    pub fn name(self) -> &'static str {
        match self {
            Self::ProjectId => "project_id",
            Self::ScanName => "scan_name",
            Self::ZipFile => "zip_file",
            Self::GitToken => "git_token",
            Self::GitRepo => "git_repo",
            Self::GitRepoOwner => "git_rowner",
        }
    }
}

/// Per-field validation messages, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} invalid field(s): {}", .0.len(), summary(.0))]
pub struct FormErrors(BTreeMap<FormField, &'static str>);

fn summary(errors: &BTreeMap<FormField, &'static str>) -> String {
    errors.values().copied().collect::<Vec<_>>().join("; ")
}

impl FormErrors {
    fn require(&mut self, field: FormField, value: &str, message: &'static str) {
        if value.trim().is_empty() {
            self.0.insert(field, message);
        }
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.0.iter().map(|(field, msg)| (*field, *msg))
    }
}

/// Upload a zip archive of source code.
#[derive(Debug, Clone, Default)]
pub struct ZipScanForm {
    pub project_id: String,
    pub scan_name: String,
    pub zip_file: Option<PathBuf>,
}

impl ZipScanForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require(FormField::ProjectId, &self.project_id, "Project selection is required");
        errors.require(FormField::ScanName, &self.scan_name, "Scan name is required");
        match &self.zip_file {
            None => {
                errors.0.insert(FormField::ZipFile, "Zip file is required");
            }
            Some(path) if !has_zip_extension(path) => {
                errors.0.insert(FormField::ZipFile, "Only .zip archives are supported");
            }
            Some(_) => {}
        }
        errors.into_result()
    }
}

fn has_zip_extension(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// Import a repository from GitHub. Submitted as JSON as-is.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GithubScanForm {
    pub project_id: String,
    pub scan_name: String,
    pub git_token: String,
    pub git_repo: String,
    pub git_rowner: String,
}

impl GithubScanForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require(FormField::ProjectId, &self.project_id, "Project selection is required");
        errors.require(FormField::ScanName, &self.scan_name, "Scan name is required");
        errors.require(FormField::GitRepo, &self.git_repo, "GitHub Repository is required");
        errors.require(FormField::GitToken, &self.git_token, "GitHub Token is required");
        errors.require(
            FormField::GitRepoOwner,
            &self.git_rowner,
            "GitHub Repository Owner is required",
        );
        errors.into_result()
    }
}

/// Where scan sources can be imported from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanSource {
    Zip,
    Github,
    Azure,
}

/// Raised when a listed source has no import path yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{} import is not implemented", .0.label())]
pub struct UnsupportedSource(pub ScanSource);

impl ScanSource {
    pub const ALL: [ScanSource; 3] = [Self::Zip, Self::Github, Self::Azure];

    pub fn label(self) -> &'static str {
        match self {
            Self::Zip => "Upload Zip",
            Self::Github => "GitHub",
            Self::Azure => "Azure DevOps",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Zip => "Upload a compressed file",
            Self::Github => "Connect from GitHub",
            Self::Azure => "Import from Azure",
        }
    }

    pub fn ensure_supported(self) -> Result<(), UnsupportedSource> {
        match self {
            Self::Zip | Self::Github => Ok(()),
            Self::Azure => Err(UnsupportedSource(self)),
        }
    }
}
