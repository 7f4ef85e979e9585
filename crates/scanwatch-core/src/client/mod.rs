/// REST client for the backend scanning service.
///
/// A thin blocking wrapper over `reqwest`: each method maps one endpoint,
/// checks the HTTP status, and decodes the typed response. The client
/// owns no retry policy; the [`crate::watcher`] decides what to do with
/// transient failures.
pub mod error;

pub use error::ClientError;

use crate::forms::{GithubScanForm, ZipScanForm};
use crate::model::{ScanDetails, ScanListResponse};
use reqwest::blocking::{multipart, Client, ClientBuilder, RequestBuilder, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Request timeout used when the caller does not configure one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`ScanServiceClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Service root, e.g. `https://scanner.example.com/`.
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Optional paging and filtering for project scan lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Anything that can fetch the current record of a scan.
///
/// The watcher polls through this trait so it can be driven by the real
/// client or by an in-memory source in tests.
pub trait StatusSource {
    fn fetch(&self, scan_id: &str) -> Result<ScanDetails, ClientError>;
}

impl<T: StatusSource + ?Sized> StatusSource for Arc<T> {
    fn fetch(&self, scan_id: &str) -> Result<ScanDetails, ClientError> {
        (**self).fetch(scan_id)
    }
}

/// Blocking client for the scan endpoints.
#[derive(Debug, Clone)]
pub struct ScanServiceClient {
    http: Client,
    base: Url,
}

impl ScanServiceClient {
    /// Build a client. The base URL always gets a trailing slash so
    /// endpoint paths land beneath it rather than replacing its last segment.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        Self::with_builder(config, Client::builder())
    }

    fn with_builder(config: &ApiConfig, builder: ClientBuilder) -> Result<Self, ClientError> {
        let base = parse_base_url(&config.base_url)?;
        let http = builder
            .timeout(config.timeout)
            .user_agent(concat!("scanwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Append `segments` to the base path, one path segment each.
    ///
    /// Segments are percent-encoded, so an id containing `/`, `?` or `#`
    /// stays inside its own segment. `trailing_slash` adds the final `/`
    /// the service expects on most endpoints.
    pub fn endpoint(&self, segments: &[&str], trailing_slash: bool) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl {
                url: self.base.to_string(),
                reason: "base URL cannot have a path".into(),
            })?
            .pop_if_empty()
            .extend(segments)
            .extend(trailing_slash.then_some(""));
        Ok(url)
    }

    /// `GET api/scans/{id}`
    pub fn get_scan(&self, scan_id: &str) -> Result<ScanDetails, ClientError> {
        let url = self.endpoint(&["api", "scans", id_segment(scan_id)?], false)?;
        self.send_json(self.http.get(url))
    }

    /// `POST api/scans/create/` as multipart form data.
    ///
    /// The archive is attached only when the form names one.
    pub fn start_zip_scan(&self, form: &ZipScanForm) -> Result<ScanDetails, ClientError> {
        let url = self.endpoint(&["api", "scans", "create"], true)?;
        let mut body = multipart::Form::new()
            .text("scan_name", form.scan_name.clone())
            .text("project_id", form.project_id.clone());
        if let Some(path) = &form.zip_file {
            body = body.file("zip_file", path).map_err(|source| ClientError::Io {
                path: path.clone(),
                source,
            })?;
        }
        info!("Creating zip scan '{}' in project {}", form.scan_name, form.project_id);
        self.send_json(self.http.post(url).multipart(body))
    }

    /// `POST api/scans/create/` as JSON.
    pub fn start_github_scan(&self, form: &GithubScanForm) -> Result<ScanDetails, ClientError> {
        let url = self.endpoint(&["api", "scans", "create"], true)?;
        info!(
            "Creating GitHub scan '{}' for {}/{}",
            form.scan_name, form.git_rowner, form.git_repo
        );
        self.send_json(self.http.post(url).json(form))
    }

    /// `GET api/scans/project/{project_id}/`
    pub fn list_project_scans(
        &self,
        project_id: &str,
        query: &ListQuery,
    ) -> Result<ScanListResponse, ClientError> {
        let url = self.endpoint(&["api", "scans", "project", id_segment(project_id)?], true)?;
        self.send_json(self.http.get(url).query(query))
    }

    /// `DELETE api/scans/delete/{id}/`
    pub fn delete_scan(&self, scan_id: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "scans", "delete", id_segment(scan_id)?], true)?;
        self.send(self.http.delete(url))?;
        info!("Deleted scan {scan_id}");
        Ok(())
    }

    /// `GET api/findings/scan/csv/{id}/`: the raw CSV export.
    pub fn download_findings_csv(&self, scan_id: &str) -> Result<Vec<u8>, ClientError> {
        let segments = ["api", "findings", "scan", "csv", id_segment(scan_id)?];
        let url = self.endpoint(&segments, true)?;
        let bytes = self.send(self.http.get(url))?.bytes()?;
        Ok(bytes.to_vec())
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send()?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url());
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            body: error::excerpt(&body),
        })
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let bytes = self.send(request)?.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl StatusSource for ScanServiceClient {
    fn fetch(&self, scan_id: &str) -> Result<ScanDetails, ClientError> {
        self.get_scan(scan_id)
    }
}

/// Ids travel as a single path segment. Blank ids and the dot segments,
/// which URL normalisation would drop or resolve, are refused.
fn id_segment(id: &str) -> Result<&str, ClientError> {
    if id.trim().is_empty() || id == "." || id == ".." {
        return Err(ClientError::InvalidId(id.to_owned()));
    }
    Ok(id)
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidUrl {
        url: raw.to_owned(),
        reason,
    };
    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
