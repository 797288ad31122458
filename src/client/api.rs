// HTTP client for the downloader service endpoints

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::errors::{
    ClientError, GENERIC_DOWNLOAD_ERROR, GENERIC_METADATA_ERROR, GENERIC_POLL_ERROR,
};
use super::models::{DownloadRequest, ProgressSnapshot, VideoMetadata};
use super::traits::DownloaderService;

/// Configuration for the service client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the downloader service (no trailing slash)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Structured error body the server attaches to non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DownloadStarted {
    download_id: String,
}

#[derive(Debug, Deserialize)]
struct SupportedSites {
    #[serde(default)]
    sites: Vec<String>,
}

/// Client for the downloader service HTTP+JSON API.
///
/// Holds one shared reqwest client; all methods are independent of each
/// other, session sequencing lives in [`super::session::Session`].
pub struct ApiClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Metadata(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Pull the structured error message out of a non-2xx response, if the
    /// body carries one.
    async fn server_error(response: reqwest::Response) -> Option<String> {
        response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .filter(|msg| !msg.is_empty())
    }
}

#[async_trait]
impl DownloaderService for ApiClient {
    /// Fetch metadata for a URL via POST /get_info.
    ///
    /// Transport failures and server-reported failures surface as the same
    /// error kind; only the message differs.
    async fn get_info(&self, url: &str) -> Result<VideoMetadata, ClientError> {
        let response = self
            .http
            .post(self.endpoint("/get_info"))
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await
            .map_err(|e| {
                eprintln!("[Api] get_info transport error: {}", e);
                ClientError::Metadata(GENERIC_METADATA_ERROR.to_string())
            })?;

        if !response.status().is_success() {
            let message = Self::server_error(response).await.unwrap_or_else(|| {
                "Failed to get video information".to_string()
            });
            return Err(ClientError::Metadata(message));
        }

        response.json::<VideoMetadata>().await.map_err(|e| {
            eprintln!("[Api] get_info bad response body: {}", e);
            ClientError::Metadata(GENERIC_METADATA_ERROR.to_string())
        })
    }

    /// Submit a download job via POST /download, returning the job id.
    async fn start_download(&self, request: &DownloadRequest) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.endpoint("/download"))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                eprintln!("[Api] download transport error: {}", e);
                ClientError::DownloadStart(GENERIC_DOWNLOAD_ERROR.to_string())
            })?;

        if !response.status().is_success() {
            let message = Self::server_error(response)
                .await
                .unwrap_or_else(|| "Failed to start download".to_string());
            return Err(ClientError::DownloadStart(message));
        }

        response
            .json::<DownloadStarted>()
            .await
            .map(|d| d.download_id)
            .map_err(|e| {
                eprintln!("[Api] download bad response body: {}", e);
                ClientError::DownloadStart(GENERIC_DOWNLOAD_ERROR.to_string())
            })
    }

    /// Check job status via GET /progress/{id}.
    async fn fetch_progress(&self, job_id: &str) -> Result<ProgressSnapshot, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&format!("/progress/{}", job_id)))
            .send()
            .await
            .map_err(|e| {
                eprintln!("[Api] progress transport error: {}", e);
                ClientError::Poll(GENERIC_POLL_ERROR.to_string())
            })?;

        response.json::<ProgressSnapshot>().await.map_err(|e| {
            eprintln!("[Api] progress bad response body: {}", e);
            ClientError::Poll(GENERIC_POLL_ERROR.to_string())
        })
    }

    /// Load the supported sites list. Failure here is never fatal; callers
    /// get an empty list and a diagnostic log instead of an error.
    async fn supported_sites(&self) -> Vec<String> {
        let result = async {
            self.http
                .get(self.endpoint("/supported_sites"))
                .send()
                .await?
                .json::<SupportedSites>()
                .await
        }
        .await;

        match result {
            Ok(body) => {
                eprintln!("[Api] Supported sites loaded: {}", body.sites.len());
                body.sites
            }
            Err(e) => {
                eprintln!("[Api] Failed to load supported sites: {}", e);
                Vec::new()
            }
        }
    }
}
