// Service and presentation trait definitions

use async_trait::async_trait;

use super::errors::ClientError;
use super::models::{DisplayFormat, DownloadRequest, ProgressSnapshot, VideoMetadata};

/// The downloader service surface the client flow depends on.
///
/// [`super::api::ApiClient`] is the real implementation; tests substitute an
/// in-memory one.
#[async_trait]
pub trait DownloaderService: Send + Sync {
    /// Fetch metadata for a URL.
    async fn get_info(&self, url: &str) -> Result<VideoMetadata, ClientError>;

    /// Submit a download job, returning the server-assigned job id.
    async fn start_download(&self, request: &DownloadRequest) -> Result<String, ClientError>;

    /// Check status of a running job.
    async fn fetch_progress(&self, job_id: &str) -> Result<ProgressSnapshot, ClientError>;

    /// Load the supported sites list; empty on failure, never an error.
    async fn supported_sites(&self) -> Vec<String>;
}

/// Render seam toward the UI.
///
/// One method per view transition the web front end makes; implementations
/// decide how each maps onto their surface.
#[async_trait]
pub trait Presenter: Send + Sync {
    /// Toggle the loading indicator while metadata is fetched.
    async fn loading(&self, active: bool);

    /// Show a dismissible error message. Never fatal; the user can retry.
    async fn show_error(&self, message: &str);

    /// Show the fetched video with its selectable formats.
    async fn show_video_info(&self, metadata: &VideoMetadata, formats: &[DisplayFormat]);

    /// Render one progress tick for the tracked job.
    async fn show_progress(&self, snapshot: &ProgressSnapshot);

    /// Transition to the completed view, with the final file name if the
    /// server reported one.
    async fn show_completed(&self, filename: Option<&str>);
}
