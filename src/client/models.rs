// Common data models for the downloader service client

use serde::{Deserialize, Serialize};

/// Video information returned by `/get_info`
#[derive(Debug, Clone, Deserialize)]
pub struct VideoMetadata {
    pub title: Option<String>,
    pub uploader: Option<String>,
    /// Duration in seconds
    pub duration: Option<u64>,
    pub thumbnail: Option<String>,
    pub platform: Option<String>,
    #[serde(default)]
    pub formats: Vec<FormatDescriptor>,
}

/// One selectable format within a metadata response
#[derive(Debug, Clone, Deserialize)]
pub struct FormatDescriptor {
    pub format_id: String,
    /// Quality label (e.g., "1080", "720p", "hd")
    pub quality: Option<String>,
    /// Container extension (mp4, webm)
    pub ext: Option<String>,
    /// File size in bytes
    pub filesize: Option<u64>,
    /// Video codec tag; "none" marks an audio-only entry
    pub vcodec: Option<String>,
}

impl FormatDescriptor {
    /// Whether this format carries a video stream (not audio-only).
    pub fn has_video(&self) -> bool {
        self.vcodec.as_ref().map_or(false, |v| v != "none" && !v.is_empty())
    }
}

/// Job submission payload for `/download`
#[derive(Debug, Clone, Serialize)]
pub struct DownloadRequest {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_id: Option<String>,
    pub quality: String,
}

impl DownloadRequest {
    /// Best-quality fallback: no format id, server picks automatically.
    pub fn best(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            format_id: None,
            quality: "best".to_string(),
        }
    }

    /// Request a concrete format by id.
    pub fn for_format(url: impl Into<String>, format_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            format_id: Some(format_id.into()),
            quality: "best".to_string(),
        }
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = quality.into();
        self
    }
}

/// Server-reported job status.
///
/// `starting` and `downloading` keep the poll loop alive; `finished` and
/// `error` are terminal. Anything unrecognized maps to `Unknown`, which the
/// poller also treats as terminal instead of stalling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Starting,
    Downloading,
    Finished,
    Error,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Starting | Self::Downloading)
    }
}

/// One `/progress/{id}` response
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressSnapshot {
    pub status: JobStatus,
    #[serde(default)]
    pub percent: f64,
    pub speed: Option<String>,
    pub eta: Option<String>,
    pub filename: Option<String>,
    pub error: Option<String>,
}

impl ProgressSnapshot {
    /// Percent rounded for display, clamped to [0, 100].
    pub fn rounded_percent(&self) -> u32 {
        self.percent.clamp(0.0, 100.0).round() as u32
    }
}

/// Quality option shaped for UI display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayFormat {
    /// Display label (e.g., "1080p (MP4)" or "Best Quality")
    pub label: String,
    /// Human file-size string, empty when unknown
    pub size: String,
    /// Format id to submit; absent for the automatic best entry
    pub format_id: Option<String>,
    /// Quality hint sent with the download request
    pub quality: String,
}
