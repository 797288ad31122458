// Error types for the downloader service client

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// URL rejected before any request was made
    InvalidUrl(String),

    /// Metadata fetch failed (server-reported or transport)
    Metadata(String),

    /// Download attempted with no video selected
    NoSelection,

    /// Job submission failed
    DownloadStart(String),

    /// Progress check failed, or the job itself reported an error
    Poll(String),
}

/// Fallback messages used when the server gives no structured error.
pub const GENERIC_METADATA_ERROR: &str =
    "Unable to get video information. Please check the URL and try again.";
pub const GENERIC_DOWNLOAD_ERROR: &str = "Unable to start the download";
pub const GENERIC_POLL_ERROR: &str = "Unable to check download progress";

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl(_) => write!(
                f,
                "Please enter a valid URL (e.g., https://www.youtube.com/watch?v=...)"
            ),
            Self::Metadata(msg) => write!(f, "{}", msg),
            Self::NoSelection => write!(f, "Please select a video first"),
            Self::DownloadStart(msg) => write!(f, "{}", msg),
            Self::Poll(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl ClientError {
    /// Message suitable for the error banner.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
