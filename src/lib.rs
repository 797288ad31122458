//! Client for the video downloader web service.
//!
//! The service does the heavy lifting (extraction, encoding) behind an
//! HTTP+JSON API; this crate covers the client side of that contract:
//! validating input URLs, fetching metadata, ranking formats for display,
//! submitting download jobs, and polling job progress until a terminal
//! state. Rendering lives behind the [`client::Presenter`] trait.

pub mod client;

pub use client::display::{file_name, format_duration, format_file_size};
pub use client::validate::is_valid_url;
pub use client::{
    ApiClient, ApiConfig, ClientError, Command, DisplayFormat, DownloadRequest, DownloaderService,
    FormatDescriptor, FormatSelector, JobStatus, PollHandle, PollerConfig, Presenter,
    ProgressPoller, ProgressSnapshot, Session, VideoMetadata,
};
