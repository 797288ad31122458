// Client module - URL-to-finished-download flow against the job service

pub mod api;
pub mod display;
pub mod errors;
pub mod formats;
pub mod models;
pub mod poller;
pub mod session;
pub mod traits;
pub mod validate;

pub use api::{ApiClient, ApiConfig};
pub use errors::ClientError;
pub use formats::FormatSelector;
pub use models::{
    DisplayFormat, DownloadRequest, FormatDescriptor, JobStatus, ProgressSnapshot, VideoMetadata,
};
pub use poller::{PollHandle, PollerConfig, ProgressPoller};
pub use session::{Command, Session};
pub use traits::{DownloaderService, Presenter};
pub use validate::is_valid_url;
