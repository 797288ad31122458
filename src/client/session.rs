// Session controller
//
// Owns the single current video and tracked job. Input handlers produce
// typed commands; this controller runs the flow and drives the Presenter,
// so the logic stays testable without any UI attached.

use std::sync::Arc;

use super::errors::ClientError;
use super::formats::FormatSelector;
use super::models::{DownloadRequest, VideoMetadata};
use super::poller::{PollHandle, PollerConfig, ProgressPoller};
use super::traits::{DownloaderService, Presenter};
use super::validate::is_valid_url;

/// Typed user actions consumed by the session.
#[derive(Debug, Clone)]
pub enum Command {
    /// URL form submitted
    SubmitUrl(String),
    /// A format button clicked; both fields absent means automatic best
    StartDownload {
        format_id: Option<String>,
        quality: Option<String>,
    },
}

struct CurrentVideo {
    url: String,
    metadata: VideoMetadata,
}

pub struct Session {
    service: Arc<dyn DownloaderService>,
    presenter: Arc<dyn Presenter>,
    poller_config: PollerConfig,
    current: Option<CurrentVideo>,
    job: Option<PollHandle>,
}

impl Session {
    pub fn new(service: Arc<dyn DownloaderService>, presenter: Arc<dyn Presenter>) -> Self {
        Self::with_poller_config(service, presenter, PollerConfig::default())
    }

    pub fn with_poller_config(
        service: Arc<dyn DownloaderService>,
        presenter: Arc<dyn Presenter>,
        poller_config: PollerConfig,
    ) -> Self {
        Self {
            service,
            presenter,
            poller_config,
            current: None,
            job: None,
        }
    }

    /// Startup step: load the supported sites list. Failures are logged by
    /// the service and yield an empty list; the session never errors here.
    pub async fn load_supported_sites(&self) -> Vec<String> {
        self.service.supported_sites().await
    }

    pub async fn handle(&mut self, command: Command) {
        match command {
            Command::SubmitUrl(url) => self.submit_url(url).await,
            Command::StartDownload { format_id, quality } => {
                self.start_download(format_id, quality).await
            }
        }
    }

    /// Id of the job currently being tracked, if any.
    pub fn tracked_job(&self) -> Option<&str> {
        self.job.as_ref().map(|h| h.job_id())
    }

    /// Metadata of the current video, if one has been fetched.
    pub fn current_video(&self) -> Option<&VideoMetadata> {
        self.current.as_ref().map(|c| &c.metadata)
    }

    async fn submit_url(&mut self, url: String) {
        let url = url.trim().to_string();
        if url.is_empty() || !is_valid_url(&url) {
            self.presenter
                .show_error(&ClientError::InvalidUrl(url).user_message())
                .await;
            return;
        }

        self.presenter.loading(true).await;

        match self.service.get_info(&url).await {
            Ok(metadata) => {
                let formats = FormatSelector::select(&metadata.formats);
                self.presenter.show_video_info(&metadata, &formats).await;
                // New selection context replaces both the video and any
                // tracked job.
                self.current = Some(CurrentVideo { url, metadata });
                self.drop_job();
            }
            Err(e) => {
                self.presenter.show_error(&e.user_message()).await;
            }
        }

        self.presenter.loading(false).await;
    }

    async fn start_download(&mut self, format_id: Option<String>, quality: Option<String>) {
        let current = match &self.current {
            Some(current) => current,
            None => {
                self.presenter
                    .show_error(&ClientError::NoSelection.user_message())
                    .await;
                return;
            }
        };

        let mut request = match format_id {
            Some(id) => DownloadRequest::for_format(&current.url, id),
            None => DownloadRequest::best(&current.url),
        };
        if let Some(quality) = quality {
            request = request.with_quality(quality);
        }

        match self.service.start_download(&request).await {
            Ok(job_id) => {
                eprintln!("[Session] Tracking download {}", job_id);
                // Replacing the handle aborts any poll still scheduled for
                // the previous job.
                self.drop_job();
                self.job = Some(ProgressPoller::spawn(
                    self.service.clone(),
                    self.presenter.clone(),
                    job_id,
                    self.poller_config.clone(),
                ));
            }
            Err(e) => {
                self.presenter.show_error(&e.user_message()).await;
            }
        }
    }

    fn drop_job(&mut self) {
        if let Some(job) = self.job.take() {
            eprintln!("[Session] Abandoning job {}", job.job_id());
            job.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::client::models::{DisplayFormat, ProgressSnapshot};

    fn metadata_with_formats() -> VideoMetadata {
        serde_json::from_value(serde_json::json!({
            "title": "Test Video",
            "uploader": "Test Channel",
            "duration": 125,
            "platform": "YouTube",
            "formats": [
                {"format_id": "137", "quality": "1080", "ext": "mp4", "vcodec": "avc1"},
                {"format_id": "136", "quality": "720", "ext": "mp4", "vcodec": "avc1"},
            ]
        }))
        .unwrap()
    }

    struct FakeService {
        info: Result<VideoMetadata, ClientError>,
        job_ids: Mutex<Vec<String>>,
        downloads_started: AtomicUsize,
        progress_by_job: Mutex<Vec<(String, ProgressSnapshot)>>,
    }

    impl FakeService {
        fn new(info: Result<VideoMetadata, ClientError>) -> Arc<Self> {
            Arc::new(Self {
                info,
                job_ids: Mutex::new(vec!["job-a".to_string(), "job-b".to_string()]),
                downloads_started: AtomicUsize::new(0),
                progress_by_job: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl DownloaderService for FakeService {
        async fn get_info(&self, _url: &str) -> Result<VideoMetadata, ClientError> {
            self.info.clone()
        }

        async fn start_download(&self, _request: &DownloadRequest) -> Result<String, ClientError> {
            self.downloads_started.fetch_add(1, Ordering::SeqCst);
            Ok(self.job_ids.lock().unwrap().remove(0))
        }

        async fn fetch_progress(&self, job_id: &str) -> Result<ProgressSnapshot, ClientError> {
            let snapshot: ProgressSnapshot = serde_json::from_value(serde_json::json!({
                "status": "downloading",
                "percent": 10.0,
            }))
            .unwrap();
            self.progress_by_job
                .lock()
                .unwrap()
                .push((job_id.to_string(), snapshot.clone()));
            Ok(snapshot)
        }

        async fn supported_sites(&self) -> Vec<String> {
            vec!["youtube.com".to_string()]
        }
    }

    #[derive(Default)]
    struct RecordingPresenter {
        errors: Mutex<Vec<String>>,
        shown_formats: Mutex<Vec<Vec<DisplayFormat>>>,
    }

    #[async_trait]
    impl Presenter for RecordingPresenter {
        async fn loading(&self, _active: bool) {}

        async fn show_error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }

        async fn show_video_info(&self, _metadata: &VideoMetadata, formats: &[DisplayFormat]) {
            self.shown_formats.lock().unwrap().push(formats.to_vec());
        }

        async fn show_progress(&self, _snapshot: &ProgressSnapshot) {}

        async fn show_completed(&self, _filename: Option<&str>) {}
    }

    fn slow_poller() -> PollerConfig {
        PollerConfig {
            poll_interval: Duration::from_millis(200),
            completion_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn invalid_url_never_reaches_the_service() {
        let service = FakeService::new(Err(ClientError::Metadata("unreachable".into())));
        let presenter = Arc::new(RecordingPresenter::default());
        let mut session = Session::new(service, presenter.clone());

        session.handle(Command::SubmitUrl("not a url".to_string())).await;

        let errors = presenter.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0],
            ClientError::InvalidUrl("not a url".to_string()).user_message()
        );
        assert!(errors[0].contains("valid URL"));
    }

    #[tokio::test]
    async fn submit_url_shows_ranked_formats() {
        let service = FakeService::new(Ok(metadata_with_formats()));
        let presenter = Arc::new(RecordingPresenter::default());
        let mut session = Session::new(service, presenter.clone());

        session
            .handle(Command::SubmitUrl("https://youtube.com/watch?v=1".to_string()))
            .await;

        assert!(session.current_video().is_some());
        let shown = presenter.shown_formats.lock().unwrap();
        assert_eq!(shown.len(), 1);
        assert!(shown[0][0].format_id.is_none());
        assert_eq!(shown[0][1].quality, "1080");
    }

    #[tokio::test]
    async fn download_without_selection_fails_locally() {
        let service = FakeService::new(Ok(metadata_with_formats()));
        let presenter = Arc::new(RecordingPresenter::default());
        let mut session = Session::new(service.clone(), presenter.clone());

        session
            .handle(Command::StartDownload {
                format_id: None,
                quality: None,
            })
            .await;

        assert_eq!(service.downloads_started.load(Ordering::SeqCst), 0);
        let errors = presenter.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0], "Please select a video first");
    }

    #[tokio::test]
    async fn new_download_replaces_the_tracked_job() {
        let service = FakeService::new(Ok(metadata_with_formats()));
        let presenter = Arc::new(RecordingPresenter::default());
        let mut session =
            Session::with_poller_config(service.clone(), presenter.clone(), slow_poller());

        session
            .handle(Command::SubmitUrl("https://youtube.com/watch?v=1".to_string()))
            .await;
        session
            .handle(Command::StartDownload {
                format_id: Some("137".to_string()),
                quality: None,
            })
            .await;
        assert_eq!(session.tracked_job(), Some("job-a"));

        session
            .handle(Command::StartDownload {
                format_id: None,
                quality: None,
            })
            .await;
        assert_eq!(session.tracked_job(), Some("job-b"));

        let stale_polls = {
            let polled = service.progress_by_job.lock().unwrap();
            polled.iter().filter(|(id, _)| id == "job-a").count()
        };

        // Give the aborted poller time to fire if it were still alive.
        tokio::time::sleep(Duration::from_millis(500)).await;

        let polled = service.progress_by_job.lock().unwrap();
        let stale_after = polled.iter().filter(|(id, _)| id == "job-a").count();
        assert_eq!(stale_after, stale_polls);
        assert!(polled.iter().any(|(id, _)| id == "job-b"));
    }
}
