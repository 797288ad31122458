// Progress polling task
//
// Sequential fetch-then-sleep loop over /progress/{id}. The server owns the
// status transitions; this task only decides whether to keep polling and
// which render step to drive. Requests for the same job never overlap.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::display::file_name;
use super::models::JobStatus;
use super::traits::{DownloaderService, Presenter};

/// Timing knobs for the polling loop
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Delay between status checks
    pub poll_interval: Duration,
    /// How long the finished state stays visible before the completed view
    pub completion_delay: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            completion_delay: Duration::from_secs(2),
        }
    }
}

/// Handle to a running poll task. Dropping or stopping it aborts the task,
/// so a stale job can never drive renders after it has been replaced.
pub struct PollHandle {
    job_id: String,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Id of the job this handle tracks.
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Stop tracking. In-flight or scheduled polls are cancelled.
    pub fn stop(&self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    /// Wait for the task to reach a terminal state on its own.
    pub async fn finished(mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

pub struct ProgressPoller;

impl ProgressPoller {
    /// Start tracking a job. The returned handle owns the task.
    pub fn spawn(
        service: Arc<dyn DownloaderService>,
        presenter: Arc<dyn Presenter>,
        job_id: String,
        config: PollerConfig,
    ) -> PollHandle {
        let task_job_id = job_id.clone();
        let task = tokio::spawn(async move {
            Self::run(service, presenter, &task_job_id, &config).await;
        });

        PollHandle {
            job_id,
            task: Some(task),
        }
    }

    async fn run(
        service: Arc<dyn DownloaderService>,
        presenter: Arc<dyn Presenter>,
        job_id: &str,
        config: &PollerConfig,
    ) {
        loop {
            // A failed poll is terminal; tracking is not retried.
            let snapshot = match service.fetch_progress(job_id).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    eprintln!("[Poller] Progress check failed for {}: {}", job_id, e);
                    presenter.show_error(&e.user_message()).await;
                    return;
                }
            };

            match snapshot.status {
                JobStatus::Starting | JobStatus::Downloading => {
                    presenter.show_progress(&snapshot).await;
                    tokio::time::sleep(config.poll_interval).await;
                }
                JobStatus::Finished => {
                    presenter.show_progress(&snapshot).await;
                    tokio::time::sleep(config.completion_delay).await;
                    presenter
                        .show_completed(snapshot.filename.as_deref().map(file_name))
                        .await;
                    return;
                }
                JobStatus::Error => {
                    let message = snapshot
                        .error
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| "Download failed".to_string());
                    presenter.show_error(&message).await;
                    return;
                }
                JobStatus::Unknown => {
                    // Statuses we don't recognize end tracking instead of
                    // stalling the UI.
                    eprintln!("[Poller] Unrecognized status for {}, stopping", job_id);
                    presenter.show_error("Download failed").await;
                    return;
                }
            }
        }
    }
}
