use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::characters::{mock_characters, Character};
use crate::error::{AppError, Result};
use crate::page::{Notification, SharedPage};
use crate::store::{NewNovel, Novel, NovelStore};

/// Progress shown once a submission is accepted.
pub const PROGRESS_STARTED: u8 = 10;
/// Progress shown once the novel record exists.
pub const PROGRESS_RECORDED: u8 = 30;
pub const PROGRESS_DONE: u8 = 100;

#[derive(Clone, Debug, Serialize)]
pub struct AnalysisOutcome {
    pub novel: Novel,
    pub characters: Vec<Character>,
    /// Notifications raised by this submission.
    pub notifications: Vec<Notification>,
}

/// Drives a submission from URL input to displayed results.
#[derive(Clone)]
pub struct Analyzer {
    store: Arc<dyn NovelStore>,
    page: SharedPage,
    delay: Duration,
}

impl Analyzer {
    pub fn new(store: Arc<dyn NovelStore>, page: SharedPage, delay: Duration) -> Self {
        Self { store, page, delay }
    }

    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    /// Validates the URL and claims the page, then runs the rest of the
    /// submission on its own task. Rejections are returned before anything is
    /// spawned; the handle may be dropped without cancelling the run.
    pub fn start(&self, raw_url: &str) -> Result<JoinHandle<Result<AnalysisOutcome>>> {
        let in_flight = self.begin(raw_url)?;

        let analyzer = self.clone();
        let worker = tokio::spawn(async move { analyzer.finish(in_flight).await });

        let page = self.page.clone();
        Ok(tokio::spawn(async move {
            match worker.await {
                Ok(result) => result,
                Err(err) => {
                    tracing::error!(error = %err, "Analysis task aborted");
                    page.update(|state| state.notify(Notification::analysis_failed()));
                    Err(err.into())
                }
            }
        }))
    }

    /// [`Analyzer::start`] and wait for the outcome.
    pub async fn submit(&self, raw_url: &str) -> Result<AnalysisOutcome> {
        self.start(raw_url)?.await?
    }

    /// Runs the submission in place. Dropping the returned future clears the
    /// analyzing flag.
    pub async fn analyze(&self, raw_url: &str) -> Result<AnalysisOutcome> {
        let in_flight = self.begin(raw_url)?;
        self.finish(in_flight).await
    }

    fn begin(&self, raw_url: &str) -> Result<InFlight> {
        let url = raw_url.trim();
        if url.is_empty() {
            tracing::warn!("Rejected submission without a URL");
            self.page.update(|state| state.notify(Notification::missing_url()));
            return Err(AppError::ValidationError("a novel URL is required".to_string()));
        }

        InFlight::begin(&self.page, url)
    }

    async fn finish(&self, in_flight: InFlight) -> Result<AnalysisOutcome> {
        let url = in_flight.url.as_str();
        tracing::info!(url, "Starting analysis");
        let start_time = Instant::now();

        let mut raised = Vec::new();
        match self.run(url, &mut raised).await {
            Ok((novel, characters)) => {
                tracing::info!(url, novel_id = %novel.id, elapsed = ?start_time.elapsed(), "Analysis finished");
                Ok(AnalysisOutcome {
                    novel,
                    characters,
                    notifications: raised,
                })
            }
            Err(err) => {
                tracing::error!(error = %err, url, "Analysis error");
                self.page.update(|state| state.notify(Notification::analysis_failed()));
                Err(err)
            }
        }
    }

    async fn run(&self, url: &str, raised: &mut Vec<Notification>) -> Result<(Novel, Vec<Character>)> {
        let novel = self.store.insert_novel(NewNovel::pending(url)).await?;

        let started = Notification::analysis_started();
        self.page.update(|state| {
            state.novel = Some(novel.clone());
            state.progress = PROGRESS_RECORDED;
            state.notify(started.clone());
        });
        raised.push(started);

        // Stands in for the crawl-and-analyze backend, which does not exist yet.
        tokio::time::sleep(self.delay).await;

        let characters = mock_characters();
        self.page.update(|state| {
            state.progress = PROGRESS_DONE;
            state.characters = characters.clone();
        });

        Ok((novel, characters))
    }
}

/// Holds the page in the analyzing phase; dropping it clears the flag on
/// every exit path.
struct InFlight {
    page: SharedPage,
    url: String,
}

impl InFlight {
    fn begin(page: &SharedPage, url: &str) -> Result<Self> {
        page.update(|state| {
            if state.is_analyzing {
                tracing::warn!(url, "Rejected submission while another is in flight");
                return Err(AppError::BusyError);
            }
            state.is_analyzing = true;
            state.url = url.to_string();
            state.progress = PROGRESS_STARTED;
            Ok(())
        })?;

        Ok(Self {
            page: page.clone(),
            url: url.to_string(),
        })
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.page.update(|state| state.is_analyzing = false);
    }
}
