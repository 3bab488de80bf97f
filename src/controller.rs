//! File list screen controller.
//!
//! Owns the observable [`FileListSnapshot`] of one screen instance, runs the
//! listing fetch, filters the result and turns selections into viewer
//! navigation requests.
//!
//! ## Fetch ordering
//!
//! Every fetch is tagged with a generation number taken from a per-instance
//! counter. Starting a fetch cancels the previous in-flight one, and a
//! resolution is only applied when its generation is still the latest issued,
//! so a slow superseded response can never overwrite a newer list. After
//! [`FileListController::unmount`] every pending resolution is dropped.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::collaborators::{ErrorReporter, LoggingNavigator, Navigator, TracingReporter};
use crate::config::AppConfig;
use crate::error::{FetchError, FetchResult};
use crate::fetcher::ListFetcher;
use crate::filter::ExtensionFilter;
use crate::layout::{ServerLayout, SiblingImage};
use crate::metrics::Metrics;
use crate::types::{FileListItem, FileListSnapshot, FilteredFileEntry, LoadPhase, NavigationRequest, RawFileEntry};

struct Flight {
    /// Generation of the most recently issued fetch.
    issued: u64,
    activated: bool,
    unmounted: bool,
    in_flight: Option<CancellationToken>,
}

struct Inner {
    id: Uuid,
    layout: ServerLayout,
    filter: ExtensionFilter,
    fetcher: Arc<dyn ListFetcher>,
    navigator: Arc<dyn Navigator>,
    reporter: Arc<dyn ErrorReporter>,
    timeout: Option<Duration>,
    metrics: Metrics,
    root: CancellationToken,
    // lock order: flight, then state
    flight: Mutex<Flight>,
    state: watch::Sender<FileListSnapshot>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

/// Cloneable handle to one screen instance's controller.
#[derive(Clone)]
pub struct FileListController {
    inner: Arc<Inner>,
}

pub struct ControllerBuilder {
    layout: ServerLayout,
    fetcher: Arc<dyn ListFetcher>,
    filter: ExtensionFilter,
    navigator: Arc<dyn Navigator>,
    reporter: Arc<dyn ErrorReporter>,
    timeout: Option<Duration>,
}

impl ControllerBuilder {
    pub fn filter(mut self, filter: ExtensionFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> FileListController {
        let (state, _) = watch::channel(FileListSnapshot::default());
        FileListController {
            inner: Arc::new(Inner {
                id: Uuid::new_v4(),
                layout: self.layout,
                filter: self.filter,
                fetcher: self.fetcher,
                navigator: self.navigator,
                reporter: self.reporter,
                timeout: self.timeout,
                metrics: Metrics::new(),
                root: CancellationToken::new(),
                flight: Mutex::new(Flight { issued: 0, activated: false, unmounted: false, in_flight: None }),
                state,
            }),
        }
    }
}

impl FileListController {
    pub fn builder(layout: ServerLayout, fetcher: Arc<dyn ListFetcher>) -> ControllerBuilder {
        ControllerBuilder {
            layout,
            fetcher,
            filter: ExtensionFilter::default(),
            navigator: Arc::new(LoggingNavigator),
            reporter: Arc::new(TracingReporter),
            timeout: None,
        }
    }

    /// Wires layout, filter and timeout from configuration.
    pub fn from_config(
        cfg: &AppConfig,
        fetcher: Arc<dyn ListFetcher>,
        navigator: Arc<dyn Navigator>,
    ) -> FileListController {
        let layout = ServerLayout::with_thumbnails(
            &cfg.server.base_url,
            SiblingImage { extension: cfg.thumbnails.extension.clone() },
        );
        Self::builder(layout, fetcher)
            .filter(ExtensionFilter::new(cfg.filter.allowed_extensions.iter().cloned()))
            .navigator(navigator)
            .timeout(cfg.fetch_timeout())
            .build()
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn layout(&self) -> &ServerLayout {
        &self.inner.layout
    }

    pub fn metrics(&self) -> &Metrics {
        &self.inner.metrics
    }

    /// Screen became visible. Only the first call per instance starts a fetch.
    ///
    /// Returns whether a fetch was started. Must be called within a Tokio runtime.
    pub fn activate(&self) -> bool {
        let mut flight = self.inner.lock_flight();
        if flight.unmounted || flight.activated {
            debug!(controller = %self.inner.id, "activate ignored");
            return false;
        }
        flight.activated = true;
        self.start_fetch(&mut flight);
        true
    }

    /// Manual retry. Supersedes any fetch still in flight.
    pub fn refresh(&self) -> bool {
        let mut flight = self.inner.lock_flight();
        if flight.unmounted {
            return false;
        }
        flight.activated = true;
        self.start_fetch(&mut flight);
        true
    }

    /// Screen torn down. Terminal: pending resolutions and later calls are no-ops.
    pub fn unmount(&self) {
        let mut flight = self.inner.lock_flight();
        if flight.unmounted {
            return;
        }
        flight.unmounted = true;
        flight.in_flight = None;
        self.inner.root.cancel();
        self.inner.state.send_modify(|s| s.phase = LoadPhase::Unmounted);
        debug!(controller = %self.inner.id, "unmounted");
    }

    /// Navigates to the viewer with the entry's document locator.
    ///
    /// Does not touch the list state. Returns `None` once unmounted.
    pub fn select(&self, entry: &FilteredFileEntry) -> Option<NavigationRequest> {
        if self.inner.lock_flight().unmounted {
            return None;
        }
        let request = NavigationRequest::viewer(self.inner.layout.document_url(entry));
        self.inner.metrics.inc_selections();
        info!(controller = %self.inner.id, file = %entry.name, "selected");
        self.inner.navigator.navigate(request.clone());
        Some(request)
    }

    /// Selects the entry of the current list named `name`, if present.
    pub fn select_by_name(&self, name: &str) -> Option<NavigationRequest> {
        let entry = self.inner.state.borrow().files.iter().find(|f| f.name == name).cloned();
        match entry {
            Some(entry) => self.select(&entry),
            None => {
                warn!("No listed document named {:?}", name);
                None
            }
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FileListSnapshot> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> FileListSnapshot {
        self.inner.state.borrow().clone()
    }

    pub fn phase(&self) -> LoadPhase {
        self.inner.state.borrow().phase
    }

    pub fn files(&self) -> Vec<FilteredFileEntry> {
        self.inner.state.borrow().files.clone()
    }

    /// Display rows for the current list.
    pub fn items(&self) -> Vec<FileListItem> {
        let state = self.inner.state.borrow();
        state
            .files
            .iter()
            .map(|f| FileListItem { name: f.name.clone(), thumbnail_url: self.inner.layout.thumbnail_url(f) })
            .collect()
    }

    /// Waits until no fetch is outstanding and returns the state at that point.
    pub async fn settled(&self) -> FileListSnapshot {
        let mut rx = self.subscribe();
        let settled = match rx.wait_for(|s| s.phase.is_settled()).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }

    /// Feeds a fetch outcome for `generation` through the same path a spawned
    /// fetch takes.
    #[cfg(test)]
    pub(crate) fn complete(&self, generation: u64, result: FetchResult<Vec<RawFileEntry>>) {
        resolve(&Arc::downgrade(&self.inner), generation, result);
    }

    fn start_fetch(&self, flight: &mut Flight) {
        if let Some(previous) = flight.in_flight.take() {
            // superseded: its result can no longer be applied
            previous.cancel();
            self.inner.metrics.inc_stale_discarded();
        }
        flight.issued += 1;
        let generation = flight.issued;
        let token = self.inner.root.child_token();
        flight.in_flight = Some(token.clone());

        self.inner.state.send_modify(|s| {
            s.phase = LoadPhase::Loading;
            s.generation = generation;
        });
        self.inner.metrics.inc_fetches_started();

        let weak = Arc::downgrade(&self.inner);
        let fetcher = self.inner.fetcher.clone();
        let base_url = self.inner.layout.base_url().to_string();
        let timeout = self.inner.timeout;
        let span = info_span!("list_fetch", controller = %self.inner.id, generation);

        tokio::spawn(
            async move {
                debug!("fetch started");
                let result = tokio::select! {
                    _ = token.cancelled() => {
                        debug!("fetch cancelled");
                        return;
                    }
                    r = fetch_once(fetcher.as_ref(), &base_url, timeout) => r,
                };
                resolve(&weak, generation, result);
            }
            .instrument(span),
        );
    }
}

async fn fetch_once(
    fetcher: &dyn ListFetcher,
    base_url: &str,
    timeout: Option<Duration>,
) -> FetchResult<Vec<RawFileEntry>> {
    let fut = fetcher.fetch_file_list(base_url);
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fut).await.unwrap_or(Err(FetchError::Timeout(limit))),
        None => fut.await,
    }
}

fn resolve(weak: &Weak<Inner>, generation: u64, result: FetchResult<Vec<RawFileEntry>>) {
    let Some(inner) = weak.upgrade() else {
        debug!("controller dropped before fetch resolved");
        return;
    };

    let mut flight = inner.lock_flight();
    if flight.unmounted {
        debug!("fetch resolved after unmount, ignoring");
        return;
    }
    if generation != flight.issued {
        inner.metrics.inc_stale_discarded();
        debug!(latest = flight.issued, "discarding stale fetch result");
        return;
    }
    flight.in_flight = None;

    match result {
        Ok(raw) => {
            let files = inner.filter.apply(&raw);
            inner.metrics.inc_fetches_succeeded();
            inner.metrics.add_entries(raw.len() as u64, files.len() as u64);
            info!("Loaded {} of {} listed files", files.len(), raw.len());
            inner.state.send_modify(|s| {
                s.phase = LoadPhase::Loaded;
                s.files = files;
                s.updated_at = Some(chrono::Utc::now());
                s.last_error = None;
            });
        }
        Err(err) => {
            inner.metrics.inc_fetches_failed();
            inner.state.send_modify(|s| {
                s.phase = LoadPhase::LoadFailed;
                s.last_error = Some(err.to_string());
            });
            drop(flight);
            inner.reporter.report(&err);
        }
    }
}

impl Inner {
    fn lock_flight(&self) -> MutexGuard<'_, Flight> {
        self.flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
