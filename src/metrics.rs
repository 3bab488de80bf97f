use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Counters for one controller instance
#[derive(Clone)]
pub struct Metrics {
    pub fetches_started: Arc<AtomicUsize>,
    pub fetches_succeeded: Arc<AtomicUsize>,
    pub fetches_failed: Arc<AtomicUsize>,
    /// Fetches superseded by a newer one, whether cancelled in flight or
    /// resolved too late.
    pub stale_discarded: Arc<AtomicUsize>,
    pub selections: Arc<AtomicUsize>,
    pub entries_received: Arc<AtomicU64>,
    pub entries_kept: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            fetches_started: Arc::new(AtomicUsize::new(0)),
            fetches_succeeded: Arc::new(AtomicUsize::new(0)),
            fetches_failed: Arc::new(AtomicUsize::new(0)),
            stale_discarded: Arc::new(AtomicUsize::new(0)),
            selections: Arc::new(AtomicUsize::new(0)),
            entries_received: Arc::new(AtomicU64::new(0)),
            entries_kept: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_fetches_started(&self) {
        self.fetches_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_fetches_succeeded(&self) {
        self.fetches_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_fetches_failed(&self) {
        self.fetches_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_stale_discarded(&self) {
        self.stale_discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_selections(&self) {
        self.selections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_entries(&self, received: u64, kept: u64) {
        self.entries_received.fetch_add(received, Ordering::Relaxed);
        self.entries_kept.fetch_add(kept, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            fetches_started: self.fetches_started.load(Ordering::Relaxed),
            fetches_succeeded: self.fetches_succeeded.load(Ordering::Relaxed),
            fetches_failed: self.fetches_failed.load(Ordering::Relaxed),
            stale_discarded: self.stale_discarded.load(Ordering::Relaxed),
            selections: self.selections.load(Ordering::Relaxed),
            entries_received: self.entries_received.load(Ordering::Relaxed),
            entries_kept: self.entries_kept.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub fetches_started: usize,
    pub fetches_succeeded: usize,
    pub fetches_failed: usize,
    pub stale_discarded: usize,
    pub selections: usize,
    pub entries_received: u64,
    pub entries_kept: u64,
    pub uptime_seconds: u64,
}

impl MetricsSnapshot {
    /// Prometheus-compatible text exposition format
    pub fn to_prometheus(&self) -> String {
        format!(
            "# HELP docbrowse_fetches_started Total list fetches started\n# TYPE docbrowse_fetches_started counter\ndocbrowse_fetches_started {}\n\
# HELP docbrowse_fetches_succeeded List fetches applied\n# TYPE docbrowse_fetches_succeeded counter\ndocbrowse_fetches_succeeded {}\n\
# HELP docbrowse_fetches_failed List fetches failed\n# TYPE docbrowse_fetches_failed counter\ndocbrowse_fetches_failed {}\n\
# HELP docbrowse_stale_discarded Superseded fetch results discarded\n# TYPE docbrowse_stale_discarded counter\ndocbrowse_stale_discarded {}\n\
# HELP docbrowse_selections Documents selected\n# TYPE docbrowse_selections counter\ndocbrowse_selections {}\n\
# HELP docbrowse_entries_received Raw listing entries received\n# TYPE docbrowse_entries_received counter\ndocbrowse_entries_received {}\n\
# HELP docbrowse_entries_kept Listing entries kept by the filter\n# TYPE docbrowse_entries_kept counter\ndocbrowse_entries_kept {}\n\
# HELP docbrowse_uptime_seconds Uptime seconds\n# TYPE docbrowse_uptime_seconds gauge\ndocbrowse_uptime_seconds {}\n",
            self.fetches_started,
            self.fetches_succeeded,
            self.fetches_failed,
            self.stale_discarded,
            self.selections,
            self.entries_received,
            self.entries_kept,
            self.uptime_seconds,
        )
    }
}
