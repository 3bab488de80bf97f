//! Test doubles shared by the test modules.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::collaborators::{ErrorReporter, Navigator};
use crate::error::{FetchError, FetchResult};
use crate::fetcher::ListFetcher;
use crate::types::{NavigationRequest, RawFileEntry};

/// One scripted response, optionally held back until the gate fires.
pub struct Step {
    pub gate: Option<oneshot::Receiver<()>>,
    pub result: FetchResult<Vec<RawFileEntry>>,
}

impl Step {
    pub fn ok(names: &[&str]) -> Self {
        Self { gate: None, result: Ok(names.iter().map(|n| n.to_string()).collect()) }
    }

    pub fn err(message: &str) -> Self {
        Self { gate: None, result: Err(FetchError::Other(message.to_string())) }
    }

    /// Returns the step plus the sender that releases it.
    pub fn gated(self) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        (Self { gate: Some(rx), ..self }, tx)
    }

    /// A step that never resolves.
    pub fn hang() -> (Self, oneshot::Sender<()>) {
        Step::ok(&[]).gated()
    }
}

#[derive(Default)]
pub struct ScriptedFetcher {
    steps: Mutex<VecDeque<Step>>,
    pub calls: AtomicUsize,
    pub base_urls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps: Mutex::new(steps.into()), ..Default::default() }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListFetcher for ScriptedFetcher {
    async fn fetch_file_list(&self, base_url: &str) -> FetchResult<Vec<RawFileEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.base_urls.lock().unwrap().push(base_url.to_string());
        let step = self.steps.lock().unwrap().pop_front().expect("fetcher called more often than scripted");
        if let Some(gate) = step.gate {
            if gate.await.is_err() {
                // Sender dropped: behave like a request that never completes
                std::future::pending::<()>().await;
            }
        }
        step.result
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub requests: Mutex<Vec<NavigationRequest>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, request: NavigationRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    pub reports: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, error: &FetchError) {
        self.reports.lock().unwrap().push(error.to_string());
    }
}

/// Serves `router` on an ephemeral local port and returns its root URL.
pub async fn spawn_server(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
