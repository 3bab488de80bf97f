//! Seams to the screen's external collaborators.

use tracing::{error, info};

use crate::error::FetchError;
use crate::types::NavigationRequest;

/// Named-route push target (the stack navigator hosting the viewer).
pub trait Navigator: Send + Sync {
    fn navigate(&self, request: NavigationRequest);
}

/// Sink for failures the controller swallows.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &FetchError);
}

/// Reports through `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, err: &FetchError) {
        error!(network = err.is_network(), "File list fetch failed: {}", err);
    }
}

/// Navigator that only logs the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, request: NavigationRequest) {
        info!(route = %request.route, document_url = %request.document_url, "navigate");
    }
}
