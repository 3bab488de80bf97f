use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file name exactly as returned by the listing endpoint.
pub type RawFileEntry = String;

/// Route name of the document viewing screen.
pub const VIEWER_ROUTE: &str = "Viewer";

/// Title shown above the file list.
pub const SCREEN_TITLE: &str = "Browse Files";

/// A listing entry that passed the extension filter.
///
/// `name` is the unmodified raw entry and doubles as the item identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilteredFileEntry {
    pub name: String,
    pub base: String,
    pub extension: String,
}

impl FilteredFileEntry {
    pub fn as_raw(&self) -> &str {
        &self.name
    }
}

/// One rendered row: label plus thumbnail locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileListItem {
    pub name: String,
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    LoadFailed,
    Unmounted,
}

impl LoadPhase {
    /// No fetch outstanding.
    pub fn is_settled(self) -> bool {
        !matches!(self, LoadPhase::Loading)
    }
}

/// Observable state of one controller instance.
///
/// `files` always reflects the most recently completed successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileListSnapshot {
    pub phase: LoadPhase,
    pub files: Vec<FilteredFileEntry>,
    /// Sequence number of the latest fetch issued by this instance (0 = none).
    pub generation: u64,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl Default for FileListSnapshot {
    fn default() -> Self {
        Self { phase: LoadPhase::Idle, files: Vec::new(), generation: 0, updated_at: None, last_error: None }
    }
}

/// A push request for the navigation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationRequest {
    pub route: String,
    pub document_url: String,
}

impl NavigationRequest {
    pub fn viewer(document_url: String) -> Self {
        Self { route: VIEWER_ROUTE.to_string(), document_url }
    }
}
