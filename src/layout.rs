//! Locator derivation against the file server's URL layout.
//!
//! The server serves the listing at `<base>/getFiles`, each document at
//! `<base>/<name>` and a pre-rendered preview next to it. None of these
//! locators is validated by the client.

use std::fmt;
use std::sync::Arc;

use crate::types::FilteredFileEntry;

pub const LISTING_PATH: &str = "/getFiles";

/// Strategy mapping an entry to its thumbnail locator.
pub trait ThumbnailNaming: Send + Sync {
    fn thumbnail_url(&self, base_url: &str, entry: &FilteredFileEntry) -> String;
}

impl<F> ThumbnailNaming for F
where
    F: Fn(&str, &FilteredFileEntry) -> String + Send + Sync,
{
    fn thumbnail_url(&self, base_url: &str, entry: &FilteredFileEntry) -> String {
        self(base_url, entry)
    }
}

/// Preview image stored beside the document under the same base name.
#[derive(Debug, Clone)]
pub struct SiblingImage {
    pub extension: String,
}

impl Default for SiblingImage {
    fn default() -> Self {
        Self { extension: "png".to_string() }
    }
}

impl ThumbnailNaming for SiblingImage {
    fn thumbnail_url(&self, base_url: &str, entry: &FilteredFileEntry) -> String {
        format!("{}/{}.{}", base_url, entry.base, self.extension)
    }
}

#[derive(Clone)]
pub struct ServerLayout {
    base_url: String,
    thumbnails: Arc<dyn ThumbnailNaming>,
}

impl ServerLayout {
    pub fn new(base_url: &str) -> Self {
        Self::with_thumbnails(base_url, SiblingImage::default())
    }

    pub fn with_thumbnails(base_url: &str, naming: impl ThumbnailNaming + 'static) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            thumbnails: Arc::new(naming),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn listing_url(&self) -> String {
        format!("{}{}", self.base_url, LISTING_PATH)
    }

    pub fn document_url(&self, entry: &FilteredFileEntry) -> String {
        format!("{}/{}.{}", self.base_url, entry.base, entry.extension)
    }

    pub fn thumbnail_url(&self, entry: &FilteredFileEntry) -> String {
        self.thumbnails.thumbnail_url(&self.base_url, entry)
    }
}

impl fmt::Debug for ServerLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerLayout").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}
