//! # DocBrowse Client Library
//!
//! Client side of a document browsing screen: fetches the file listing of a
//! document server, keeps the entries a viewer can open, derives thumbnail
//! and document locators, and turns a selection into a navigation request for
//! the viewer screen.
//!
//! ## Core Components
//!
//! - [`config`]: Layered configuration (embedded defaults, file, environment)
//! - [`error`]: Fetch error taxonomy
//! - [`filter`]: Extension parsing and the allow-set filter
//! - [`layout`]: Listing, document and thumbnail locators
//! - [`fetcher`]: The `ListFetcher` seam and its HTTP implementation
//! - [`controller`]: Screen state, fetch ordering and selection
//! - [`collaborators`]: Navigation and error-reporting seams
//! - [`metrics`]: Per-controller counters
//! - [`types`]: Shared data types

pub mod collaborators;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod layout;
pub mod metrics;
pub mod types;

pub use controller::FileListController;
pub use error::FetchError;
pub use fetcher::{HttpListFetcher, ListFetcher};
pub use filter::{base_name_of, extension_of, ExtensionFilter};
pub use layout::{ServerLayout, SiblingImage, ThumbnailNaming};

#[cfg(test)]
mod tests;
