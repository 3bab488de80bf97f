//! Unit and integration tests for the DocBrowse client library.
//!
//! ## Test Modules
//!
//! - **filter_tests**: Extension parsing and allow-set filtering
//! - **layout_tests**: Listing, document and thumbnail locators
//! - **fetcher_tests**: HTTP list fetcher against an in-process server
//! - **controller_tests**: State machine, fetch ordering, selection and unmount
//! - **config_tests**: Configuration parsing and validation
//! - **error_tests**: Error classification and display
//!
//! Individual test modules can be run with:
//! ```bash
//! cargo test controller_tests
//! ```

pub mod filter_tests;
pub mod support;
