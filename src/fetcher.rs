use async_trait::async_trait;
use tracing::debug;

use crate::error::{FetchError, FetchResult};
use crate::layout::LISTING_PATH;
use crate::types::RawFileEntry;

/// Retrieves the raw file name collection from the server.
///
/// Implementations perform exactly one attempt: no retries, no deadline. Both
/// belong to the caller.
#[async_trait]
pub trait ListFetcher: Send + Sync {
    async fn fetch_file_list(&self, base_url: &str) -> FetchResult<Vec<RawFileEntry>>;
}

/// `GET <base>/getFiles` over HTTP, expecting a JSON array of strings.
#[derive(Debug, Clone)]
pub struct HttpListFetcher {
    client: reqwest::Client,
}

impl HttpListFetcher {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn with_user_agent(user_agent: &str) -> FetchResult<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent.to_string()).build()?;
        Ok(Self { client })
    }
}

impl Default for HttpListFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListFetcher for HttpListFetcher {
    async fn fetch_file_list(&self, base_url: &str) -> FetchResult<Vec<RawFileEntry>> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), LISTING_PATH);
        debug!("GET {}", url);

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), url });
        }

        let body = resp.bytes().await?;
        let names: Vec<RawFileEntry> = serde_json::from_slice(&body)?;
        debug!("{} returned {} entries", url, names.len());
        Ok(names)
    }
}
