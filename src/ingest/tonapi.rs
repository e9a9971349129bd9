//! Live indexer source backed by the tonapi HTTP API.

use std::time::Duration;

use async_trait::async_trait;

use super::source::NftSource;
use super::types::{NftItemsResponse, RawNftItem};
use super::FetchError;

/// Public tonapi instance.
pub const DEFAULT_BASE_URL: &str = "https://tonapi.io";

/// Upper bound on items requested in the single indexer call. The service
/// does not paginate the indexer itself.
const PAGE_LIMIT: u32 = 1000;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// `NftSource` implementation issuing one request per call against a tonapi
/// compatible indexer.
///
/// No retries and no caching: a failed call surfaces as a [`FetchError`] and
/// the caller decides whether to offer a retry.
pub struct TonApiSource {
    client: reqwest::Client,
    base_url: String,
}

impl TonApiSource {
    /// Source against the public tonapi instance.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Source against a custom indexer base URL (self-hosted gateway, test
    /// server).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Account NFTs endpoint with indirect ownership, so items currently
    /// escrowed in sale contracts still show up for their seller.
    fn account_nfts_url(&self, wallet: &str) -> String {
        format!(
            "{}/v2/accounts/{}/nfts?limit={}&offset=0&indirect_ownership=true",
            self.base_url, wallet, PAGE_LIMIT
        )
    }
}

#[async_trait]
impl NftSource for TonApiSource {
    async fn account_nfts(&self, wallet: &str) -> Result<Vec<RawNftItem>, FetchError> {
        let url = self.account_nfts_url(wallet);
        tracing::debug!(target: "ton_showcase::ingest", url = %url, "requesting account NFTs");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body: NftItemsResponse = response.json().await?;
        Ok(body.nft_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_nfts_url() {
        let source = TonApiSource::new().unwrap();
        assert_eq!(
            source.account_nfts_url("UQDjtFLfMaSfNTl_fRUixboWWooMqclQdTmpgBkqULfPjq50"),
            "https://tonapi.io/v2/accounts/UQDjtFLfMaSfNTl_fRUixboWWooMqclQdTmpgBkqULfPjq50/nfts?limit=1000&offset=0&indirect_ownership=true"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let source = TonApiSource::with_base_url("http://localhost:8080/").unwrap();
        assert!(source
            .account_nfts_url("w")
            .starts_with("http://localhost:8080/v2/accounts/w/nfts"));
    }
}
