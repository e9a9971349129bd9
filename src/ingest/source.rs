//! Source trait for fetching a wallet's NFT items.
//!
//! The pipeline only ever needs one call: the full item list for a wallet.
//! Keeping that behind a trait lets tests and demos swap the live indexer
//! for predefined data.

use async_trait::async_trait;

use super::types::RawNftItem;
use super::FetchError;

/// Fetches the raw NFT item list for a wallet.
#[async_trait]
pub trait NftSource: Send + Sync {
    /// Return every NFT item the indexer reports for `wallet`, including
    /// items escrowed in marketplace sale contracts.
    async fn account_nfts(&self, wallet: &str) -> Result<Vec<RawNftItem>, FetchError>;
}

/// Source that serves a predefined item list.
///
/// Designed for demos and tests: it answers every wallet with the same
/// items, exactly as the live indexer would have returned them.
pub struct SampleSource {
    items: Vec<RawNftItem>,
}

impl SampleSource {
    pub fn new(items: Vec<RawNftItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl NftSource for SampleSource {
    async fn account_nfts(&self, _wallet: &str) -> Result<Vec<RawNftItem>, FetchError> {
        Ok(self.items.clone())
    }
}
