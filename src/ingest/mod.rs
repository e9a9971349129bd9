//! NFT acquisition pipeline.
//!
//! Fetches a wallet's NFT items from an indexer, keeps the ones genuinely on
//! sale, and normalizes them into display entries. One indexer call per
//! invocation, no caching, no retries.

pub mod source;
pub mod tonapi;
pub mod transform;
pub mod types;

use thiserror::Error;

pub use source::{NftSource, SampleSource};
pub use tonapi::TonApiSource;
pub use transform::{display_items, to_display_item, GETGEMS_COLLECTION_ADDRESS, PLACEHOLDER_IMAGE};
pub use types::{
    Marketplace, NftDisplayItem, NftItemsResponse, NftMetadata, NftPreview, NftSale, RawNftItem,
    SaleMarket, SalePrice,
};

/// Failure talking to the indexer. Zero items on sale is not an error; that
/// case is an empty `Ok` list.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The indexer answered with a non-success HTTP status.
    #[error("indexer returned HTTP status {status}")]
    Status { status: u16 },

    /// Connection, timeout, or response decoding failure.
    #[error("indexer request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Fetch the wallet's on-sale listing: one indexer call, then filter and
/// normalize.
///
/// An empty wallet address yields an empty listing without touching the
/// network.
pub async fn fetch_on_sale<S>(source: &S, wallet: &str) -> Result<Vec<NftDisplayItem>, FetchError>
where
    S: NftSource + ?Sized,
{
    if wallet.is_empty() {
        return Ok(Vec::new());
    }

    let raw_items = source.account_nfts(wallet).await?;
    let items = display_items(&raw_items);
    tracing::debug!(
        target: "ton_showcase::ingest",
        wallet = %wallet,
        total = raw_items.len(),
        on_sale = items.len(),
        "filtered account NFTs"
    );
    Ok(items)
}
