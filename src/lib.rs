//! On-sale NFT listing feed for TON wallets.
//!
//! Turns a wallet's on-chain NFT holdings into a display-ready, paginated
//! "on sale" listing. One indexer call per refresh, a pure filter/normalize
//! stage, and a windowed view for the rendering layer.
//!
//! # Components
//!
//! - [`address`]: raw to user-friendly checksummed TON address conversion
//! - [`ingest`]: indexer source trait and client, sale filter, display
//!   normalization
//! - [`feed`]: cancellable fetch task with observable
//!   `Pending | Ready | Failed` state
//! - [`page`]: fixed-size page windowing with wraparound navigation
//!
//! # Example
//!
//! ```rust,ignore
//! use ton_showcase::{fetch_on_sale, Paginator, TonApiSource, DEFAULT_PAGE_SIZE};
//!
//! let source = TonApiSource::new()?;
//! let items = fetch_on_sale(&source, "UQDjtFLfMaSfNTl_fRUixboWWooMqclQdTmpgBkqULfPjq50").await?;
//!
//! let mut pages = Paginator::new(items, DEFAULT_PAGE_SIZE);
//! for item in pages.page_items() {
//!     println!("{} {} on {}", item.username, item.price, item.marketplace);
//! }
//! ```

pub mod address;
pub mod feed;
pub mod ingest;
pub mod page;

pub use address::to_user_friendly;
pub use feed::{FetchState, ShowcaseFeed};
pub use ingest::{
    fetch_on_sale, FetchError, Marketplace, NftDisplayItem, NftSource, RawNftItem, SampleSource,
    TonApiSource,
};
pub use page::{Paginator, DEFAULT_PAGE_SIZE};
