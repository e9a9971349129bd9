//! Fetch a wallet's on-sale listing from tonapi and print it page by page.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example showcase_feed
//! ```

use anyhow::Result;
use ton_showcase::{fetch_on_sale, Paginator, TonApiSource, DEFAULT_PAGE_SIZE};

/// Wallet whose listed username NFTs the showcase displays.
const WALLET_ADDRESS: &str = "UQDjtFLfMaSfNTl_fRUixboWWooMqclQdTmpgBkqULfPjq50";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .init();

    let source = TonApiSource::new()?;
    let items = fetch_on_sale(&source, WALLET_ADDRESS).await?;
    tracing::info!(wallet = WALLET_ADDRESS, on_sale = items.len(), "listing fetched");

    if items.is_empty() {
        println!("Nothing on sale right now.");
        return Ok(());
    }

    let mut pages = Paginator::new(items, DEFAULT_PAGE_SIZE);
    for page in 0..pages.total_pages() {
        pages.go_to(page);
        println!("--- page {}/{} ---", page + 1, pages.total_pages());
        for item in pages.page_items() {
            println!(
                "{:<24} {:>12}  {:<10} {}",
                item.username, item.price, item.marketplace, item.sale_url
            );
        }
    }

    Ok(())
}
