//! Pure transform stage: sale filter and display normalization.
//!
//! Works on already-fetched items, no I/O. An item survives only when its
//! sale carries a price that parses to a strictly positive TON amount;
//! everything else is not "on sale" as far as the listing is concerned.

use crate::address;

use super::types::{Marketplace, NftDisplayItem, RawNftItem};

/// Getgems collection the showcased username NFTs belong to. Sale pages are
/// addressed as collection + item.
pub const GETGEMS_COLLECTION_ADDRESS: &str = "EQCA14o1-VWhS2efqoh_9M1b_A9DtKTuoqfmkn83AbJzwnPi";

/// Inline gradient shown when an item has no preview and no metadata image.
pub const PLACEHOLDER_IMAGE: &str = r#"data:image/svg+xml,%3Csvg xmlns="http://www.w3.org/2000/svg" width="400" height="400"%3E%3Cdefs%3E%3ClinearGradient id="grad" x1="0%25" y1="0%25" x2="100%25" y2="100%25"%3E%3Cstop offset="0%25" style="stop-color:rgb(59,130,246);stop-opacity:1" /%3E%3Cstop offset="100%25" style="stop-color:rgb(139,92,246);stop-opacity:1" /%3E%3C/linearGradient%3E%3C/defs%3E%3Crect width="400" height="400" fill="url(%23grad)" /%3E%3C/svg%3E"#;

/// Preview resolutions preferred for display, best first.
const PREFERRED_RESOLUTIONS: [&str; 2] = ["1500x1500", "500x500"];

const NANOTON_PER_TON: f64 = 1e9;

/// Filter and normalize a raw item list into display entries, preserving
/// order.
pub fn display_items(items: &[RawNftItem]) -> Vec<NftDisplayItem> {
    items.iter().filter_map(to_display_item).collect()
}

/// Normalize one item, or `None` when it is not genuinely on sale.
pub fn to_display_item(item: &RawNftItem) -> Option<NftDisplayItem> {
    let price_ton = sale_price_ton(item)?;

    let name = item
        .metadata
        .name
        .clone()
        .unwrap_or_else(|| "Unknown".to_string());
    let market_name = item
        .sale
        .as_ref()
        .and_then(|sale| sale.market.as_ref())
        .and_then(|market| market.name.as_deref());
    let marketplace = Marketplace::resolve(market_name);

    Some(NftDisplayItem {
        id: item.address.clone(),
        username: normalize_username(&name),
        image: best_image(item),
        price: format_price(price_ton),
        price_ton,
        sale_url: sale_url(item, &marketplace, &name),
        marketplace,
        name,
    })
}

/// Price in whole TON when the item has a sale with a parseable, strictly
/// positive price. This is the single filter gate of the pipeline.
fn sale_price_ton(item: &RawNftItem) -> Option<f64> {
    let value = item.sale.as_ref()?.price.as_ref()?.value.as_deref()?;
    let nanoton: f64 = value.trim().parse().ok()?;
    let ton = nanoton / NANOTON_PER_TON;
    (ton > 0.0).then_some(ton)
}

/// Normalize any of `"foo.t.me"`, `"@foo"`, `"foo"` to `"@foo"`.
fn normalize_username(raw_name: &str) -> String {
    format!("@{}", bare_username(raw_name))
}

/// Username without the `.t.me` suffix or `@` prefix, as Fragment links
/// want it.
fn bare_username(raw_name: &str) -> String {
    let name = raw_name.strip_suffix(".t.me").unwrap_or(raw_name);
    let name = name.strip_prefix('@').unwrap_or(name);
    name.trim().to_string()
}

/// Best image for an item: a preferred-resolution preview, else the first
/// preview, else the metadata image, else the placeholder gradient.
fn best_image(item: &RawNftItem) -> String {
    if let Some(preview) = item
        .previews
        .iter()
        .find(|preview| PREFERRED_RESOLUTIONS.contains(&preview.resolution.as_str()))
    {
        return preview.url.clone();
    }
    if let Some(preview) = item.previews.first() {
        return preview.url.clone();
    }
    if let Some(image) = item.metadata.image.as_deref().filter(|url| !url.is_empty()) {
        return image.to_string();
    }
    PLACEHOLDER_IMAGE.to_string()
}

/// Format a TON amount for display: two decimals from 1 TON up, four below,
/// so sub-TON prices keep their significant digits.
fn format_price(price_ton: f64) -> String {
    if price_ton <= 0.0 {
        // Unreachable after filtering, kept so the formatter is total.
        return "Price not available".to_string();
    }
    if price_ton >= 1.0 {
        format!("{price_ton:.2} TON")
    } else {
        format!("{price_ton:.4} TON")
    }
}

/// Deep link to the sale page.
///
/// Fragment listings link by username. Everything else (Getgems and
/// unrecognized markets) links into the Getgems collection by user-friendly
/// item address, falling back to the bare item link when no address is
/// available.
fn sale_url(item: &RawNftItem, marketplace: &Marketplace, raw_name: &str) -> String {
    if *marketplace == Marketplace::Fragment {
        let username = bare_username(raw_name);
        if !username.is_empty() {
            return format!("https://fragment.com/username/{username}");
        }
    }

    let item_address = address::to_user_friendly(&item.address);
    if !item_address.is_empty() {
        return format!("https://getgems.io/collection/{GETGEMS_COLLECTION_ADDRESS}/{item_address}");
    }
    format!("https://getgems.io/nft/{item_address}")
}
