//! Wire model for the indexer response and the normalized display model.
//!
//! The wire side mirrors the indexer's JSON shape. Every field the indexer
//! may omit is an `Option` (or defaults), so one sparse item cannot fail the
//! whole response. Unknown fields are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Response body of the account NFTs endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftItemsResponse {
    #[serde(default)]
    pub nft_items: Vec<RawNftItem>,
}

/// One NFT item as reported by the indexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNftItem {
    /// Raw on-chain address (`workchain:hex64`).
    pub address: String,
    #[serde(default)]
    pub metadata: NftMetadata,
    /// Resized preview images, tagged by resolution (e.g. `"500x500"`).
    #[serde(default)]
    pub previews: Vec<NftPreview>,
    /// Present only when the item sits in a marketplace sale contract.
    #[serde(default)]
    pub sale: Option<NftSale>,
}

/// Item metadata (TEP-64 off-chain content, as resolved by the indexer).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NftMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A preview image entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftPreview {
    pub resolution: String,
    pub url: String,
}

/// Active sale listing attached to an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NftSale {
    #[serde(default)]
    pub market: Option<SaleMarket>,
    #[serde(default)]
    pub price: Option<SalePrice>,
}

/// Marketplace the sale contract belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaleMarket {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Asking price of a sale, in the chain's smallest unit (nanoton).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalePrice {
    #[serde(default)]
    pub token_name: Option<String>,
    /// Decimal string of an integer nanoton amount.
    #[serde(default)]
    pub value: Option<String>,
}

/// Marketplace a listing belongs to, resolved once at ingestion time.
///
/// Link construction matches on this variant instead of re-inspecting the
/// free-text market name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marketplace {
    Getgems,
    Fragment,
    /// Recognized sale with an unfamiliar market name (kept for display).
    Other(String),
}

impl Marketplace {
    /// Resolve the indexer's free-text market name. Absent names default to
    /// Getgems, the marketplace the showcased collection lives on.
    pub fn resolve(name: Option<&str>) -> Self {
        let Some(name) = name else {
            return Marketplace::Getgems;
        };
        let lower = name.to_lowercase();
        if lower.contains("fragment") {
            Marketplace::Fragment
        } else if lower.contains("getgems") || lower.contains("get gems") {
            Marketplace::Getgems
        } else {
            Marketplace::Other(name.to_string())
        }
    }

    /// Human-facing marketplace label.
    pub fn label(&self) -> &str {
        match self {
            Marketplace::Getgems => "Getgems",
            Marketplace::Fragment => "Fragment",
            Marketplace::Other(name) => name,
        }
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized, display-ready listing entry.
///
/// Every `NftDisplayItem` corresponds to exactly one indexer item that had a
/// valid positive sale price at fetch time.
#[derive(Debug, Clone, PartialEq)]
pub struct NftDisplayItem {
    /// Raw on-chain address of the item.
    pub id: String,
    /// Raw metadata name as reported by the indexer.
    pub name: String,
    /// Normalized `@username` derived from the metadata name.
    pub username: String,
    /// Best available image URL (preview, metadata image, or placeholder).
    pub image: String,
    /// Human-formatted price, e.g. `"4.20 TON"`.
    pub price: String,
    /// Price in whole TON.
    pub price_ton: f64,
    /// Deep link to the sale page on the marketplace.
    pub sale_url: String,
    pub marketplace: Marketplace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_indexer_item() {
        let body = serde_json::json!({
            "nft_items": [
                {
                    "address": "0:80d78a35f955a14b679faa887ff4cd5bfc0f43b4a4eea2a7e6927f3701b273c2",
                    "index": 1,
                    "owner": { "address": "0:abc", "is_scam": false },
                    "verified": true,
                    "metadata": { "name": "alice.t.me", "image": "https://img.example/alice.png" },
                    "previews": [
                        { "resolution": "100x100", "url": "https://img.example/s.png" },
                        { "resolution": "500x500", "url": "https://img.example/m.png" }
                    ],
                    "sale": {
                        "address": "0:def",
                        "market": { "address": "0:123", "name": "Getgems Sales" },
                        "price": { "token_name": "TON", "value": "5000000000" }
                    }
                },
                {
                    "address": "0:006e2da856e83ec18720ee19d8a1cadc9051299b0e02383ea72698713c8d53ee",
                    "metadata": { "name": "bob.t.me" }
                }
            ]
        });

        let response: NftItemsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.nft_items.len(), 2);

        let listed = &response.nft_items[0];
        assert_eq!(listed.metadata.name.as_deref(), Some("alice.t.me"));
        assert_eq!(listed.previews.len(), 2);
        let sale = listed.sale.as_ref().unwrap();
        assert_eq!(
            sale.price.as_ref().unwrap().value.as_deref(),
            Some("5000000000")
        );
        assert_eq!(
            sale.market.as_ref().unwrap().name.as_deref(),
            Some("Getgems Sales")
        );

        // Sparse item: no previews, no sale.
        let unlisted = &response.nft_items[1];
        assert!(unlisted.previews.is_empty());
        assert!(unlisted.sale.is_none());
    }

    #[test]
    fn test_empty_response_defaults() {
        let response: NftItemsResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.nft_items.is_empty());
    }

    #[test]
    fn test_marketplace_resolution() {
        assert_eq!(Marketplace::resolve(None), Marketplace::Getgems);
        assert_eq!(Marketplace::resolve(Some("Getgems")), Marketplace::Getgems);
        assert_eq!(Marketplace::resolve(Some("Get Gems")), Marketplace::Getgems);
        assert_eq!(
            Marketplace::resolve(Some("Fragment")),
            Marketplace::Fragment
        );
        assert_eq!(
            Marketplace::resolve(Some("fragment.com")),
            Marketplace::Fragment
        );
        assert_eq!(
            Marketplace::resolve(Some("Disintar")),
            Marketplace::Other("Disintar".to_string())
        );
    }

    #[test]
    fn test_marketplace_labels() {
        assert_eq!(Marketplace::Getgems.label(), "Getgems");
        assert_eq!(Marketplace::Fragment.label(), "Fragment");
        assert_eq!(Marketplace::Other("Disintar".into()).label(), "Disintar");
        assert_eq!(Marketplace::Fragment.to_string(), "Fragment");
    }
}
