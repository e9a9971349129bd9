//! Observable fetch task over the ingestion pipeline.
//!
//! The rendering layer watches a single `FetchState` value per feed. Each
//! wallet change cancels the in-flight fetch before starting the next one,
//! so a slow, superseded response can never overwrite a newer result.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::ingest::{self, NftDisplayItem, NftSource};

/// Lifecycle of the current listing fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    /// A fetch is in flight (also the initial state).
    Pending,
    /// Listing fetched and filtered. An empty list means nothing is on
    /// sale, which is not a failure.
    Ready(Vec<NftDisplayItem>),
    /// The indexer call failed. The reason is display-ready; retrying is
    /// the caller's call.
    Failed(String),
}

struct InFlight {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// On-sale listing feed for a wallet, with cancellable refresh.
///
/// Each `set_wallet` fully replaces the previous result; there is no merging
/// of partial updates.
pub struct ShowcaseFeed {
    source: Arc<dyn NftSource>,
    state: watch::Sender<FetchState>,
    in_flight: Mutex<Option<InFlight>>,
}

impl ShowcaseFeed {
    pub fn new(source: Arc<dyn NftSource>) -> Self {
        let (state, _) = watch::channel(FetchState::Pending);
        Self {
            source,
            state,
            in_flight: Mutex::new(None),
        }
    }

    /// Watch the feed state. The receiver sees `Pending` until the first
    /// fetch settles.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    /// Point the feed at a wallet and refresh.
    ///
    /// Cancels any in-flight fetch first; its result, if it ever arrives,
    /// is dropped.
    pub async fn set_wallet(&self, wallet: &str) {
        let mut in_flight = self.in_flight.lock().await;

        if let Some(previous) = in_flight.take() {
            previous.token.cancel();
            tracing::debug!(
                target: "ton_showcase::feed",
                "cancelled previous fetch (superseded)"
            );
        }

        self.state.send_replace(FetchState::Pending);

        let token = CancellationToken::new();
        let task_token = token.clone();
        let source = Arc::clone(&self.source);
        let state = self.state.clone();
        let wallet = wallet.to_string();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = task_token.cancelled() => {
                    tracing::debug!(
                        target: "ton_showcase::feed",
                        wallet = %wallet,
                        "fetch superseded before completion"
                    );
                }
                result = ingest::fetch_on_sale(source.as_ref(), &wallet) => {
                    if task_token.is_cancelled() {
                        return;
                    }
                    match result {
                        Ok(items) => {
                            tracing::debug!(
                                target: "ton_showcase::feed",
                                wallet = %wallet,
                                on_sale = items.len(),
                                "listing refreshed"
                            );
                            state.send_replace(FetchState::Ready(items));
                        }
                        Err(err) => {
                            tracing::warn!(
                                target: "ton_showcase::feed",
                                wallet = %wallet,
                                error = %err,
                                "listing fetch failed"
                            );
                            state.send_replace(FetchState::Failed(err.to_string()));
                        }
                    }
                }
            }
        });

        *in_flight = Some(InFlight { token, handle });
    }

    /// Cancel the in-flight fetch, if any, and wait for its task to finish.
    pub async fn shutdown(&self) {
        let in_flight = self.in_flight.lock().await.take();
        if let Some(previous) = in_flight {
            previous.token.cancel();
            let _ = previous.handle.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::ingest::types::{NftMetadata, NftSale, RawNftItem, SalePrice};
    use crate::ingest::FetchError;

    /// Answers each wallet with one listed item named after the wallet;
    /// wallets named "slow" take five seconds.
    struct WalletEchoSource;

    #[async_trait]
    impl NftSource for WalletEchoSource {
        async fn account_nfts(&self, wallet: &str) -> Result<Vec<RawNftItem>, FetchError> {
            if wallet == "slow" {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            Ok(vec![RawNftItem {
                address: "0:80d78a35f955a14b679faa887ff4cd5bfc0f43b4a4eea2a7e6927f3701b273c2"
                    .to_string(),
                metadata: NftMetadata {
                    name: Some(format!("{wallet}.t.me")),
                    description: None,
                    image: None,
                },
                previews: Vec::new(),
                sale: Some(NftSale {
                    market: None,
                    price: Some(SalePrice {
                        token_name: Some("TON".to_string()),
                        value: Some("1000000000".to_string()),
                    }),
                }),
            }])
        }
    }

    struct FailingSource;

    #[async_trait]
    impl NftSource for FailingSource {
        async fn account_nfts(&self, _wallet: &str) -> Result<Vec<RawNftItem>, FetchError> {
            Err(FetchError::Status { status: 500 })
        }
    }

    async fn settled(rx: &mut watch::Receiver<FetchState>) -> FetchState {
        loop {
            {
                let state = rx.borrow_and_update();
                if !matches!(*state, FetchState::Pending) {
                    return state.clone();
                }
            }
            rx.changed().await.expect("feed dropped");
        }
    }

    #[tokio::test]
    async fn test_fetch_reaches_ready() {
        let feed = ShowcaseFeed::new(Arc::new(WalletEchoSource));
        let mut rx = feed.subscribe();
        assert_eq!(*rx.borrow(), FetchState::Pending);

        feed.set_wallet("alice").await;
        match settled(&mut rx).await {
            FetchState::Ready(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].username, "@alice");
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failure_reaches_failed() {
        let feed = ShowcaseFeed::new(Arc::new(FailingSource));
        let mut rx = feed.subscribe();

        feed.set_wallet("any").await;
        match settled(&mut rx).await {
            FetchState::Failed(reason) => assert!(reason.contains("500"), "reason: {reason}"),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_fetch_never_overwrites() {
        let feed = ShowcaseFeed::new(Arc::new(WalletEchoSource));
        let mut rx = feed.subscribe();

        feed.set_wallet("slow").await;
        feed.set_wallet("fast").await;

        match settled(&mut rx).await {
            FetchState::Ready(items) => assert_eq!(items[0].username, "@fast"),
            other => panic!("unexpected state: {other:?}"),
        }

        // Give the cancelled fetch every chance to finish its sleep; the
        // newer result must survive it.
        tokio::time::sleep(Duration::from_secs(10)).await;
        match &*rx.borrow() {
            FetchState::Ready(items) => assert_eq!(items[0].username, "@fast"),
            other => panic!("unexpected state: {other:?}"),
        };
    }

    #[tokio::test]
    async fn test_shutdown_cancels_in_flight() {
        let feed = ShowcaseFeed::new(Arc::new(WalletEchoSource));
        let mut rx = feed.subscribe();

        feed.set_wallet("fast").await;
        feed.shutdown().await;

        // After shutdown the state is whatever the task managed to publish;
        // shutdown itself must not hang or panic.
        let state = rx.borrow_and_update().clone();
        assert!(matches!(
            state,
            FetchState::Pending | FetchState::Ready(_)
        ));
    }
}
