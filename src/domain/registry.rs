//! Registry of live stream subscribers with fan-out frame delivery.
//!
//! [`ConnectionRegistry`] tracks every observer of the robot stream.
//! Each subscriber is represented by a bounded [`mpsc`] sender; the
//! WebSocket task on the other end forwards queued frames to the peer.
//! Delivery is best-effort: a failed send drops the subscriber from
//! the active set.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};

use super::SubscriberId;
use super::assets::{Artifact, AssetStore};

/// Central store of active stream subscribers.
///
/// # Concurrency
///
/// - `register`/`unregister` and broadcast-triggered removals all
///   mutate the map under a write lock.
/// - `broadcast` snapshots the senders under a read lock and iterates
///   the snapshot, so concurrent removal never invalidates the
///   traversal.
#[derive(Debug)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<SubscriberId, mpsc::Sender<Vec<u8>>>>,
    assets: Arc<AssetStore>,
    frame_buffer: usize,
}

impl ConnectionRegistry {
    /// Creates an empty registry with the given per-subscriber frame
    /// buffer capacity.
    #[must_use]
    pub fn new(assets: Arc<AssetStore>, frame_buffer: usize) -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            assets,
            frame_buffer: frame_buffer.max(1),
        }
    }

    /// Registers a new subscriber and returns its id plus the frame
    /// receiver to drain.
    ///
    /// Catch-up semantics for late joiners: if the status artifact
    /// exists, it is queued for this one subscriber immediately, so a
    /// client connecting mid-session sees the last known frame without
    /// waiting for the next broadcast.
    pub async fn register(&self) -> (SubscriberId, mpsc::Receiver<Vec<u8>>) {
        let id = SubscriberId::new();
        let (tx, rx) = mpsc::channel(self.frame_buffer);

        if let Some(frame) = self.assets.load(Artifact::Status).await
            && tx.try_send(frame).is_err()
        {
            tracing::warn!(subscriber = %id, "catch-up frame could not be queued");
        }

        self.connections.write().await.insert(id, tx);
        tracing::info!(subscriber = %id, "stream subscriber registered");
        (id, rx)
    }

    /// Removes a subscriber from the active set. Idempotent: removing
    /// an unknown id is a no-op.
    pub async fn unregister(&self, id: SubscriberId) {
        if self.connections.write().await.remove(&id).is_some() {
            tracing::info!(subscriber = %id, "stream subscriber unregistered");
        }
    }

    /// Delivers `payload` to every currently registered subscriber.
    ///
    /// Best-effort and independent per subscriber: a failed delivery
    /// (closed or full channel) does not affect the others and removes
    /// the failing subscriber from the active set. No ordering across
    /// subscribers, no acknowledgment, no retry. Returns the number of
    /// successful deliveries.
    pub async fn broadcast(&self, payload: &[u8]) -> usize {
        let snapshot: Vec<(SubscriberId, mpsc::Sender<Vec<u8>>)> = {
            let map = self.connections.read().await;
            map.iter().map(|(id, tx)| (*id, tx.clone())).collect()
        };

        let mut delivered = 0usize;
        let mut failed = Vec::new();
        for (id, tx) in snapshot {
            match tx.try_send(payload.to_vec()) {
                Ok(()) => delivered += 1,
                Err(err) => {
                    tracing::warn!(subscriber = %id, error = %err, "frame delivery failed, dropping subscriber");
                    failed.push(id);
                }
            }
        }

        if !failed.is_empty() {
            let mut map = self.connections.write().await;
            for id in failed {
                map.remove(&id);
            }
        }

        delivered
    }

    /// Returns the number of active subscribers.
    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Returns `true` if no subscribers are registered.
    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn empty_assets() -> (Arc<AssetStore>, tempfile::TempDir) {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        (Arc::new(AssetStore::new(dir.path())), dir)
    }

    fn assets_with_status(frame: &[u8]) -> (Arc<AssetStore>, tempfile::TempDir) {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let path = dir.path().join("robot_screenshot.png");
        if std::fs::write(&path, frame).is_err() {
            panic!("fixture write failed");
        }
        (Arc::new(AssetStore::new(dir.path())), dir)
    }

    #[tokio::test]
    async fn register_without_artifact_queues_nothing() {
        let (assets, _dir) = empty_assets();
        let registry = ConnectionRegistry::new(assets, 8);
        let (_id, mut rx) = registry.register().await;
        assert!(rx.try_recv().is_err());
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn late_joiner_receives_status_exactly_once() {
        let (assets, _dir) = assets_with_status(b"last-frame");
        let registry = ConnectionRegistry::new(assets, 8);
        let (_id, mut rx) = registry.register().await;

        let first = rx.try_recv();
        assert_eq!(first.ok(), Some(b"last-frame".to_vec()));
        // Once and only once.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn broadcast_reaches_every_subscriber() {
        let (assets, _dir) = empty_assets();
        let registry = ConnectionRegistry::new(assets, 8);
        let (_a, mut rx_a) = registry.register().await;
        let (_b, mut rx_b) = registry.register().await;

        let delivered = registry.broadcast(b"frame").await;
        assert_eq!(delivered, 2);
        assert_eq!(rx_a.try_recv().ok(), Some(b"frame".to_vec()));
        assert_eq!(rx_b.try_recv().ok(), Some(b"frame".to_vec()));
    }

    #[tokio::test]
    async fn failed_delivery_removes_subscriber() {
        let (assets, _dir) = empty_assets();
        let registry = ConnectionRegistry::new(assets, 8);
        let (_alive, mut rx_alive) = registry.register().await;
        let (_dead, rx_dead) = registry.register().await;
        drop(rx_dead);

        let delivered = registry.broadcast(b"frame").await;
        assert_eq!(delivered, 1);
        assert_eq!(registry.len().await, 1);
        assert_eq!(rx_alive.try_recv().ok(), Some(b"frame".to_vec()));

        // The dropped subscriber is never attempted again.
        let delivered = registry.broadcast(b"frame-2").await;
        assert_eq!(delivered, 1);
    }

    #[tokio::test]
    async fn unregister_is_idempotent() {
        let (assets, _dir) = empty_assets();
        let registry = ConnectionRegistry::new(assets, 8);
        let (id, _rx) = registry.register().await;

        registry.unregister(id).await;
        assert!(registry.is_empty().await);
        // Second removal is a no-op.
        registry.unregister(id).await;
        assert!(registry.is_empty().await);
    }
}
