//! Lifecycle observers for content-share sessions
//!
//! Applications subscribe a [`ContentShareObserver`] to learn when the share
//! actually starts (the transport confirmed its connection) and when it stops,
//! normally or through a transport failure. Observers form a set: registering
//! the same observer twice keeps a single membership, and notification order
//! is unspecified.
//!
//! # Usage Examples
//!
//! ```rust
//! use vidshare_content_core::observer::{ContentShareObserver, ContentShareStatus};
//! use async_trait::async_trait;
//!
//! struct MyObserver;
//!
//! #[async_trait]
//! impl ContentShareObserver for MyObserver {
//!     async fn on_content_share_started(&self) {
//!         println!("share is live");
//!     }
//!
//!     async fn on_content_share_stopped(&self, status: ContentShareStatus) {
//!         println!("share stopped: {:?}", status);
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

/// Outcome delivered with a stop notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentShareStatus {
    /// The share ended normally
    Ok,
    /// The transport reported a connection failure
    VideoServiceFailed,
}

/// Observer of content-share lifecycle transitions
///
/// Callbacks are delivered on the controller's callback path, not on the
/// thread that registered the observer.
#[async_trait]
pub trait ContentShareObserver: Send + Sync {
    /// The transport confirmed the share stream is connected and sending
    async fn on_content_share_started(&self);

    /// The share stream stopped, normally or through a failure
    async fn on_content_share_stopped(&self, status: ContentShareStatus);
}

/// Thread-safe set of lifecycle observers
///
/// Membership is keyed by observer identity (the `Arc` allocation), so the
/// same observer handle registered twice occupies one slot and can be removed
/// with any clone of the handle. `add` and `remove` are safe to call from any
/// task at any time, including from inside a notification triggered
/// elsewhere. Notification iterates a snapshot of the membership taken at
/// call time: a member present for the whole iteration is delivered exactly
/// once; concurrent mutation is never observed mid-flight.
pub struct ObserverRegistry {
    observers: DashMap<usize, Arc<dyn ContentShareObserver>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self {
            observers: DashMap::new(),
        }
    }

    fn key(observer: &Arc<dyn ContentShareObserver>) -> usize {
        Arc::as_ptr(observer) as *const () as usize
    }

    /// Add an observer; re-adding an existing member is a no-op
    pub fn add(&self, observer: Arc<dyn ContentShareObserver>) {
        self.observers.insert(Self::key(&observer), observer);
    }

    /// Remove an observer; unknown members are ignored
    pub fn remove(&self, observer: &Arc<dyn ContentShareObserver>) {
        self.observers.remove(&Self::key(observer));
    }

    /// Number of currently registered observers
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Snapshot of the current membership
    fn snapshot(&self) -> Vec<Arc<dyn ContentShareObserver>> {
        self.observers
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Deliver a started notification to every current member
    pub async fn notify_started(&self) {
        let snapshot = self.snapshot();
        futures::future::join_all(
            snapshot
                .iter()
                .map(|observer| observer.on_content_share_started()),
        )
        .await;
    }

    /// Deliver a stopped notification to every current member
    pub async fn notify_stopped(&self, status: ContentShareStatus) {
        let snapshot = self.snapshot();
        futures::future::join_all(
            snapshot
                .iter()
                .map(|observer| observer.on_content_share_stopped(status)),
        )
        .await;
    }
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
