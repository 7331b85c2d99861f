// ABOUTME: Document store abstraction for per-user append-only collections with live snapshots
// ABOUTME: Ordered subscriptions fall back to client-side sorting when the backend lacks an index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory document store
pub mod memory;

pub use memory::InMemoryDocumentStore;

use async_trait::async_trait;
use fittrack_core::constants::store::USERS_COLLECTION;
use fittrack_core::errors::{AppResult, ErrorCode};
use futures_util::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::warn;

/// Slash-separated location of a collection, e.g. `users/{uid}/workouts`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionPath {
    segments: Vec<String>,
}

impl CollectionPath {
    /// Build a path from its segments
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// A collection nested under a user document
    #[must_use]
    pub fn user_collection(uid: &str, collection: &str) -> Self {
        Self::new([USERS_COLLECTION, uid, collection])
    }

    /// Path segments in order
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Identifier assigned by the store on append
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Store-assigned identifier
    pub id: DocumentId,
    /// Document body
    pub data: Value,
}

impl Document {
    /// Numeric value of a top-level field, `0.0` when absent or non-numeric
    #[must_use]
    pub fn numeric_field(&self, field: &str) -> f64 {
        self.data.get(field).and_then(Value::as_f64).unwrap_or(0.0)
    }
}

/// Server-side ordering of a subscription (always descending)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// Numeric field to sort by
    pub field: String,
}

impl OrderBy {
    /// Descending order on `field`
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Sort documents in place, largest value first; ties keep store order
    pub fn apply(&self, documents: &mut [Document]) {
        documents.sort_by(|a, b| {
            b.numeric_field(&self.field)
                .partial_cmp(&a.numeric_field(&self.field))
                .unwrap_or(Ordering::Equal)
        });
    }
}

/// Full contents of a collection at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Documents in delivery order
    pub documents: Vec<Document>,
}

/// Live view of a collection
///
/// Yields an initial snapshot followed by one snapshot per change. Dropping
/// the subscription unsubscribes.
#[derive(Debug)]
pub struct CollectionSubscription {
    rx: mpsc::UnboundedReceiver<Snapshot>,
    client_order: Option<OrderBy>,
}

impl CollectionSubscription {
    /// Wrap a snapshot channel
    #[must_use]
    pub const fn new(rx: mpsc::UnboundedReceiver<Snapshot>) -> Self {
        Self {
            rx,
            client_order: None,
        }
    }

    /// Sort every delivered snapshot locally
    #[must_use]
    pub fn sorted_locally(mut self, order: OrderBy) -> Self {
        self.client_order = Some(order);
        self
    }

    /// Whether snapshots are sorted client-side
    #[must_use]
    pub const fn is_client_sorted(&self) -> bool {
        self.client_order.is_some()
    }

    /// Wait for the next snapshot; `None` once the store closes the subscription
    pub async fn next(&mut self) -> Option<Snapshot> {
        let mut snapshot = self.rx.recv().await?;
        if let Some(order) = &self.client_order {
            order.apply(&mut snapshot.documents);
        }
        Some(snapshot)
    }

    /// Consume the subscription as a stream of snapshots
    pub fn into_stream(self) -> impl Stream<Item = Snapshot> {
        let order = self.client_order;
        UnboundedReceiverStream::new(self.rx).map(move |mut snapshot| {
            if let Some(order) = &order {
                order.apply(&mut snapshot.documents);
            }
            snapshot
        })
    }
}

/// Append-only document store with live collection subscriptions
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append a document to a collection
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` when the write is rejected or fails
    async fn append_document(&self, path: &CollectionPath, payload: Value)
        -> AppResult<DocumentId>;

    /// Subscribe to a collection, optionally ordered by a numeric field
    ///
    /// # Errors
    ///
    /// Returns `IndexMissing` when ordering is requested but the backend has
    /// no index for it, or a `StorageError` when the listener cannot attach
    async fn subscribe(
        &self,
        path: &CollectionPath,
        order: Option<OrderBy>,
    ) -> AppResult<CollectionSubscription>;
}

/// Subscribe ordered by `field` descending, sorting locally if the backend cannot
///
/// # Errors
///
/// Returns any subscription error other than a missing index
pub async fn subscribe_with_fallback(
    store: &dyn DocumentStore,
    path: &CollectionPath,
    field: &str,
) -> AppResult<CollectionSubscription> {
    let order = OrderBy::descending(field);
    match store.subscribe(path, Some(order.clone())).await {
        Err(error) if error.code == ErrorCode::IndexMissing => {
            warn!(
                collection = %path,
                field,
                "Ordered subscription unavailable, falling back to client-side sort"
            );
            Ok(store.subscribe(path, None).await?.sorted_locally(order))
        }
        other => other,
    }
}
