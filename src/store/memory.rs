// ABOUTME: In-memory document store with live subscriptions for tests, replays and offline use
// ABOUTME: Supports injected write failures and a missing sort index to exercise error paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CollectionPath, CollectionSubscription, Document, DocumentId, DocumentStore, OrderBy, Snapshot};
use async_trait::async_trait;
use fittrack_core::errors::{AppError, AppResult, ErrorCode};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;
use uuid::Uuid;

struct Listener {
    order: Option<OrderBy>,
    tx: mpsc::UnboundedSender<Snapshot>,
}

#[derive(Default)]
struct StoreState {
    collections: HashMap<CollectionPath, Vec<Document>>,
    listeners: HashMap<CollectionPath, Vec<Listener>>,
    failing_writes: usize,
    reject_all_writes: bool,
    index_missing: bool,
}

impl StoreState {
    fn snapshot(&self, path: &CollectionPath, order: Option<&OrderBy>) -> Snapshot {
        let mut documents = self.collections.get(path).cloned().unwrap_or_default();
        if let Some(order) = order {
            order.apply(&mut documents);
        }
        Snapshot { documents }
    }

    fn notify(&mut self, path: &CollectionPath) {
        let Some(listeners) = self.listeners.get(path) else {
            return;
        };
        let snapshots: Vec<Snapshot> = listeners
            .iter()
            .map(|listener| self.snapshot(path, listener.order.as_ref()))
            .collect();
        if let Some(listeners) = self.listeners.get_mut(path) {
            let mut delivered = snapshots.into_iter();
            listeners.retain(|listener| {
                delivered
                    .next()
                    .is_some_and(|snapshot| listener.tx.send(snapshot).is_ok())
            });
        }
    }
}

/// Document store held entirely in memory
///
/// Clones share the same collections.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryDocumentStore {
    /// Empty store with ordering indexes available
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store that rejects ordered subscriptions with `IndexMissing`
    #[must_use]
    pub fn without_index() -> Self {
        let state = StoreState {
            index_missing: true,
            ..StoreState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Fail the next `count` appends
    pub async fn fail_next_writes(&self, count: usize) {
        self.state.write().await.failing_writes = count;
    }

    /// Reject every append until switched off
    pub async fn set_reject_writes(&self, reject: bool) {
        self.state.write().await.reject_all_writes = reject;
    }

    /// Documents of a collection in append order
    pub async fn documents(&self, path: &CollectionPath) -> Vec<Document> {
        self.state
            .read()
            .await
            .collections
            .get(path)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of open listeners on a collection
    pub async fn listener_count(&self, path: &CollectionPath) -> usize {
        self.state
            .read()
            .await
            .listeners
            .get(path)
            .map_or(0, |listeners| {
                listeners.iter().filter(|l| !l.tx.is_closed()).count()
            })
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn append_document(&self, path: &CollectionPath, payload: Value) -> AppResult<DocumentId> {
        let mut state = self.state.write().await;
        if state.reject_all_writes {
            return Err(AppError::storage(format!("Write to {path} rejected")));
        }
        if state.failing_writes > 0 {
            state.failing_writes -= 1;
            return Err(AppError::storage(format!("Write to {path} failed")));
        }

        let id = DocumentId(Uuid::new_v4().simple().to_string());
        state
            .collections
            .entry(path.clone())
            .or_default()
            .push(Document {
                id: id.clone(),
                data: payload,
            });
        debug!(collection = %path, document = %id, "Document appended");
        state.notify(path);
        Ok(id)
    }

    async fn subscribe(
        &self,
        path: &CollectionPath,
        order: Option<OrderBy>,
    ) -> AppResult<CollectionSubscription> {
        let mut state = self.state.write().await;
        if order.is_some() && state.index_missing {
            return Err(AppError::new(
                ErrorCode::IndexMissing,
                format!("The query on {path} requires an index"),
            ));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(state.snapshot(path, order.as_ref()))
            .map_err(|_| AppError::internal("Subscription closed before initial snapshot"))?;
        state
            .listeners
            .entry(path.clone())
            .or_default()
            .push(Listener { order, tx });
        Ok(CollectionSubscription::new(rx))
    }
}
