//! In-process identity data store.
//!
//! Holds elements in memory only. Every write bumps the store generation, so
//! snapshots taken before and after a write are distinguishable.

use async_trait::async_trait;
use request_types::FieldDescriptor;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::{merge, IdDataSnapshot, IdentityDataStore, MergeOptions, Signature};
use crate::error::IdDataResult;

#[derive(Debug, Default)]
struct StoreState {
    generation: u64,
    elements: Vec<FieldDescriptor>,
}

#[derive(Debug, Default)]
pub struct InMemoryIdData {
    state: RwLock<StoreState>,
    always_fill: AtomicBool,
}

impl InMemoryIdData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements(elements: Vec<FieldDescriptor>) -> Self {
        Self {
            state: RwLock::new(StoreState {
                generation: 1,
                elements,
            }),
            always_fill: AtomicBool::new(false),
        }
    }

    pub fn always_filling(self, always_fill: bool) -> Self {
        self.set_always_fill(always_fill);
        self
    }

    pub fn set_always_fill(&self, always_fill: bool) {
        self.always_fill.store(always_fill, Ordering::SeqCst);
    }

    /// Store `element`, replacing one with the same kind and label
    pub async fn put(&self, element: FieldDescriptor) -> u64 {
        let mut state = self.state.write().await;
        let existing = state
            .elements
            .iter()
            .position(|e| e.kind == element.kind && e.description == element.description);
        match existing {
            Some(idx) => state.elements[idx] = element,
            None => state.elements.push(element),
        }
        state.generation += 1;
        tracing::debug!(generation = state.generation, "Stored identity data element");
        state.generation
    }

    /// Drop every stored element
    pub async fn clear(&self) -> u64 {
        let mut state = self.state.write().await;
        state.elements.clear();
        state.generation += 1;
        state.generation
    }

    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }
}

#[async_trait]
impl IdentityDataStore for InMemoryIdData {
    fn should_always_fill(&self) -> bool {
        self.always_fill.load(Ordering::SeqCst)
    }

    async fn get_all_fixed(&self) -> IdDataResult<IdDataSnapshot> {
        let state = self.state.read().await;
        Ok(IdDataSnapshot::new(state.generation, state.elements.clone()))
    }

    async fn merge_fields(
        &self,
        template: &[FieldDescriptor],
        snapshot: &IdDataSnapshot,
        options: MergeOptions,
    ) -> IdDataResult<Vec<FieldDescriptor>> {
        Ok(merge::merge_fields(template, &snapshot.elements, options))
    }

    async fn signature(&self, snapshot: &IdDataSnapshot) -> IdDataResult<Signature> {
        snapshot_digest(snapshot)
    }
}

/// SHA-256 over the snapshot generation and its elements' JSON
pub fn snapshot_digest(snapshot: &IdDataSnapshot) -> IdDataResult<Signature> {
    let mut hasher = Sha256::new();
    hasher.update(snapshot.generation.to_be_bytes());
    hasher.update(serde_json::to_vec(&snapshot.elements)?);
    Ok(Signature::new(hex::encode(hasher.finalize())))
}
