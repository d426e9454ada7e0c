//! Identity data collaborator
//!
//! The store owns the user's saved identity data, knows how to merge it into
//! a field template and how to sign a snapshot. Callers only ever read from
//! it here.
//!
//! Snapshots are passed explicitly to [`IdentityDataStore::merge_fields`] and
//! [`IdentityDataStore::signature`], so a signature always attests to the
//! exact data that produced the merged fields.

mod memory;
mod merge;

use async_trait::async_trait;
use request_types::FieldDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::IdDataResult;

pub use memory::{snapshot_digest, InMemoryIdData};
pub use merge::merge_fields;

/// Point-in-time read of the stored identity data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdDataSnapshot {
    /// Store generation the snapshot was taken at
    pub generation: u64,
    /// Stored elements, in storage order
    pub elements: Vec<FieldDescriptor>,
}

impl IdDataSnapshot {
    pub fn new(generation: u64, elements: Vec<FieldDescriptor>) -> Self {
        Self {
            generation,
            elements,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Opaque attestation bound to one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How stored data is merged into a template.
///
/// Existing non-empty template values are never overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOptions {
    /// Keep the template's labels instead of the stored ones
    pub keep_descriptions: bool,
    /// Keep the template's optional flags instead of the stored ones
    pub keep_optionality: bool,
    /// Fill fields marked optional
    pub fill_optional: bool,
    /// Fill fields marked required
    pub fill_required: bool,
    /// Append stored elements that match no template field
    pub add_missing: bool,
}

impl MergeOptions {
    /// Options used when forms are filled automatically
    pub const fn autofill() -> Self {
        Self {
            keep_descriptions: true,
            keep_optionality: true,
            fill_optional: true,
            fill_required: true,
            add_missing: false,
        }
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self::autofill()
    }
}

/// Store of the user's identity data
#[async_trait]
pub trait IdentityDataStore: Send + Sync {
    /// Whether saved data should fill forms without the user asking
    fn should_always_fill(&self) -> bool;

    /// Read the complete stored data
    async fn get_all_fixed(&self) -> IdDataResult<IdDataSnapshot>;

    /// Merge `snapshot` into `template`
    async fn merge_fields(
        &self,
        template: &[FieldDescriptor],
        snapshot: &IdDataSnapshot,
        options: MergeOptions,
    ) -> IdDataResult<Vec<FieldDescriptor>>;

    /// Signature over `snapshot`
    async fn signature(&self, snapshot: &IdDataSnapshot) -> IdDataResult<Signature>;
}
