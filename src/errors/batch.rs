// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for batched refreshes.
//!
//! A refresh is all-or-nothing: a failure while building calls for one entity,
//! while executing the multicall, or while merging results fails the refresh
//! for every caller that joined it.

use std::sync::Arc;

use super::MulticallError;
use crate::batch::{EntityId, FieldLabel};

/// Errors that can occur while building, executing or merging a batch.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// A fetcher could not construct the calls for an entity.
    #[error("Failed to build calls for {entity}: {details}")]
    CallConstruction {
        /// The entity whose calls could not be built
        entity: EntityId,
        /// Why construction failed
        details: String,
    },

    /// The same (entity, label) pair was submitted twice in one refresh.
    #[error("Duplicate field {label} for {entity} in one batch")]
    DuplicateField {
        /// The entity carrying the duplicate
        entity: EntityId,
        /// The duplicated label
        label: FieldLabel,
    },

    /// Results and descriptors disagree in length, nothing was merged.
    #[error("Cannot merge {actual} results into {expected} descriptors")]
    ResultCountMismatch {
        /// Number of descriptors in the batch
        expected: usize,
        /// Number of results received
        actual: usize,
    },

    /// The multicall round trip failed.
    #[error("Multicall failed: {0}")]
    Multicall(#[from] MulticallError),

    /// The refresh task stopped before producing a result (it panicked).
    #[error("Refresh of {key} aborted: {details}")]
    RefreshAborted {
        /// Cache key of the batcher whose refresh aborted
        key: String,
        /// Details reported by the runtime
        details: String,
    },
}

impl BatchError {
    /// Create a `CallConstruction` error for an entity.
    pub fn call_construction(entity: impl Into<EntityId>, details: impl Into<String>) -> Self {
        BatchError::CallConstruction {
            entity: entity.into(),
            details: details.into(),
        }
    }
}

/// Outcome of a failed refresh, shared by every coalesced caller.
///
/// Cloning is cheap: all callers that joined the same refresh observe the very
/// same [`BatchError`].
#[derive(Debug, Clone, thiserror::Error)]
#[error(transparent)]
pub struct RefreshError(Arc<BatchError>);

impl RefreshError {
    /// The underlying batch error.
    pub fn inner(&self) -> &BatchError {
        &self.0
    }
}

impl From<BatchError> for RefreshError {
    fn from(error: BatchError) -> Self {
        Self(Arc::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_error_clones_share_the_same_error() {
        let error = RefreshError::from(BatchError::ResultCountMismatch {
            expected: 4,
            actual: 3,
        });
        let joined = error.clone();

        assert!(std::ptr::eq(error.inner(), joined.inner()));
        assert_eq!(
            joined.to_string(),
            "Cannot merge 3 results into 4 descriptors"
        );
    }

    #[test]
    fn test_call_construction_display() {
        let error = BatchError::call_construction("vault-1", "missing LP pair");
        assert_eq!(
            error.to_string(),
            "Failed to build calls for vault-1: missing LP pair"
        );
    }
}
