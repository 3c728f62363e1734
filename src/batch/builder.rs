// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Call batch assembly.
//!
//! Fetchers describe each entity's reads as an ordered list of
//! `(label, call)` pairs. [`to_batched_calls`] tags those pairs with the
//! entity id and [`CallBatch`] concatenates the results of many entities into
//! the flat, ordered batch handed to a multicall executor.

use std::collections::HashSet;

use super::{CallDescriptor, EntityId, FieldLabel, ReadCall};
use crate::errors::BatchError;

/// Tag every `(label, call)` pair with `entity`, preserving order.
///
/// An entity with no applicable calls simply yields an empty list.
pub fn to_batched_calls<L>(
    entity: &EntityId,
    calls: impl IntoIterator<Item = (L, ReadCall)>,
) -> Vec<CallDescriptor>
where
    L: Into<FieldLabel>,
{
    calls
        .into_iter()
        .map(|(label, call)| CallDescriptor::new(entity, label, call))
        .collect()
}

/// Flat, ordered collection of call descriptors for one refresh.
///
/// Rejects a second descriptor for an `(entity, label)` pair that is already
/// present.
#[derive(Debug, Clone, Default)]
pub struct CallBatch {
    descriptors: Vec<CallDescriptor>,
    seen: HashSet<(EntityId, FieldLabel)>,
}

impl CallBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one descriptor.
    pub fn push(&mut self, descriptor: CallDescriptor) -> Result<(), BatchError> {
        let pair = (descriptor.entity.clone(), descriptor.label.clone());
        if !self.seen.insert(pair) {
            return Err(BatchError::DuplicateField {
                entity: descriptor.entity,
                label: descriptor.label,
            });
        }
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Append the output of [`to_batched_calls`] for one entity.
    pub fn extend(
        &mut self,
        descriptors: impl IntoIterator<Item = CallDescriptor>,
    ) -> Result<(), BatchError> {
        descriptors
            .into_iter()
            .try_for_each(|descriptor| self.push(descriptor))
    }

    /// Number of calls in the batch
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the batch contains no calls
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Number of distinct entities contributing calls
    pub fn entity_count(&self) -> usize {
        self.descriptors
            .iter()
            .map(|d| &d.entity)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Descriptors in submission order
    pub fn descriptors(&self) -> &[CallDescriptor] {
        &self.descriptors
    }

    /// The bare calls in submission order, as sent to the executor
    pub fn calls(&self) -> Vec<ReadCall> {
        self.descriptors.iter().map(|d| d.call.clone()).collect()
    }
}
