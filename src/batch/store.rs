// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Keyed cache store and result merging.

use std::collections::HashMap;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::U256;

use super::{CallDescriptor, EntityId, FieldLabel};
use crate::errors::BatchError;

/// The fields fetched for one entity, keyed by label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityRecord {
    fields: HashMap<FieldLabel, DynSolValue>,
}

impl EntityRecord {
    /// Value stored under `label`, if any
    pub fn get(&self, label: &str) -> Option<&DynSolValue> {
        self.fields.get(label)
    }

    /// Numeric value stored under `label`.
    ///
    /// Returns `None` when the field is missing or is not an integer type.
    pub fn uint(&self, label: &str) -> Option<U256> {
        match self.get(label)? {
            DynSolValue::Uint(value, _) => Some(*value),
            DynSolValue::Int(value, _) if !value.is_negative() => Some(value.into_raw()),
            _ => None,
        }
    }

    /// Overwrite one field, returning the previous value
    pub fn insert(
        &mut self,
        label: impl Into<FieldLabel>,
        value: DynSolValue,
    ) -> Option<DynSolValue> {
        self.fields.insert(label.into(), value)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record holds no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(label, value)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&FieldLabel, &DynSolValue)> {
        self.fields.iter()
    }
}

impl<L: Into<FieldLabel>> FromIterator<(L, DynSolValue)> for EntityRecord {
    fn from_iter<I: IntoIterator<Item = (L, DynSolValue)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(label, value)| (label.into(), value))
                .collect(),
        }
    }
}

/// Entity id → field label → value.
///
/// Mutated in place by [`CacheStore::merge`]; entries are overwritten field by
/// field and never removed, so the store only ever grows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStore {
    entities: HashMap<EntityId, EntityRecord>,
}

impl CacheStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for one entity
    pub fn entity(&self, id: &str) -> Option<&EntityRecord> {
        self.entities.get(id)
    }

    /// Single field of one entity
    pub fn field(&self, id: &str, label: &str) -> Option<&DynSolValue> {
        self.entity(id)?.get(label)
    }

    /// Number of entities with at least one field
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether nothing has been merged yet
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over entities in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &EntityRecord)> {
        self.entities.iter()
    }

    /// Write `values[i]` into `[descriptors[i].entity][descriptors[i].label]`.
    ///
    /// Inner records are created on first write. Each write replaces the
    /// previous value of that field. On a length mismatch nothing is written.
    ///
    /// Returns the number of fields written.
    pub fn merge(
        &mut self,
        descriptors: &[CallDescriptor],
        values: Vec<DynSolValue>,
    ) -> Result<usize, BatchError> {
        if descriptors.len() != values.len() {
            return Err(BatchError::ResultCountMismatch {
                expected: descriptors.len(),
                actual: values.len(),
            });
        }

        for (descriptor, value) in descriptors.iter().zip(values) {
            self.entities
                .entry(descriptor.entity.clone())
                .or_default()
                .insert(descriptor.label.clone(), value);
        }

        Ok(descriptors.len())
    }
}

impl FromIterator<(EntityId, EntityRecord)> for CacheStore {
    fn from_iter<I: IntoIterator<Item = (EntityId, EntityRecord)>>(iter: I) -> Self {
        Self {
            entities: iter.into_iter().collect(),
        }
    }
}
