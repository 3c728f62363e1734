// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Call batching and result merging.
//!
//! This module holds the data half of the batched-read protocol:
//!
//! - [`ReadCall`] / [`CallDescriptor`]: an unexecuted view call, tagged with
//!   the entity and field it fills in
//! - [`to_batched_calls`] / [`CallBatch`]: flatten many entities' calls into
//!   one ordered batch
//! - [`CacheStore`]: the nested `entity → label → value` map results are
//!   merged into
//!
//! # Example
//!
//! ```rust,ignore
//! use vaultscan::batch::{to_batched_calls, CacheStore, CallBatch};
//!
//! let mut batch = CallBatch::new();
//! for vault in vaults {
//!     batch.extend(to_batched_calls(&vault.id, calls_for(&vault)))?;
//! }
//!
//! let values = executor.aggregate(&batch.calls()).await?;
//! store.merge(batch.descriptors(), values)?;
//! ```

mod builder;
mod call;
mod store;

pub use builder::{to_batched_calls, CallBatch};
pub use call::{CallDescriptor, EntityId, FieldLabel, ReadCall};
pub use store::{CacheStore, EntityRecord};
