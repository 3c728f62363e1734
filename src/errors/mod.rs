// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the vaultscan library.
//!
//! Like the rest of the crate, errors follow a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained handling ([`RpcError`],
//!   [`MulticallError`], [`BatchError`])
//! - **Unified error type** ([`VaultscanError`]) for callers that only want `?`
//!
//! A failed refresh is handed to every coalesced caller as a [`RefreshError`],
//! a cheap-to-clone wrapper around the single [`BatchError`] that caused it.
//!
//! # Examples
//!
//! ```rust,ignore
//! use vaultscan::{BatchError, VaultReader};
//!
//! match reader.pool_data("vault-1").await {
//!     Ok(record) => println!("tvl: {:?}", record.and_then(|r| r.uint("tvl"))),
//!     Err(e) => match e.inner() {
//!         BatchError::Multicall(err) => eprintln!("RPC failure, next call retries: {err}"),
//!         other => eprintln!("refresh failed: {other}"),
//!     },
//! }
//! ```

mod batch;
mod multicall;
mod rpc;

pub use batch::{BatchError, RefreshError};
pub use multicall::MulticallError;
pub use rpc::RpcError;

/// Unified error type for all vaultscan operations.
///
/// All module-specific error types convert into `VaultscanError` via `From`,
/// so `?` works across module boundaries.
#[derive(Debug, thiserror::Error)]
pub enum VaultscanError {
    /// Error from provider construction or raw RPC access.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Error from a multicall round trip outside of a batcher.
    #[error("Multicall error: {0}")]
    Multicall(#[from] MulticallError),

    /// Error from a batched refresh.
    #[error("Refresh error: {0}")]
    Refresh(#[from] RefreshError),

    /// Error while loading a vault catalog.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Errors raised while loading a vault catalog from disk.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {path}")]
    Read {
        /// Path of the catalog file
        path: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid JSON for a vault list.
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two vaults share an id.
    #[error("Duplicate vault id in catalog: {0}")]
    DuplicateId(String),
}
