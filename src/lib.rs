// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! # vaultscan
//!
//! Batched, TTL-cached on-chain reads for yield vaults.
//!
//! Reading a dashboard's worth of vault data naively costs one `eth_call`
//! per field per vault, repeated by every component that renders it.
//! vaultscan collapses that into one Multicall3 round trip per dataset and
//! per TTL window:
//!
//! - [`batch`]: labeled read calls, batch building and the result store
//! - [`multicall`]: the executor contract and its Multicall3 implementation
//! - [`batcher`]: the request-coalescing TTL cache and its per-key registry
//! - [`fetchers`]: pool, wallet and LP datasets
//! - [`reader`]: the chain- and account-scoped getters applications call
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vaultscan::fetchers::ChainContext;
//! use vaultscan::multicall::Multicall3Executor;
//! use vaultscan::provider::{create_http_provider, ProviderConfig};
//! use vaultscan::vaults::StaticCatalog;
//! use vaultscan::{Registries, VaultReader, VaultscanConfig};
//!
//! let provider = create_http_provider(ProviderConfig::new("https://polygon-rpc.com"))?;
//! let executor = Arc::new(Multicall3Executor::new(provider));
//! let catalog = Arc::new(StaticCatalog::from_path("vaults.json").await?);
//!
//! let registries = Arc::new(Registries::new(VaultscanConfig::default()));
//! let chain = ChainContext::new(137, executor, catalog);
//! let reader = VaultReader::new(chain, Some(account), registries);
//!
//! // Concurrent getters share a single multicall
//! let (shares, pps) = tokio::try_join!(
//!     reader.shares("polygon-usdc"),
//!     reader.price_per_full_share("polygon-usdc"),
//! )?;
//! ```

pub mod batch;
pub mod batcher;
pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod fetchers;
pub mod multicall;
pub mod provider;
pub mod reader;
mod spans;
pub mod vaults;

pub use batch::{CacheStore, EntityId, EntityRecord, FieldLabel, ReadCall};
pub use batcher::{BatchFetcher, Batcher, BatcherRegistry, BatcherStats};
pub use config::{VaultscanConfig, VaultscanConfigBuilder};
pub use errors::{
    BatchError, CatalogError, MulticallError, RefreshError, RpcError, VaultscanError,
};
pub use fetchers::{ChainContext, WalletContext};
pub use multicall::{Multicall3Executor, MulticallExecutor};
pub use reader::{Registries, VaultReader};
