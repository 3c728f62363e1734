// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider construction for runtime chain selection
//!
//! The chain a [`VaultReader`](crate::VaultReader) talks to is usually chosen
//! at runtime (configuration, user input), so providers here use
//! `AnyNetwork`. [`Multicall3Executor`](crate::multicall::Multicall3Executor)
//! stays generic over `Provider<N>` for callers that know their network at
//! compile time.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vaultscan::multicall::Multicall3Executor;
//! use vaultscan::provider::{create_http_provider, ProviderConfig};
//!
//! let provider = create_http_provider(ProviderConfig::new("https://polygon-rpc.com"))?;
//! let executor = Arc::new(Multicall3Executor::new(provider));
//! ```

mod config;
mod factory;

pub use config::ProviderConfig;
#[cfg(feature = "ws")]
pub use factory::create_ws_provider;
pub use factory::{create_http_provider, simple_http_provider};

use alloy_network::AnyNetwork;

/// Type alias for a root provider using AnyNetwork, over HTTP or WebSocket
pub type AnyRootProvider = alloy_provider::RootProvider<AnyNetwork>;
