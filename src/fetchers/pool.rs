// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::time::Duration;

use super::{batch_for, fields, ChainContext};
use crate::batch::{CallBatch, ReadCall};
use crate::batcher::BatchFetcher;
use crate::config::constants::ttl;
use crate::errors::BatchError;
use crate::multicall::MulticallExecutor;
use crate::vaults::abi::{IVault, IERC20};
use crate::vaults::Vault;

/// Vault composition: decimals, price per share and TVL.
#[derive(Debug, Clone)]
pub struct PoolFetcher {
    ttl: Duration,
}

impl PoolFetcher {
    /// Create a fetcher with a custom freshness window
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl Default for PoolFetcher {
    fn default() -> Self {
        Self::new(ttl::POOL)
    }
}

/// Calls describing one vault's composition.
///
/// A native vault has no want token contract, so its token decimals are the
/// vault's own.
pub fn pool_calls(vault: &Vault) -> Vec<(&'static str, ReadCall)> {
    let token_decimals = match vault.token {
        Some(token) => ReadCall::uint8(token, &IERC20::decimalsCall {}),
        None => ReadCall::uint8(vault.address, &IVault::decimalsCall {}),
    };

    vec![
        (
            fields::VAULT_DECIMALS,
            ReadCall::uint8(vault.address, &IVault::decimalsCall {}),
        ),
        (fields::TOKEN_DECIMALS, token_decimals),
        (
            fields::PRICE_PER_FULL_SHARE,
            ReadCall::uint256(vault.address, &IVault::getPricePerFullShareCall {}),
        ),
        (
            fields::TVL,
            ReadCall::uint256(vault.address, &IVault::balanceCall {}),
        ),
    ]
}

impl BatchFetcher for PoolFetcher {
    type Context = ChainContext;

    fn name(&self) -> &'static str {
        "pool"
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }

    fn build_calls(&self, ctx: &ChainContext) -> Result<CallBatch, BatchError> {
        batch_for(&ctx.catalog.vaults(), |vault| Ok(pool_calls(vault)))
    }

    fn executor(&self, ctx: &ChainContext) -> Arc<dyn MulticallExecutor> {
        Arc::clone(&ctx.executor)
    }
}
