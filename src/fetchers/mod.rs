// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Vault datasets refreshed through [`Batcher`](crate::batcher::Batcher)s.
//!
//! | Fetcher | Cache key | Default TTL | Entities |
//! |---------|-----------|-------------|----------|
//! | [`PoolFetcher`] | `pool-{chain_id}` | 10 s | every vault |
//! | [`WalletFetcher`] | `wallet-{chain_id}-{account}` | 2 s | every vault, for one account |
//! | [`LpFetcher`] | `lps-{chain_id}` | 60 s | vaults priced by LP composition |
//!
//! Fetchers only describe calls. The executor and the vault list are carried
//! by the refresh context, so one fetcher works against any chain.

mod lps;
mod pool;
mod wallet;

pub use lps::{lp_calls, LpFetcher};
pub use pool::{pool_calls, PoolFetcher};
pub use wallet::{wallet_calls, WalletContext, WalletFetcher};

use std::fmt;
use std::sync::Arc;

use alloy_primitives::Address;

use crate::batch::{to_batched_calls, CallBatch, ReadCall};
use crate::errors::BatchError;
use crate::multicall::{MulticallExecutor, MULTICALL3_ADDRESS};
use crate::vaults::{Vault, VaultCatalog};

/// Field labels written into entity records
pub mod fields {
    /// Decimals of the vault share token
    pub const VAULT_DECIMALS: &str = "vault_decimals";
    /// Decimals of the want token
    pub const TOKEN_DECIMALS: &str = "token_decimals";
    /// Want tokens per 1e18 shares
    pub const PRICE_PER_FULL_SHARE: &str = "price_per_full_share";
    /// Want tokens held by the vault and its strategy
    pub const TVL: &str = "tvl";

    /// Account balance of the want token
    pub const BALANCE: &str = "balance";
    /// Want token allowance granted by the account to the vault
    pub const ALLOWANCE: &str = "allowance";
    /// Vault shares held by the account
    pub const SHARES: &str = "shares";
    /// Rewards accrued but not yet claimed
    pub const PENDING_REWARDS: &str = "pending_rewards";
    /// Rewards already paid out by the controller pool
    pub const PAID_REWARDS: &str = "paid_rewards";

    /// Decimals of the LP token
    pub const DECIMALS: &str = "decimals";
    /// Total supply of the LP token
    pub const TOTAL_SUPPLY: &str = "total_supply";
    /// LP pool's balance of its first token
    pub const TOKEN0_BALANCE: &str = "token0_balance";
    /// Decimals of the first token
    pub const TOKEN0_DECIMALS: &str = "token0_decimals";
    /// LP pool's balance of its second token
    pub const TOKEN1_BALANCE: &str = "token1_balance";
    /// Decimals of the second token
    pub const TOKEN1_DECIMALS: &str = "token1_decimals";
}

/// Per-chain refresh context shared by every fetcher.
#[derive(Clone)]
pub struct ChainContext {
    /// EVM chain id, part of every cache key
    pub chain_id: u64,
    /// Executor batches are submitted to
    pub executor: Arc<dyn MulticallExecutor>,
    /// Vaults tracked on this chain
    pub catalog: Arc<dyn VaultCatalog>,
    /// Multicall3 deployment, also queried for native balances
    pub multicall_address: Address,
}

impl ChainContext {
    /// Create a context using the canonical Multicall3 deployment
    pub fn new(
        chain_id: u64,
        executor: Arc<dyn MulticallExecutor>,
        catalog: Arc<dyn VaultCatalog>,
    ) -> Self {
        Self {
            chain_id,
            executor,
            catalog,
            multicall_address: MULTICALL3_ADDRESS,
        }
    }

    /// Query native balances through a different Multicall3 deployment
    #[must_use]
    pub fn with_multicall_address(mut self, address: Address) -> Self {
        self.multicall_address = address;
        self
    }
}

impl fmt::Debug for ChainContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainContext")
            .field("chain_id", &self.chain_id)
            .field("multicall_address", &self.multicall_address)
            .finish_non_exhaustive()
    }
}

/// Flatten the per-vault calls of `vaults` into one batch
fn batch_for<'a, I, C>(vaults: I, mut calls_for: C) -> Result<CallBatch, BatchError>
where
    I: IntoIterator<Item = &'a Vault>,
    C: FnMut(&Vault) -> Result<Vec<(&'static str, ReadCall)>, BatchError>,
{
    let mut batch = CallBatch::new();
    for vault in vaults {
        batch.extend(to_batched_calls(&vault.id, calls_for(vault)?))?;
    }
    Ok(batch)
}
