// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Read-side facade over the vault batchers.
//!
//! A [`VaultReader`] is scoped to one chain and, optionally, one account.
//! Every getter first ensures the relevant batcher is fresh and then reads
//! from its store, so the first getter after a TTL expiry pays for one
//! multicall and every concurrent getter shares it.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vaultscan::{ChainContext, Registries, VaultReader, VaultscanConfig};
//!
//! let registries = Arc::new(Registries::new(VaultscanConfig::default()));
//! let reader = VaultReader::new(chain, Some(account), registries);
//! let shares = reader.shares("polygon-usdc").await?;
//! let pps = reader.price_per_full_share("polygon-usdc").await?;
//! ```

use std::sync::Arc;

use alloy_primitives::{Address, U256};

use crate::batch::EntityRecord;
use crate::batcher::{Batcher, BatcherRegistry};
use crate::config::constants::NATIVE_DEPOSIT_RESERVE_WEI;
use crate::config::VaultscanConfig;
use crate::errors::RefreshError;
use crate::fetchers::{fields, ChainContext, LpFetcher, PoolFetcher, WalletContext, WalletFetcher};

/// Batcher registries for every vault dataset.
///
/// Batchers are created on first use with the TTLs of the registries'
/// [`VaultscanConfig`]. Build one at startup and hand the same `Arc` to every
/// [`VaultReader`] that should share caches; tests build their own.
#[derive(Debug, Default)]
pub struct Registries {
    config: VaultscanConfig,
    pools: BatcherRegistry<PoolFetcher>,
    wallets: BatcherRegistry<WalletFetcher>,
    lps: BatcherRegistry<LpFetcher>,
}

impl Registries {
    /// Create empty registries using `config`'s TTLs
    pub fn new(config: VaultscanConfig) -> Self {
        Self {
            config,
            pools: BatcherRegistry::new(),
            wallets: BatcherRegistry::new(),
            lps: BatcherRegistry::new(),
        }
    }

    /// Configuration batchers are created with
    pub fn config(&self) -> &VaultscanConfig {
        &self.config
    }

    /// Pool batcher of `chain_id`
    pub fn pool(&self, chain_id: u64) -> Batcher<PoolFetcher> {
        self.pools.get_or_insert_with(&pool_key(chain_id), || {
            PoolFetcher::new(self.config.pool_ttl)
        })
    }

    /// Wallet batcher of `account` on `chain_id`
    pub fn wallet(&self, chain_id: u64, account: Address) -> Batcher<WalletFetcher> {
        self.wallets
            .get_or_insert_with(&wallet_key(chain_id, account), || {
                WalletFetcher::new(self.config.wallet_ttl)
            })
    }

    /// LP batcher of `chain_id`
    pub fn lps(&self, chain_id: u64) -> Batcher<LpFetcher> {
        self.lps.get_or_insert_with(&lps_key(chain_id), || {
            LpFetcher::new(self.config.lp_ttl)
        })
    }
}

/// Cache key of a chain's pool batcher
pub fn pool_key(chain_id: u64) -> String {
    format!("pool-{chain_id}")
}

/// Cache key of an account's wallet batcher
pub fn wallet_key(chain_id: u64, account: Address) -> String {
    format!("wallet-{chain_id}-{account}")
}

/// Cache key of a chain's LP batcher
pub fn lps_key(chain_id: u64) -> String {
    format!("lps-{chain_id}")
}

/// Chain- and account-scoped view of vault data.
#[derive(Debug, Clone)]
pub struct VaultReader {
    chain: ChainContext,
    account: Option<Address>,
    registries: Arc<Registries>,
}

impl VaultReader {
    /// Create a reader whose batchers live in `registries`
    pub fn new(
        chain: ChainContext,
        account: Option<Address>,
        registries: Arc<Registries>,
    ) -> Self {
        Self {
            chain,
            account,
            registries,
        }
    }

    /// Chain this reader is scoped to
    pub fn chain(&self) -> &ChainContext {
        &self.chain
    }

    /// Account this reader is scoped to
    pub fn account(&self) -> Option<Address> {
        self.account
    }

    /// Composition record of a vault
    pub async fn pool_data(&self, vault_id: &str) -> Result<Option<EntityRecord>, RefreshError> {
        let batcher = self.registries.pool(self.chain.chain_id);
        batcher.perform(&self.chain).await?;
        Ok(batcher.entity(vault_id))
    }

    /// Position record of the reader's account in a vault.
    ///
    /// Without an account this is an empty record and nothing is fetched.
    pub async fn wallet_data(&self, vault_id: &str) -> Result<EntityRecord, RefreshError> {
        let Some(account) = self.account else {
            return Ok(EntityRecord::default());
        };

        let batcher = self.registries.wallet(self.chain.chain_id, account);
        let ctx = WalletContext {
            chain: self.chain.clone(),
            account: Some(account),
        };
        batcher.perform(&ctx).await?;
        Ok(batcher.entity(vault_id).unwrap_or_default())
    }

    /// LP composition record of a vault; `None` unless it is LP-priced
    pub async fn lp_data(&self, vault_id: &str) -> Result<Option<EntityRecord>, RefreshError> {
        let batcher = self.registries.lps(self.chain.chain_id);
        batcher.perform(&self.chain).await?;
        Ok(batcher.entity(vault_id))
    }

    async fn pool_field(&self, vault_id: &str, label: &str) -> Result<Option<U256>, RefreshError> {
        Ok(self
            .pool_data(vault_id)
            .await?
            .and_then(|record| record.uint(label)))
    }

    async fn wallet_field(
        &self,
        vault_id: &str,
        label: &str,
    ) -> Result<Option<U256>, RefreshError> {
        Ok(self.wallet_data(vault_id).await?.uint(label))
    }

    /// Vault shares held by the account
    pub async fn shares(&self, vault_id: &str) -> Result<Option<U256>, RefreshError> {
        self.wallet_field(vault_id, fields::SHARES).await
    }

    /// Want token allowance granted to the vault
    pub async fn allowance(&self, vault_id: &str) -> Result<Option<U256>, RefreshError> {
        self.wallet_field(vault_id, fields::ALLOWANCE).await
    }

    /// Want token balance of the account
    pub async fn balance(&self, vault_id: &str) -> Result<Option<U256>, RefreshError> {
        self.wallet_field(vault_id, fields::BALANCE).await
    }

    /// Rewards accrued by the account in a controller vault
    pub async fn pending_rewards(&self, vault_id: &str) -> Result<Option<U256>, RefreshError> {
        self.wallet_field(vault_id, fields::PENDING_REWARDS).await
    }

    /// Largest amount the account can deposit.
    ///
    /// Native vaults keep a gas reserve back from the balance.
    pub async fn max_deposit(&self, vault_id: &str) -> Result<Option<U256>, RefreshError> {
        let Some(balance) = self.balance(vault_id).await? else {
            return Ok(None);
        };

        let native = self
            .chain
            .catalog
            .vault(vault_id)
            .is_some_and(|vault| vault.is_native());
        if native {
            Ok(Some(balance.saturating_sub(U256::from(NATIVE_DEPOSIT_RESERVE_WEI))))
        } else {
            Ok(Some(balance))
        }
    }

    /// Decimals of the vault share token
    pub async fn decimals(&self, vault_id: &str) -> Result<Option<U256>, RefreshError> {
        self.pool_field(vault_id, fields::VAULT_DECIMALS).await
    }

    /// Decimals of the want token
    pub async fn token_decimals(&self, vault_id: &str) -> Result<Option<U256>, RefreshError> {
        self.pool_field(vault_id, fields::TOKEN_DECIMALS).await
    }

    /// Want tokens per 1e18 shares
    pub async fn price_per_full_share(
        &self,
        vault_id: &str,
    ) -> Result<Option<U256>, RefreshError> {
        self.pool_field(vault_id, fields::PRICE_PER_FULL_SHARE).await
    }

    /// Want tokens managed by the vault
    pub async fn tvl(&self, vault_id: &str) -> Result<Option<U256>, RefreshError> {
        self.pool_field(vault_id, fields::TVL).await
    }
}
