// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U256};

use super::{batch_for, fields, ChainContext};
use crate::batch::{CallBatch, ReadCall};
use crate::batcher::BatchFetcher;
use crate::config::constants::ttl;
use crate::errors::BatchError;
use crate::multicall::{IMulticall3, MulticallExecutor};
use crate::vaults::abi::{IController, IVault, IERC20};
use crate::vaults::{ShareLedger, Vault};

/// Refresh context of an account-scoped dataset.
#[derive(Debug, Clone)]
pub struct WalletContext {
    /// Chain the account is read on
    pub chain: ChainContext,
    /// Account whose positions are read; `None` reads nothing
    pub account: Option<Address>,
}

/// Per-account balances, allowances, shares and rewards.
#[derive(Debug, Clone)]
pub struct WalletFetcher {
    ttl: Duration,
}

impl WalletFetcher {
    /// Create a fetcher with a custom freshness window
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl Default for WalletFetcher {
    fn default() -> Self {
        Self::new(ttl::WALLET)
    }
}

/// Calls describing `account`'s position in one vault.
///
/// Native vaults need no approval; their allowance mirrors the native
/// balance so deposit checks treat both the same way.
pub fn wallet_calls(
    vault: &Vault,
    account: Address,
    multicall_address: Address,
) -> Vec<(&'static str, ReadCall)> {
    let balance = match vault.token {
        Some(token) => ReadCall::uint256(token, &IERC20::balanceOfCall { account }),
        None => ReadCall::uint256(
            multicall_address,
            &IMulticall3::getEthBalanceCall { addr: account },
        ),
    };
    let allowance = match vault.token {
        Some(token) => ReadCall::uint256(
            token,
            &IERC20::allowanceCall {
                owner: account,
                spender: vault.address,
            },
        ),
        None => balance.clone(),
    };

    let mut calls = vec![(fields::BALANCE, balance), (fields::ALLOWANCE, allowance)];

    match vault.ledger {
        ShareLedger::Vault => calls.push((
            fields::SHARES,
            ReadCall::uint256(vault.address, &IVault::balanceOfCall { account }),
        )),
        ShareLedger::Controller { address, pid } => {
            let pid = U256::from(pid);
            calls.push((
                fields::SHARES,
                ReadCall::uint256(address, &IController::balanceOfCall { pid, user: account }),
            ));
            calls.push((
                fields::PENDING_REWARDS,
                ReadCall::uint256(
                    address,
                    &IController::pendingPiTokenCall { pid, user: account },
                ),
            ));
            calls.push((
                fields::PAID_REWARDS,
                ReadCall::uint256(address, &IController::paidRewardsCall { pid }),
            ));
        }
    }

    calls
}

impl BatchFetcher for WalletFetcher {
    type Context = WalletContext;

    fn name(&self) -> &'static str {
        "wallet"
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }

    fn build_calls(&self, ctx: &WalletContext) -> Result<CallBatch, BatchError> {
        let Some(account) = ctx.account else {
            return Ok(CallBatch::new());
        };

        let multicall_address = ctx.chain.multicall_address;
        batch_for(&ctx.chain.catalog.vaults(), |vault| {
            Ok(wallet_calls(vault, account, multicall_address))
        })
    }

    fn executor(&self, ctx: &WalletContext) -> Arc<dyn MulticallExecutor> {
        Arc::clone(&ctx.chain.executor)
    }
}
