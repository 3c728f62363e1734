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
use crate::vaults::abi::IERC20;
use crate::vaults::{Oracle, Vault};

/// LP token composition of vaults priced by their LP's reserves.
#[derive(Debug, Clone)]
pub struct LpFetcher {
    ttl: Duration,
}

impl LpFetcher {
    /// Create a fetcher with a custom freshness window
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl Default for LpFetcher {
    fn default() -> Self {
        Self::new(ttl::LPS)
    }
}

/// Calls describing one vault's LP composition.
///
/// Vaults not priced through [`Oracle::Lps`] yield no calls.
///
/// # Errors
///
/// Returns an error if an LP-priced vault carries no LP pair.
pub fn lp_calls(vault: &Vault) -> Result<Vec<(&'static str, ReadCall)>, BatchError> {
    if vault.oracle != Oracle::Lps {
        return Ok(Vec::new());
    }
    let lp = vault.lp.ok_or_else(|| {
        BatchError::call_construction(&vault.id, "LP-priced vault has no LP pair")
    })?;

    let pool = lp.lp_token;
    Ok(vec![
        (fields::DECIMALS, ReadCall::uint8(pool, &IERC20::decimalsCall {})),
        (
            fields::TOTAL_SUPPLY,
            ReadCall::uint256(pool, &IERC20::totalSupplyCall {}),
        ),
        (
            fields::TOKEN0_BALANCE,
            ReadCall::uint256(lp.token0, &IERC20::balanceOfCall { account: pool }),
        ),
        (
            fields::TOKEN0_DECIMALS,
            ReadCall::uint8(lp.token0, &IERC20::decimalsCall {}),
        ),
        (
            fields::TOKEN1_BALANCE,
            ReadCall::uint256(lp.token1, &IERC20::balanceOfCall { account: pool }),
        ),
        (
            fields::TOKEN1_DECIMALS,
            ReadCall::uint8(lp.token1, &IERC20::decimalsCall {}),
        ),
    ])
}

impl BatchFetcher for LpFetcher {
    type Context = ChainContext;

    fn name(&self) -> &'static str {
        "lps"
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }

    fn build_calls(&self, ctx: &ChainContext) -> Result<CallBatch, BatchError> {
        batch_for(&ctx.catalog.vaults(), lp_calls)
    }

    fn executor(&self, ctx: &ChainContext) -> Arc<dyn MulticallExecutor> {
        Arc::clone(&ctx.executor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vaults::LpPair;
    use alloy_primitives::{address, Address};
    use alloy_sol_types::SolCall;

    const LP: LpPair = LpPair {
        lp_token: address!("1111111111111111111111111111111111111111"),
        token0: address!("2222222222222222222222222222222222222222"),
        token1: address!("3333333333333333333333333333333333333333"),
    };

    #[test]
    fn test_non_lp_vault_contributes_nothing() {
        let vault = Vault::new("v", Address::ZERO, None, Oracle::Chainlink).with_lp(LP);
        assert!(lp_calls(&vault).unwrap().is_empty());
    }

    #[test]
    fn test_lp_vault_reads_pool_reserves() {
        let vault = Vault::new("v", Address::ZERO, Some(LP.lp_token), Oracle::Lps).with_lp(LP);

        let calls = lp_calls(&vault).unwrap();

        assert_eq!(calls.len(), 6);
        let (label, token1_balance) = &calls[4];
        assert_eq!(*label, "token1_balance");
        assert_eq!(token1_balance.target(), LP.token1);
        assert_eq!(
            &token1_balance.input()[..],
            IERC20::balanceOfCall {
                account: LP.lp_token
            }
            .abi_encode()
            .as_slice()
        );
    }

    #[test]
    fn test_lp_vault_without_pair_fails() {
        let vault = Vault::new("broken", Address::ZERO, None, Oracle::Lps);

        let error = lp_calls(&vault).unwrap_err();
        assert!(matches!(
            error,
            BatchError::CallConstruction { entity, .. } if entity.as_str() == "broken"
        ));
    }
}
