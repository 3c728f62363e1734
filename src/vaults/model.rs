// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Vault descriptions

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::batch::EntityId;

/// How a vault's want token is priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Oracle {
    /// Price feed for a single asset
    Chainlink,
    /// Priced from the composition of an LP token
    Lps,
    /// Priced from a Curve pool's virtual price
    Curve,
}

/// The two underlying tokens of an LP want token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpPair {
    /// The LP token itself (the vault's want token)
    pub lp_token: Address,
    /// First pool token
    pub token0: Address,
    /// Second pool token
    pub token1: Address,
}

/// Where a vault's share accounting lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShareLedger {
    /// The vault contract is itself the share token
    Vault,
    /// Shares are tracked by a rewards controller under a pool id
    Controller {
        /// Controller contract address
        address: Address,
        /// Pool id of this vault within the controller
        pid: u64,
    },
}

/// One yield vault as read by the fetchers.
///
/// # Example
///
/// ```rust
/// use vaultscan::vaults::{Oracle, Vault};
/// use alloy_primitives::address;
///
/// let vault = Vault::new(
///     "polygon-usdc",
///     address!("1111111111111111111111111111111111111111"),
///     Some(address!("2222222222222222222222222222222222222222")),
///     Oracle::Chainlink,
/// );
/// assert!(!vault.is_native());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    /// Stable identifier, used as the cache entity id
    pub id: EntityId,
    /// Vault contract address
    pub address: Address,
    /// Want token; `None` when the vault takes the chain's native gas token
    #[serde(default)]
    pub token: Option<Address>,
    /// Share accounting
    #[serde(default = "default_ledger")]
    pub ledger: ShareLedger,
    /// Pricing source of the want token
    pub oracle: Oracle,
    /// LP composition, required when `oracle` is [`Oracle::Lps`]
    #[serde(default)]
    pub lp: Option<LpPair>,
}

fn default_ledger() -> ShareLedger {
    ShareLedger::Vault
}

impl Vault {
    /// Create a vault that is its own share token
    pub fn new(
        id: impl Into<EntityId>,
        address: Address,
        token: Option<Address>,
        oracle: Oracle,
    ) -> Self {
        Self {
            id: id.into(),
            address,
            token,
            ledger: ShareLedger::Vault,
            oracle,
            lp: None,
        }
    }

    /// Track shares through a rewards controller
    #[must_use]
    pub fn with_controller(mut self, controller: Address, pid: u64) -> Self {
        self.ledger = ShareLedger::Controller {
            address: controller,
            pid,
        };
        self
    }

    /// Attach LP composition
    #[must_use]
    pub fn with_lp(mut self, lp: LpPair) -> Self {
        self.lp = Some(lp);
        self
    }

    /// Whether the want token is the native gas token
    pub fn is_native(&self) -> bool {
        self.token.is_none()
    }
}
