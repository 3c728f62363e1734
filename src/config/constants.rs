//! Well-known addresses and default timings
//!
//! Centralizes the constants used to configure vaultscan so defaults are
//! discoverable in one place.

use std::time::Duration;

/// Default refresh intervals per dataset
pub mod ttl {
    use super::Duration;

    /// Vault composition (decimals, price per share, TVL)
    ///
    /// Changes only when deposits or harvests happen.
    pub const POOL: Duration = Duration::from_secs(10);

    /// Account-scoped balances and allowances
    ///
    /// Short so the UI reflects a user's own transactions quickly.
    pub const WALLET: Duration = Duration::from_secs(2);

    /// LP token composition used for LP pricing
    pub const LPS: Duration = Duration::from_secs(60);
}

/// Default upper bound on a single RPC request
///
/// A refresh holds every coalesced caller of its key, so a request must not
/// hang indefinitely.
pub const RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Native-asset reserve kept back when depositing the full gas-token balance
///
/// 0.025 of an 18-decimal gas token.
pub const NATIVE_DEPOSIT_RESERVE_WEI: u128 = 25_000_000_000_000_000;
