//! Configuration for vaultscan operations
//!
//! Controls how long each batched dataset stays fresh and which Multicall3
//! deployment batches are sent to.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use vaultscan::VaultscanConfig;
//!
//! let config = VaultscanConfig::default();
//! assert_eq!(config.wallet_ttl, std::time::Duration::from_secs(2));
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use vaultscan::VaultscanConfigBuilder;
//! use std::time::Duration;
//!
//! let config = VaultscanConfigBuilder::new()
//!     .pool_ttl(Duration::from_secs(30))
//!     .lp_ttl(Duration::from_secs(300))
//!     .build();
//! ```

use std::time::Duration;

use alloy_primitives::Address;

use crate::multicall::MULTICALL3_ADDRESS;

pub mod constants;

/// Configuration for vaultscan operations
///
/// Use [`VaultscanConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultscanConfig {
    /// Freshness window of vault composition data
    /// Default: 10 seconds
    pub pool_ttl: Duration,

    /// Freshness window of account-scoped data
    /// Default: 2 seconds
    pub wallet_ttl: Duration,

    /// Freshness window of LP composition data
    /// Default: 60 seconds
    pub lp_ttl: Duration,

    /// Multicall3 contract used for every batch
    /// Default: the canonical deployment
    pub multicall_address: Address,
}

impl Default for VaultscanConfig {
    fn default() -> Self {
        Self {
            pool_ttl: constants::ttl::POOL,
            wallet_ttl: constants::ttl::WALLET,
            lp_ttl: constants::ttl::LPS,
            multicall_address: MULTICALL3_ADDRESS,
        }
    }
}

impl VaultscanConfig {
    /// Config with every TTL set to zero, so each `perform` refreshes
    ///
    /// Coalescing still applies to concurrent callers.
    pub fn uncached() -> Self {
        Self {
            pool_ttl: Duration::ZERO,
            wallet_ttl: Duration::ZERO,
            lp_ttl: Duration::ZERO,
            multicall_address: MULTICALL3_ADDRESS,
        }
    }
}

/// Builder for [`VaultscanConfig`]
///
/// # Example
///
/// ```rust
/// use vaultscan::VaultscanConfigBuilder;
/// use std::time::Duration;
///
/// let config = VaultscanConfigBuilder::new()
///     .wallet_ttl(Duration::from_secs(5))
///     .build();
/// assert_eq!(config.wallet_ttl, Duration::from_secs(5));
/// ```
#[derive(Debug, Default)]
pub struct VaultscanConfigBuilder {
    config: VaultscanConfig,
}

impl VaultscanConfigBuilder {
    /// Create a new builder starting from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pool data TTL
    pub fn pool_ttl(mut self, ttl: Duration) -> Self {
        self.config.pool_ttl = ttl;
        self
    }

    /// Set the wallet data TTL
    pub fn wallet_ttl(mut self, ttl: Duration) -> Self {
        self.config.wallet_ttl = ttl;
        self
    }

    /// Set the LP data TTL
    pub fn lp_ttl(mut self, ttl: Duration) -> Self {
        self.config.lp_ttl = ttl;
        self
    }

    /// Use a Multicall3 deployed at a non-canonical address
    pub fn multicall_address(mut self, address: Address) -> Self {
        self.config.multicall_address = address;
        self
    }

    /// Build the configuration
    pub fn build(self) -> VaultscanConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_defaults() {
        let config = VaultscanConfig::default();
        assert_eq!(config.pool_ttl, Duration::from_secs(10));
        assert_eq!(config.wallet_ttl, Duration::from_secs(2));
        assert_eq!(config.lp_ttl, Duration::from_secs(60));
        assert_eq!(config.multicall_address, MULTICALL3_ADDRESS);
    }

    #[test]
    fn test_builder_overrides_only_what_is_set() {
        let custom = address!("0000000000000000000000000000000000000042");
        let config = VaultscanConfigBuilder::new()
            .lp_ttl(Duration::from_secs(300))
            .multicall_address(custom)
            .build();

        assert_eq!(config.lp_ttl, Duration::from_secs(300));
        assert_eq!(config.multicall_address, custom);
        assert_eq!(config.pool_ttl, constants::ttl::POOL);
        assert_eq!(config.wallet_ttl, constants::ttl::WALLET);
    }

    #[test]
    fn test_uncached() {
        let config = VaultscanConfig::uncached();
        assert!(config.pool_ttl.is_zero());
        assert!(config.wallet_ttl.is_zero());
        assert!(config.lp_ttl.is_zero());
    }
}
