// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Multicall execution.
//!
//! The batching layer only depends on the [`MulticallExecutor`] contract:
//! submit N read calls, get N decoded values back in the same order, or a
//! single error for the whole batch. [`Multicall3Executor`] fulfils it with a
//! single `eth_call` to the Multicall3 contract.
//!
//! # Performance
//!
//! For N calls across M vaults:
//! - Without aggregation: N separate `eth_call` requests
//! - With [`Multicall3Executor`]: 1 `eth_call`

mod contract;
mod executor;

pub use contract::{IMulticall3, MULTICALL3_ADDRESS};
pub use executor::Multicall3Executor;

use alloy_dyn_abi::DynSolValue;
use async_trait::async_trait;

use crate::batch::ReadCall;
use crate::errors::MulticallError;

/// Executes many read calls in one network round trip.
///
/// # Contract
///
/// - Results come back in submission order, one per call
/// - A failure fails the whole batch; implementations never return partial results
/// - An empty batch succeeds with an empty result
#[async_trait]
pub trait MulticallExecutor: Send + Sync {
    /// Execute `calls` and decode their return data
    async fn aggregate(&self, calls: &[ReadCall]) -> Result<Vec<DynSolValue>, MulticallError>;
}
