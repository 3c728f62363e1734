// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Multicall3 bindings.
//!
//! Multicall3 is deployed at the same address on virtually every EVM chain:
//! `0xcA11bde05977b3631167028862bE2a173976CA11`.

use alloy_primitives::{address, Address};
use alloy_sol_types::sol;

/// Canonical Multicall3 deployment address
pub const MULTICALL3_ADDRESS: Address = address!("ca11bde05977b3631167028862be2a173976ca11");

sol! {
    /// Subset of the Multicall3 interface used for batched reads
    interface IMulticall3 {
        struct Call {
            address target;
            bytes callData;
        }

        /// Executes every call, reverting as a whole if any call reverts
        function aggregate(Call[] calldata calls)
            external
            payable
            returns (uint256 blockNumber, bytes[] memory returnData);

        /// Native balance of `addr`, callable inside a batch
        function getEthBalance(address addr) external view returns (uint256 balance);
    }
}
