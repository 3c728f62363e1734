// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Contract interfaces read by the fetchers

use alloy_sol_types::sol;

sol! {
    /// ERC-20 view functions
    interface IERC20 {
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
    }

    /// Standalone vault: an ERC-20 share token wrapping a want token
    interface IVault {
        function decimals() external view returns (uint8);
        function balance() external view returns (uint256);
        function getPricePerFullShare() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
    }

    /// Rewards controller holding many vault pools indexed by pool id
    interface IController {
        function balanceOf(uint256 pid, address user) external view returns (uint256);
        function pendingPiToken(uint256 pid, address user) external view returns (uint256);
        function paidRewards(uint256 pid) external view returns (uint256);
    }
}
