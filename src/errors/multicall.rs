// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for multicall execution.

use super::RpcError;

/// Errors raised while executing a batch of read calls in one round trip.
///
/// Every variant fails the whole batch: executors never hand back partial
/// results.
#[derive(Debug, thiserror::Error)]
pub enum MulticallError {
    /// The provider call itself failed (transport error or the aggregate
    /// call reverted because one of the inner calls reverted).
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// The aggregate response could not be decoded.
    #[error("Failed to decode multicall response: {details}")]
    ResponseDecode {
        /// Details about the decode failure
        details: String,
    },

    /// The return data of one inner call did not match its declared type.
    #[error("Failed to decode result {index} (target {target}): {details}")]
    Decode {
        /// Position of the call in the submitted batch
        index: usize,
        /// Contract the call was sent to
        target: alloy_primitives::Address,
        /// Details about the decode failure
        details: String,
    },

    /// The executor returned a different number of results than calls submitted.
    #[error("Multicall returned {actual} results for {expected} calls")]
    ResultCountMismatch {
        /// Number of calls submitted
        expected: usize,
        /// Number of results received
        actual: usize,
    },
}

impl MulticallError {
    /// Create a `ResponseDecode` error with details.
    pub fn response_decode(details: impl Into<String>) -> Self {
        MulticallError::ResponseDecode {
            details: details.into(),
        }
    }

    /// Create a `Decode` error for the call at `index`.
    pub fn decode(
        index: usize,
        target: alloy_primitives::Address,
        details: impl std::fmt::Display,
    ) -> Self {
        MulticallError::Decode {
            index,
            target,
            details: details.to_string(),
        }
    }
}
