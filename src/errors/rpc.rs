// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared RPC error types for blockchain provider operations.

/// Errors that can occur while talking to a blockchain provider.
///
/// Carries a short description of the operation that failed so log lines and
/// error chains point at the call site rather than at the transport.
///
/// # Examples
///
/// ```rust
/// use vaultscan::RpcError;
///
/// let error = RpcError::ProviderUrlInvalid("not a url".to_string());
/// assert!(error.to_string().contains("not a url"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The configured RPC endpoint could not be parsed as a URL.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),

    /// Failed to connect to the blockchain or execute an RPC call.
    ///
    /// Catch-all for network errors, timeouts, reverts reported by the node
    /// and provider downtime.
    #[error("Chain connection failed during {operation}")]
    ChainConnectionFailed {
        /// Description of the operation that failed
        operation: String,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RpcError {
    /// Helper to create a `ChainConnectionFailed` error from any error type.
    pub fn chain_connection_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::ChainConnectionFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }
}
