// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider factory functions

use alloy_network::AnyNetwork;
use alloy_provider::ProviderBuilder;
use alloy_rpc_client::RpcClient;
use alloy_transport::utils::guess_local_url;
use alloy_transport_http::{reqwest, Http};

use crate::errors::RpcError;

use super::config::ProviderConfig;
use super::AnyRootProvider;

/// Create an HTTP provider with the given configuration
///
/// Recommended fillers are disabled: the batching layer only issues
/// `eth_call`s, so a bare [`RootProvider`](alloy_provider::RootProvider)
/// is all it needs.
///
/// Every request is bounded by `config.timeout`; an elapsed request fails
/// like any other transport error.
///
/// # Examples
///
/// ```rust,ignore
/// use std::time::Duration;
/// use vaultscan::provider::{create_http_provider, ProviderConfig};
///
/// let provider = create_http_provider(
///     ProviderConfig::new("https://polygon-rpc.com").with_timeout(Duration::from_secs(10)),
/// )?;
/// ```
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed or the HTTP client cannot be built
pub fn create_http_provider(config: ProviderConfig) -> Result<AnyRootProvider, RpcError> {
    let url: url::Url = config
        .url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{e}")))?;

    let mut http = reqwest::Client::builder();
    if let Some(timeout) = config.timeout {
        http = http.timeout(timeout);
    }
    let http = http
        .build()
        .map_err(|e| RpcError::chain_connection_failed("build HTTP client", e))?;

    let is_local = guess_local_url(&url);
    let client = RpcClient::new(Http::with_client(http, url), is_local);

    Ok(ProviderBuilder::new()
        .disable_recommended_fillers()
        .network::<AnyNetwork>()
        .connect_client(client))
}

/// Create a WebSocket provider with the given configuration
///
/// # Errors
///
/// Returns an error if the WebSocket handshake fails
#[cfg(feature = "ws")]
pub async fn create_ws_provider(config: ProviderConfig) -> Result<AnyRootProvider, RpcError> {
    use alloy_provider::WsConnect;
    use alloy_rpc_client::ClientBuilder;

    let client = ClientBuilder::default()
        .ws(WsConnect::new(&config.url))
        .await
        .map_err(|e| RpcError::chain_connection_failed("WebSocket connect", e))?;

    Ok(ProviderBuilder::new()
        .disable_recommended_fillers()
        .network::<AnyNetwork>()
        .connect_client(client))
}

/// Convenience constructor from a URL string
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed
pub fn simple_http_provider(url: &str) -> Result<AnyRootProvider, RpcError> {
    create_http_provider(ProviderConfig::new(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::batch::ReadCall;
    use crate::errors::MulticallError;
    use crate::multicall::{Multicall3Executor, MulticallExecutor};
    use alloy_dyn_abi::DynSolType;
    use alloy_primitives::{Address, Bytes};
    use tokio::net::TcpListener;

    #[test]
    fn test_create_http_provider_invalid_url() {
        let result = create_http_provider(ProviderConfig::new("not a url"));
        assert!(matches!(result, Err(RpcError::ProviderUrlInvalid(_))));
    }

    #[test]
    fn test_create_http_provider_valid_url() {
        let result = create_http_provider(ProviderConfig::new("https://polygon-rpc.com"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_simple_http_provider() {
        assert!(simple_http_provider("http://localhost:8545").is_ok());
    }

    #[tokio::test]
    async fn test_unresponsive_endpoint_times_out() {
        // Accepts connections and never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let held = Arc::new(tokio::sync::Mutex::new(Vec::new()));
        let sockets = held.clone();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                sockets.lock().await.push(socket);
            }
        });

        let provider = create_http_provider(
            ProviderConfig::new(format!("http://{addr}"))
                .with_timeout(Duration::from_millis(200)),
        )
        .unwrap();
        let executor = Multicall3Executor::new(provider);
        let calls = [ReadCall::from_raw(
            Address::ZERO,
            Bytes::new(),
            DynSolType::Uint(256),
        )];

        let result = tokio::time::timeout(Duration::from_secs(10), executor.aggregate(&calls))
            .await
            .expect("request should be bounded by the provider timeout");

        assert!(matches!(result, Err(MulticallError::Rpc(_))));
    }
}
