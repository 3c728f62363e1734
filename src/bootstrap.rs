// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Entry point of the `vaultscan` binary.
//!
//! Reads its configuration from the environment (a `.env` file is honoured):
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `RPC_URL` | yes | |
//! | `CHAIN_ID` | no | `137` |
//! | `VAULTS_FILE` | no | `vaults.json` |
//! | `ACCOUNT` | no | none, wallet data is skipped |
//! | `RPC_TIMEOUT_SECS` | no | `30` |
//!
//! and prints one JSON report covering every vault in the catalog.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use alloy_chains::Chain;
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::Address;
use anyhow::Context;
use dotenvy::dotenv;
use serde::Serialize;
use tracing::info;

use crate::batch::EntityRecord;
use crate::config::constants::RPC_TIMEOUT;
use crate::fetchers::ChainContext;
use crate::multicall::Multicall3Executor;
use crate::provider::{create_http_provider, ProviderConfig};
use crate::reader::{Registries, VaultReader};
use crate::vaults::{StaticCatalog, Vault, VaultCatalog};
use crate::VaultscanConfig;

/// Snapshot of one vault as printed by the binary.
#[derive(Debug, Serialize)]
pub struct VaultReport {
    /// Vault id
    pub id: String,
    /// Vault address
    pub address: Address,
    /// Composition fields
    pub pool: BTreeMap<String, String>,
    /// LP composition fields, for LP-priced vaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lp: Option<BTreeMap<String, String>>,
    /// Position fields of `ACCOUNT`
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub wallet: BTreeMap<String, String>,
}

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();

    let rpc_url = dotenvy::var("RPC_URL").context("RPC_URL must be set")?;
    let chain_id: u64 = dotenvy::var("CHAIN_ID")
        .unwrap_or_else(|_| "137".to_string())
        .parse()
        .context("CHAIN_ID must be a number")?;
    let vaults_file = dotenvy::var("VAULTS_FILE").unwrap_or_else(|_| "vaults.json".to_string());
    let account = dotenvy::var("ACCOUNT")
        .ok()
        .map(|a| a.parse::<Address>())
        .transpose()
        .context("ACCOUNT must be an address")?;
    let rpc_timeout = dotenvy::var("RPC_TIMEOUT_SECS")
        .ok()
        .map(|secs| secs.parse::<u64>().map(Duration::from_secs))
        .transpose()
        .context("RPC_TIMEOUT_SECS must be a number of seconds")?
        .unwrap_or(RPC_TIMEOUT);

    let config = VaultscanConfig::default();
    let provider = create_http_provider(ProviderConfig::new(rpc_url).with_timeout(rpc_timeout))?;
    let executor =
        Arc::new(Multicall3Executor::new(provider).with_address(config.multicall_address));
    let catalog = Arc::new(StaticCatalog::from_path(&vaults_file).await?);

    info!(
        chain = %Chain::from_id(chain_id),
        vaults = catalog.len(),
        account = ?account,
        "Reading vaults"
    );

    let chain = ChainContext::new(chain_id, executor, catalog.clone())
        .with_multicall_address(config.multicall_address);
    let reader = VaultReader::new(chain, account, Arc::new(Registries::new(config)));

    let mut reports = Vec::new();
    for vault in catalog.vaults() {
        reports.push(report(&reader, &vault).await?);
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

async fn report(reader: &VaultReader, vault: &Vault) -> anyhow::Result<VaultReport> {
    let id = vault.id.as_str();

    let pool = reader.pool_data(id).await?.unwrap_or_default();
    let lp = reader.lp_data(id).await?;
    let wallet = reader.wallet_data(id).await?;

    Ok(VaultReport {
        id: id.to_string(),
        address: vault.address,
        pool: format_record(&pool),
        lp: lp.as_ref().map(format_record),
        wallet: format_record(&wallet),
    })
}

/// Render a record as label → display string, ordered by label
pub fn format_record(record: &EntityRecord) -> BTreeMap<String, String> {
    record
        .iter()
        .map(|(label, value)| (label.to_string(), format_value(value)))
        .collect()
}

/// Render a decoded value for display
pub fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::Address(a) => a.to_checksum(None),
        DynSolValue::Bytes(b) => alloy_primitives::hex::encode_prefixed(b),
        DynSolValue::String(s) => s.clone(),
        other => format!("{other:?}"),
    }
}
