// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Vault enumeration

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use super::Vault;
use crate::errors::CatalogError;

/// Source of the vaults a refresh iterates over.
///
/// Queried on every refresh, so implementations may change their answer over
/// time (e.g. after a new vault is listed).
pub trait VaultCatalog: Send + Sync {
    /// Vaults currently tracked on this chain
    fn vaults(&self) -> Vec<Vault>;

    /// Look up a single vault by id
    fn vault(&self, id: &str) -> Option<Vault> {
        self.vaults().into_iter().find(|v| v.id.as_str() == id)
    }
}

/// A fixed list of vaults, typically loaded from JSON at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    vaults: Vec<Vault>,
}

impl StaticCatalog {
    /// Create a catalog from a list of vaults
    ///
    /// # Errors
    ///
    /// Returns an error if two vaults share an id
    pub fn new(vaults: Vec<Vault>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = vaults.iter().find(|v| !seen.insert(v.id.clone())) {
            return Err(CatalogError::DuplicateId(duplicate.id.to_string()));
        }
        Ok(Self { vaults })
    }

    /// Parse a JSON array of vaults
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or ids are duplicated
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Read a JSON array of vaults from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Read {
                path: path.display().to_string(),
                source,
            })?;

        let catalog = Self::from_json(&json)?;
        info!(path = %path.display(), count = catalog.vaults.len(), "Loaded vault catalog");
        Ok(catalog)
    }

    /// Number of vaults
    pub fn len(&self) -> usize {
        self.vaults.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.vaults.is_empty()
    }
}

impl VaultCatalog for StaticCatalog {
    fn vaults(&self) -> Vec<Vault> {
        self.vaults.clone()
    }
}
