// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Vault domain model and enumeration.

pub mod abi;
mod catalog;
mod model;

pub use catalog::{StaticCatalog, VaultCatalog};
pub use model::{LpPair, Oracle, ShareLedger, Vault};
