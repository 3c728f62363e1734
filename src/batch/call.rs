// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Call descriptors: labeled, unexecuted read calls scoped to one entity.

use std::borrow::Borrow;
use std::fmt;

use alloy_dyn_abi::DynSolType;
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;
use serde::{Deserialize, Serialize};

/// Opaque identifier of a tracked entity (a vault or pool instance).
///
/// Stable across refreshes and used as the outer key of every cache store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create a new entity id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Name of one datum within an entity's record, e.g. `"balance"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldLabel(String);

impl FieldLabel {
    /// Create a new field label
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Borrow the label as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_newtype_impls {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&$ty> for $ty {
            fn from(value: &$ty) -> Self {
                value.clone()
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_newtype_impls!(EntityId);
string_newtype_impls!(FieldLabel);

/// An unexecuted read call: target contract, ABI-encoded calldata and the
/// dynamic type of its return data.
///
/// Building a `ReadCall` never touches the network; it only encodes calldata.
///
/// # Example
///
/// ```rust,ignore
/// use alloy_dyn_abi::DynSolType;
/// use vaultscan::batch::ReadCall;
///
/// let call = ReadCall::new(token, &IERC20::decimalsCall {}, DynSolType::Uint(8));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReadCall {
    target: Address,
    input: Bytes,
    output: DynSolType,
}

impl ReadCall {
    /// Encode `call` against `target`; its return data decodes as `output`.
    pub fn new<C: SolCall>(target: Address, call: &C, output: DynSolType) -> Self {
        Self::from_raw(target, call.abi_encode(), output)
    }

    /// Shorthand for calls returning a single `uint256`.
    pub fn uint256<C: SolCall>(target: Address, call: &C) -> Self {
        Self::new(target, call, DynSolType::Uint(256))
    }

    /// Shorthand for calls returning a single `uint8` (ERC-20 `decimals`).
    pub fn uint8<C: SolCall>(target: Address, call: &C) -> Self {
        Self::new(target, call, DynSolType::Uint(8))
    }

    /// Build a call from pre-encoded calldata.
    pub fn from_raw(target: Address, input: impl Into<Bytes>, output: DynSolType) -> Self {
        Self {
            target,
            input: input.into(),
            output,
        }
    }

    /// Contract the call is sent to
    pub fn target(&self) -> Address {
        self.target
    }

    /// ABI-encoded calldata
    pub fn input(&self) -> &Bytes {
        &self.input
    }

    /// Declared return type
    pub fn output(&self) -> &DynSolType {
        &self.output
    }
}

/// A read call tagged with the entity and field it fills in.
#[derive(Debug, Clone, PartialEq)]
pub struct CallDescriptor {
    /// Entity the result belongs to
    pub entity: EntityId,
    /// Field the result is stored under
    pub label: FieldLabel,
    /// The call to execute
    pub call: ReadCall,
}

impl CallDescriptor {
    /// Create a new descriptor
    pub fn new(entity: impl Into<EntityId>, label: impl Into<FieldLabel>, call: ReadCall) -> Self {
        Self {
            entity: entity.into(),
            label: label.into(),
            call,
        }
    }
}
