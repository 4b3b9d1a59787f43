//! # Identifier Newtypes
//!
//! Domain-primitive newtypes for every entity the ledger tracks. Each
//! identifier is a distinct type — passing a [`TrancheId`] where a
//! [`CertificateId`] is expected is a compile error.
//!
//! ## Id assignment
//!
//! Entity ids and operation handles are monotonically increasing `u64`
//! values assigned by the ledger, starting at 1. The core validates ids
//! (non-zero) but never generates them.
//!
//! ## Addresses
//!
//! [`AddressId`] is a caller/account identifier in the `0x` + 40 hex-digit
//! format the identity provider yields. It validates at construction time
//! and at deserialization time — an invalid address is rejected at the
//! boundary, not silently accepted.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Helper macro for ledger-assigned `u64` identifiers. Generates the
/// newtype, a validating constructor, raw access, and Display.
macro_rules! ledger_id {
    ($(#[$doc:meta])* $ty:ident, $kind:literal) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $ty(u64);

        impl $ty {
            /// Wrap a ledger-assigned identifier. Rejects zero, which the
            /// ledger never assigns.
            pub fn new(raw: u64) -> Result<Self, ValidationError> {
                if raw == 0 {
                    return Err(ValidationError::ZeroIdentifier { kind: $kind });
                }
                Ok(Self(raw))
            }

            /// The raw identifier value.
            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

ledger_id!(
    /// Identifier of a bond tranche.
    TrancheId,
    "tranche"
);

ledger_id!(
    /// Identifier of an allocation within a tranche.
    AllocationId,
    "allocation"
);

ledger_id!(
    /// Identifier of a redeemable bond certificate.
    CertificateId,
    "certificate"
);

ledger_id!(
    /// Opaque handle to one committed ledger transition. Returned to the
    /// caller as the result of a mutating operation and usable to look up
    /// the attached audit proof.
    OperationHandle,
    "operation"
);

/// A caller/account address: `0x` followed by 40 hexadecimal digits.
///
/// Comparison and hashing are case-insensitive — the address is lowercased
/// at construction so two spellings of the same account are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AddressId(String);

impl AddressId {
    /// Validate and construct an address identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let Some(hex) = raw.strip_prefix("0x") else {
            return Err(ValidationError::InvalidAddress {
                value: raw,
                reason: "missing 0x prefix".to_string(),
            });
        };
        if hex.len() != 40 {
            return Err(ValidationError::InvalidAddress {
                value: raw.clone(),
                reason: format!("expected 40 hex digits, got {}", hex.len()),
            });
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidAddress {
                value: raw,
                reason: "non-hex characters".to_string(),
            });
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// The normalized (lowercase) string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 32-bit identity fragment: hex digits 2..10 of the address.
    ///
    /// This is the portion of the address the confidential codec seals —
    /// enough to link an investor's own records together without carrying
    /// the full account identifier into sealed storage.
    pub fn identity_fragment(&self) -> u32 {
        // Construction guarantees 40 hex digits after the prefix.
        u32::from_str_radix(&self.0[2..10], 16).unwrap_or(0)
    }
}

impl<'de> Deserialize<'de> for AddressId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for AddressId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AddressId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
