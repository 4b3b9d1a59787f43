//! # Shared Validation Errors
//!
//! Structured validation errors for the foundational types. Domain-level
//! lifecycle errors live in `cbf-state`; this hierarchy covers only the
//! construction-time checks of `cbf-core` primitives.

use thiserror::Error;

/// Errors from validating foundational type constructions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Address does not match the required `0x` + 40 hex-digit format.
    #[error("invalid address {value:?}: {reason}")]
    InvalidAddress {
        /// The rejected input.
        value: String,
        /// Why the input was rejected.
        reason: String,
    },

    /// A rate exceeds the representable fixed-point range.
    #[error("rate {bps} bps exceeds maximum of {max} bps")]
    RateOutOfRange {
        /// The rejected basis-point value.
        bps: u32,
        /// The maximum permitted basis-point value.
        max: u32,
    },

    /// An entity identifier was zero. Ledger-assigned ids start at 1, so a
    /// zero id can only come from an uninitialized or corrupted record.
    #[error("{kind} identifier must be non-zero")]
    ZeroIdentifier {
        /// The identifier kind, e.g. "tranche".
        kind: &'static str,
    },

    /// Data contains a floating-point number, which cannot be canonicalized.
    #[error("floating-point value is not canonicalizable: {context}")]
    NonCanonicalFloat {
        /// Where the float was found.
        context: String,
    },

    /// Data could not be serialized to a JSON value.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
