//! # Codec Error Types
//!
//! Decode failures are fail-closed: a [`CodecError`] aborts the caller's
//! operation — there is no fallback value and no best-effort decode.

use thiserror::Error;

use crate::sealed::SealKind;

/// Errors from confidential codec operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The sealed value is not something this codec could have produced:
    /// corrupted payload, foreign scheme, wrong kind tag, or a payload that
    /// does not decode to a value in the kind's domain.
    #[error("malformed sealed value ({kind} seal): {reason}")]
    MalformedSealedValue {
        /// The kind the caller expected to unseal.
        kind: SealKind,
        /// What failed structurally.
        reason: String,
    },

    /// Backend is not yet implemented (Phase 2 feature slots).
    #[error("not implemented: {0}")]
    NotImplemented(String),
}

impl CodecError {
    /// Construct a malformed-value error for the given expected kind.
    pub fn malformed(kind: SealKind, reason: impl Into<String>) -> Self {
        Self::MalformedSealedValue {
            kind,
            reason: reason.into(),
        }
    }
}
