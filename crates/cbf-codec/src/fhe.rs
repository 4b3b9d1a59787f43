//! # Homomorphic Codec (Phase 2 — Feature-Gated)
//!
//! Stub for the real confidential-computation backend. This module is gated
//! behind the `fhe` Cargo feature and contains only type signatures — the
//! ciphertext scheme, key handling, and trait implementation arrive with
//! the Phase 2 integration.
//!
//! ## Phase 2 Integration Plan
//!
//! 1. Select the FHE scheme and add its crate to the workspace dependencies.
//! 2. Implement [`crate::ConfidentialCodec`] for [`HomomorphicCodec`],
//!    emitting sealed values under the `fhe-v1` scheme tag.
//! 3. Preserve the placeholder contract bit-for-bit at the trait surface:
//!    round-trip exactness, per-kind injectivity, fail-closed decode.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Scheme tag that Phase 2 homomorphic sealed values will carry.
pub const FHE_SCHEME: &str = "fhe-v1";

/// Opaque handle to homomorphic key material.
///
/// Phase 2: wraps the scheme's public/evaluation key pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FheKeyHandle {
    /// Key registry identifier.
    pub key_id: String,
}

/// The Phase 2 homomorphic codec backend.
#[derive(Debug)]
pub struct HomomorphicCodec {
    /// Key material handle resolved at construction.
    pub key: FheKeyHandle,
}

impl HomomorphicCodec {
    /// Construct the backend from a key handle.
    ///
    /// Always fails in Phase 1 — the scheme integration is not available.
    pub fn new(key: FheKeyHandle) -> Result<Self, CodecError> {
        let _ = &key;
        Err(CodecError::NotImplemented(
            "homomorphic codec available in Phase 2".into(),
        ))
    }
}
