//! # cbf-proof — Proof Engine (Phase 1)
//!
//! Produces [`ProofToken`]s binding an operation name and a by-value
//! snapshot of its input data to a verifiable, tamper-evident digest.
//! Every state-mutating ledger transition attaches one token as an audit
//! artifact, so that when a real zero-knowledge backend is substituted,
//! auditors can verify an operation ran on claimed inputs without learning
//! the sealed values themselves.
//!
//! ## How It Works
//!
//! - `create()` canonicalizes `{operation, data, created_at}` and stores
//!   both the canonical payload (hex) and its SHA-256 digest.
//! - `verify()` recomputes the digest from the payload, re-canonicalizes to
//!   rule out payload mangling, and compares the bound operation name.
//!
//! ## Security Warning
//!
//! **NOT ZERO-KNOWLEDGE.** The Phase 1 token is transparent — anyone can
//! read the payload. It fixes the contract shape (create/verify, bind to
//! operation, fail closed) that the real backend must preserve bit-for-bit.
//!
//! ## Fail-Closed Verification
//!
//! `verify()` returns a plain `bool` and never errors: a token that does
//! not parse, whose digest does not recompute, or whose operation differs
//! from the expected one is simply `false`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use cbf_core::{CanonicalBytes, ContentDigest, Sha256Accumulator};

/// Errors from proof creation. Verification never errors — it fails closed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// The input data could not be canonicalized (e.g. contains floats).
    #[error("proof generation failed: {0}")]
    GenerationFailed(String),
}

/// The payload a proof token binds: operation name, input snapshot, and
/// creation time. Serialized canonically before hashing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ProofPayload {
    operation: String,
    data: Value,
    created_at: DateTime<Utc>,
}

/// A tamper-evident audit token for one operation invocation.
///
/// Never reused across operations: the orchestrator creates a fresh token
/// per ledger transition and the ledger journals it with the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofToken {
    /// Hex-encoded canonical payload bytes.
    pub payload_hex: String,
    /// Hex-encoded SHA-256 digest of the payload bytes.
    pub digest_hex: String,
}

impl ProofToken {
    /// The operation name this token was created for, if the token parses.
    pub fn operation(&self) -> Option<String> {
        self.parse_payload().map(|p| p.operation)
    }

    /// The creation timestamp bound into the token, if the token parses.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.parse_payload().map(|p| p.created_at)
    }

    /// The input-data snapshot bound into the token, if the token parses.
    pub fn data(&self) -> Option<Value> {
        self.parse_payload().map(|p| p.data)
    }

    fn parse_payload(&self) -> Option<ProofPayload> {
        let bytes = decode_hex(&self.payload_hex)?;
        serde_json::from_slice(&bytes).ok()
    }
}

/// The Phase 1 proof engine. Stateless and pure; safe to share freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProofEngine;

impl ProofEngine {
    /// Create a proof token bound to `operation` and a snapshot of `data`,
    /// stamped with the current time.
    ///
    /// `data` is taken by value: later mutation of whatever the caller
    /// built it from cannot affect the token.
    pub fn create(&self, operation: &str, data: Value) -> Result<ProofToken, ProofError> {
        self.create_at(operation, data, Utc::now())
    }

    /// Create a proof token with an explicit creation time. Deterministic
    /// for fixed inputs — the timestamp is the only varying component.
    pub fn create_at(
        &self,
        operation: &str,
        data: Value,
        now: DateTime<Utc>,
    ) -> Result<ProofToken, ProofError> {
        let payload = ProofPayload {
            operation: operation.to_string(),
            data,
            created_at: now,
        };
        let canonical = CanonicalBytes::new(&payload)
            .map_err(|e| ProofError::GenerationFailed(e.to_string()))?;
        let digest = digest_of(canonical.as_bytes());
        Ok(ProofToken {
            payload_hex: encode_hex(canonical.as_bytes()),
            digest_hex: digest.to_hex(),
        })
    }

    /// Verify that `token` attests to `expected_operation`.
    ///
    /// True iff the payload decodes, its digest recomputes to the stored
    /// digest, the payload re-canonicalizes to the same bytes, and the
    /// bound operation equals `expected_operation`. Any malformation is
    /// `false` — this function never panics and never errors.
    pub fn verify(&self, token: &ProofToken, expected_operation: &str) -> bool {
        let Some(bytes) = decode_hex(&token.payload_hex) else {
            return false;
        };
        let Some(stored_digest) = ContentDigest::from_hex(&token.digest_hex) else {
            return false;
        };
        if digest_of(&bytes) != stored_digest {
            return false;
        }
        let Ok(payload) = serde_json::from_slice::<ProofPayload>(&bytes) else {
            return false;
        };
        // The payload must be in canonical form; a re-encoded equivalent
        // with different byte layout is not a token this engine produced.
        match CanonicalBytes::new(&payload) {
            Ok(canonical) if canonical.as_bytes() == bytes.as_slice() => {}
            _ => return false,
        }
        payload.operation == expected_operation
    }
}

fn digest_of(bytes: &[u8]) -> ContentDigest {
    let mut acc = Sha256Accumulator::new();
    acc.update(bytes);
    acc.finalize()
}

fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}
