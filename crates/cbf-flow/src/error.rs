//! # Flow Error Type
//!
//! The orchestrator surfaces the originating error kind unchanged: every
//! component error wraps transparently, and the only kind minted here is
//! [`FlowError::ConcurrentModification`], produced when the bounded retry
//! budget for ledger version conflicts is exhausted.

use thiserror::Error;

use cbf_codec::CodecError;
use cbf_ledger::{IdentityError, LedgerError};
use cbf_proof::ProofError;
use cbf_state::StateError;

/// Errors surfaced by the public operation surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// A lifecycle precondition failed (range, bounds, capacity,
    /// state-eligibility, ownership). Detected before any ledger mutation.
    #[error(transparent)]
    State(#[from] StateError),

    /// A sealed field failed to decode or validate.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Proof creation failed.
    #[error(transparent)]
    Proof(#[from] ProofError),

    /// The ledger rejected the transition or the entity does not exist.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The caller could not be resolved.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Version conflicts persisted through every retry of the
    /// read-modify-write cycle.
    #[error("conflicting concurrent updates persisted through {attempts} attempts")]
    ConcurrentModification {
        /// How many full cycles were attempted.
        attempts: u32,
    },
}
