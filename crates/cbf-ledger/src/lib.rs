//! # cbf-ledger — Ledger & Identity Collaborators
//!
//! The ledger is the sole source of truth and the serialization point for
//! all entity state: the core never holds authoritative records itself.
//! [`Ledger`] models the contract the external execution engine presents —
//! atomic conditional state transitions plus read-only queries — and
//! [`InMemoryLedger`] is the reference implementation used for embedding
//! and tests.
//!
//! ## Optimistic concurrency
//!
//! Every query returns a [`Versioned`] record. A mutating submit names the
//! version(s) the caller read; if a concurrent commit moved an entity past
//! that version, the submit fails with [`LedgerError::VersionConflict`] and
//! the caller re-runs its read-modify-write cycle. Each submit is one
//! atomic transition — either every record it touches commits, or none do.
//!
//! ## Audit journal
//!
//! Every committed transition retains its [`ProofToken`] under the returned
//! [`OperationHandle`]. The ledger verifies the token against the
//! transition's operation name before committing; a non-attesting token is
//! rejected with [`LedgerError::ProofVerificationFailed`].

pub mod identity;
pub mod memory;

pub use identity::{IdentityError, IdentityProvider, StaticIdentity};
pub use memory::InMemoryLedger;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cbf_core::{AddressId, AllocationId, CertificateId, OperationHandle, TrancheId};
use cbf_proof::ProofToken;
use cbf_state::{Allocation, Certificate, InvestorProfile, Tranche};

/// Canonical operation names journaled with each transition kind.
pub mod op {
    /// Tranche creation.
    pub const CREATE_BOND_TRANCHE: &str = "createBondTranche";
    /// Capital allocation into a tranche.
    pub const ALLOCATE_BOND: &str = "allocateBond";
    /// Certificate issuance from an allocation.
    pub const ISSUE_CERTIFICATE: &str = "issueCertificate";
    /// Certificate redemption.
    pub const REDEEM_BOND: &str = "redeemBond";
}

/// A record together with the ledger version it was read at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned<T> {
    /// Monotonic per-record version, bumped on every committed mutation.
    pub version: u64,
    /// The record itself.
    pub record: T,
}

/// One committed transition retained in the audit journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedOperation {
    /// The handle returned to the caller.
    pub handle: OperationHandle,
    /// The canonical operation name (see [`op`]).
    pub operation: String,
    /// The audit proof attached by the orchestrator.
    pub proof: ProofToken,
    /// When the ledger committed the transition.
    pub committed_at: DateTime<Utc>,
}

/// Errors the ledger reports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No tranche with this id.
    #[error("tranche {0} not found")]
    TrancheNotFound(TrancheId),

    /// No allocation with this id.
    #[error("allocation {0} not found")]
    AllocationNotFound(AllocationId),

    /// No certificate with this id.
    #[error("certificate {0} not found")]
    CertificateNotFound(CertificateId),

    /// No profile for this investor.
    #[error("no investor profile for {0}")]
    ProfileNotFound(AddressId),

    /// No journaled operation under this handle.
    #[error("operation {0} not found")]
    OperationNotFound(OperationHandle),

    /// A concurrent commit moved the entity past the version the caller
    /// read. Retryable: re-run the read-modify-write cycle.
    #[error("conflicting concurrent update on {entity} (expected version {expected}, found {found})")]
    VersionConflict {
        /// Which entity kind conflicted.
        entity: &'static str,
        /// The version the caller read.
        expected: u64,
        /// The version the ledger holds.
        found: u64,
    },

    /// The attached proof token does not attest to this transition's
    /// operation. The transition is rejected before any mutation.
    #[error("proof does not attest to operation {operation:?}")]
    ProofVerificationFailed {
        /// The operation the ledger expected the token to bind.
        operation: String,
    },

    /// The ledger cannot serve requests. Not retryable by the core.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// The atomic state-transition and query surface of the external ledger.
///
/// Implementations must be safe to call concurrently from many callers and
/// must evaluate each submit's version preconditions and mutations as one
/// atomic step.
pub trait Ledger: Send + Sync {
    /// Commit a new tranche. The ledger assigns the id.
    fn submit_tranche(
        &self,
        tranche: Tranche,
        proof: ProofToken,
    ) -> Result<(TrancheId, OperationHandle), LedgerError>;

    /// Commit one allocation: the updated tranche (conditional on the
    /// version the caller read), the new allocation record, and the
    /// upserted investor profile (conditional on its read version, `None`
    /// when the profile did not exist). One atomic transition.
    #[allow(clippy::too_many_arguments)]
    fn submit_allocation(
        &self,
        tranche_id: TrancheId,
        expected_tranche_version: u64,
        tranche: Tranche,
        allocation: Allocation,
        expected_profile_version: Option<u64>,
        profile: InvestorProfile,
        proof: ProofToken,
    ) -> Result<(AllocationId, OperationHandle), LedgerError>;

    /// Commit a certificate issued from `allocation_id`, linking it to the
    /// allocation (conditional on the allocation version the caller read).
    /// The ledger assigns the certificate id and records the back-link.
    fn submit_certificate(
        &self,
        allocation_id: AllocationId,
        expected_allocation_version: u64,
        certificate: Certificate,
        proof: ProofToken,
    ) -> Result<(CertificateId, OperationHandle), LedgerError>;

    /// Commit a redemption: replace the certificate with its terminally
    /// redeemed record, conditional on the version the caller read.
    fn submit_redemption(
        &self,
        certificate_id: CertificateId,
        expected_certificate_version: u64,
        certificate: Certificate,
        proof: ProofToken,
    ) -> Result<OperationHandle, LedgerError>;

    /// Read a tranche.
    fn tranche(&self, id: TrancheId) -> Result<Versioned<Tranche>, LedgerError>;

    /// Read an allocation.
    fn allocation(&self, id: AllocationId) -> Result<Versioned<Allocation>, LedgerError>;

    /// Read a certificate.
    fn certificate(&self, id: CertificateId) -> Result<Versioned<Certificate>, LedgerError>;

    /// Read an investor profile.
    fn investor_profile(
        &self,
        address: &AddressId,
    ) -> Result<Versioned<InvestorProfile>, LedgerError>;

    /// Read a journaled operation by its handle.
    fn operation(&self, handle: OperationHandle) -> Result<CommittedOperation, LedgerError>;
}

// Lets several orchestrators share one ledger by reference.
impl<L: Ledger + ?Sized> Ledger for &L {
    fn submit_tranche(
        &self,
        tranche: Tranche,
        proof: ProofToken,
    ) -> Result<(TrancheId, OperationHandle), LedgerError> {
        (**self).submit_tranche(tranche, proof)
    }

    fn submit_allocation(
        &self,
        tranche_id: TrancheId,
        expected_tranche_version: u64,
        tranche: Tranche,
        allocation: Allocation,
        expected_profile_version: Option<u64>,
        profile: InvestorProfile,
        proof: ProofToken,
    ) -> Result<(AllocationId, OperationHandle), LedgerError> {
        (**self).submit_allocation(
            tranche_id,
            expected_tranche_version,
            tranche,
            allocation,
            expected_profile_version,
            profile,
            proof,
        )
    }

    fn submit_certificate(
        &self,
        allocation_id: AllocationId,
        expected_allocation_version: u64,
        certificate: Certificate,
        proof: ProofToken,
    ) -> Result<(CertificateId, OperationHandle), LedgerError> {
        (**self).submit_certificate(allocation_id, expected_allocation_version, certificate, proof)
    }

    fn submit_redemption(
        &self,
        certificate_id: CertificateId,
        expected_certificate_version: u64,
        certificate: Certificate,
        proof: ProofToken,
    ) -> Result<OperationHandle, LedgerError> {
        (**self).submit_redemption(certificate_id, expected_certificate_version, certificate, proof)
    }

    fn tranche(&self, id: TrancheId) -> Result<Versioned<Tranche>, LedgerError> {
        (**self).tranche(id)
    }

    fn allocation(&self, id: AllocationId) -> Result<Versioned<Allocation>, LedgerError> {
        (**self).allocation(id)
    }

    fn certificate(&self, id: CertificateId) -> Result<Versioned<Certificate>, LedgerError> {
        (**self).certificate(id)
    }

    fn investor_profile(
        &self,
        address: &AddressId,
    ) -> Result<Versioned<InvestorProfile>, LedgerError> {
        (**self).investor_profile(address)
    }

    fn operation(&self, handle: OperationHandle) -> Result<CommittedOperation, LedgerError> {
        (**self).operation(handle)
    }
}
