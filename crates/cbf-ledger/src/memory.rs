//! # In-Memory Reference Ledger
//!
//! A [`Ledger`] backed by `parking_lot::RwLock`-guarded maps. One lock over
//! the whole entity set makes every submit a genuinely atomic multi-record
//! transition, which is the consistency guarantee the trait promises.
//!
//! Ids and operation handles are monotonically increasing, starting at 1.
//! Committed transitions are journaled append-only with their proof tokens.
//! This implementation is a reference collaborator for embedding and tests,
//! not a durable store.

use std::collections::BTreeMap;

use chrono::Utc;
use parking_lot::RwLock;

use cbf_core::{AddressId, AllocationId, CertificateId, OperationHandle, TrancheId};
use cbf_proof::{ProofEngine, ProofToken};
use cbf_state::{Allocation, Certificate, InvestorProfile, Tranche};

use crate::{op, CommittedOperation, Ledger, LedgerError, Versioned};

#[derive(Default)]
struct LedgerInner {
    tranches: BTreeMap<u64, Versioned<Tranche>>,
    allocations: BTreeMap<u64, Versioned<Allocation>>,
    certificates: BTreeMap<u64, Versioned<Certificate>>,
    profiles: BTreeMap<AddressId, Versioned<InvestorProfile>>,
    journal: BTreeMap<u64, CommittedOperation>,
    next_tranche_id: u64,
    next_allocation_id: u64,
    next_certificate_id: u64,
    next_handle: u64,
}

impl LedgerInner {
    fn journal_commit(
        &mut self,
        operation: &str,
        proof: ProofToken,
    ) -> Result<OperationHandle, LedgerError> {
        self.next_handle += 1;
        let handle = OperationHandle::new(self.next_handle)
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;
        self.journal.insert(
            handle.as_u64(),
            CommittedOperation {
                handle,
                operation: operation.to_string(),
                proof,
                committed_at: Utc::now(),
            },
        );
        Ok(handle)
    }
}

/// The reference in-memory ledger.
#[derive(Default)]
pub struct InMemoryLedger {
    inner: RwLock<LedgerInner>,
    engine: ProofEngine,
}

impl InMemoryLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of journaled transitions.
    pub fn journal_len(&self) -> usize {
        self.inner.read().journal.len()
    }

    fn check_proof(&self, proof: &ProofToken, operation: &str) -> Result<(), LedgerError> {
        if self.engine.verify(proof, operation) {
            Ok(())
        } else {
            Err(LedgerError::ProofVerificationFailed {
                operation: operation.to_string(),
            })
        }
    }
}

impl Ledger for InMemoryLedger {
    fn submit_tranche(
        &self,
        tranche: Tranche,
        proof: ProofToken,
    ) -> Result<(TrancheId, OperationHandle), LedgerError> {
        self.check_proof(&proof, op::CREATE_BOND_TRANCHE)?;
        let mut inner = self.inner.write();
        inner.next_tranche_id += 1;
        let raw = inner.next_tranche_id;
        let id = TrancheId::new(raw).map_err(|e| LedgerError::Unavailable(e.to_string()))?;
        inner.tranches.insert(
            raw,
            Versioned {
                version: 1,
                record: tranche,
            },
        );
        let handle = inner.journal_commit(op::CREATE_BOND_TRANCHE, proof)?;
        Ok((id, handle))
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
        self.check_proof(&proof, op::ALLOCATE_BOND)?;
        let mut inner = self.inner.write();

        let stored_tranche = inner
            .tranches
            .get(&tranche_id.as_u64())
            .ok_or(LedgerError::TrancheNotFound(tranche_id))?;
        if stored_tranche.version != expected_tranche_version {
            return Err(LedgerError::VersionConflict {
                entity: "tranche",
                expected: expected_tranche_version,
                found: stored_tranche.version,
            });
        }

        let profile_key = profile.address.clone();
        let stored_profile_version = inner.profiles.get(&profile_key).map(|p| p.version);
        if stored_profile_version != expected_profile_version {
            return Err(LedgerError::VersionConflict {
                entity: "investor_profile",
                expected: expected_profile_version.unwrap_or(0),
                found: stored_profile_version.unwrap_or(0),
            });
        }

        // All preconditions hold; commit every record in one step.
        inner.tranches.insert(
            tranche_id.as_u64(),
            Versioned {
                version: expected_tranche_version + 1,
                record: tranche,
            },
        );
        inner.next_allocation_id += 1;
        let raw = inner.next_allocation_id;
        let allocation_id =
            AllocationId::new(raw).map_err(|e| LedgerError::Unavailable(e.to_string()))?;
        inner.allocations.insert(
            raw,
            Versioned {
                version: 1,
                record: allocation,
            },
        );
        inner.profiles.insert(
            profile_key,
            Versioned {
                version: expected_profile_version.unwrap_or(0) + 1,
                record: profile,
            },
        );
        let handle = inner.journal_commit(op::ALLOCATE_BOND, proof)?;
        Ok((allocation_id, handle))
    }

    fn submit_certificate(
        &self,
        allocation_id: AllocationId,
        expected_allocation_version: u64,
        certificate: Certificate,
        proof: ProofToken,
    ) -> Result<(CertificateId, OperationHandle), LedgerError> {
        self.check_proof(&proof, op::ISSUE_CERTIFICATE)?;
        let mut inner = self.inner.write();

        let stored = inner
            .allocations
            .get(&allocation_id.as_u64())
            .cloned()
            .ok_or(LedgerError::AllocationNotFound(allocation_id))?;
        if stored.version != expected_allocation_version {
            return Err(LedgerError::VersionConflict {
                entity: "allocation",
                expected: expected_allocation_version,
                found: stored.version,
            });
        }

        inner.next_certificate_id += 1;
        let raw = inner.next_certificate_id;
        let certificate_id =
            CertificateId::new(raw).map_err(|e| LedgerError::Unavailable(e.to_string()))?;

        // Certification bumps the allocation version, so a version match
        // guarantees the link is still free; a failure here can only mean
        // the record was moved under us despite the check.
        let linked = stored
            .record
            .certify(certificate_id)
            .map_err(|_| LedgerError::VersionConflict {
                entity: "allocation",
                expected: expected_allocation_version,
                found: stored.version,
            })?;

        inner.allocations.insert(
            allocation_id.as_u64(),
            Versioned {
                version: expected_allocation_version + 1,
                record: linked,
            },
        );
        inner.certificates.insert(
            raw,
            Versioned {
                version: 1,
                record: certificate,
            },
        );
        let handle = inner.journal_commit(op::ISSUE_CERTIFICATE, proof)?;
        Ok((certificate_id, handle))
    }

    fn submit_redemption(
        &self,
        certificate_id: CertificateId,
        expected_certificate_version: u64,
        certificate: Certificate,
        proof: ProofToken,
    ) -> Result<OperationHandle, LedgerError> {
        self.check_proof(&proof, op::REDEEM_BOND)?;
        let mut inner = self.inner.write();

        let stored = inner
            .certificates
            .get(&certificate_id.as_u64())
            .ok_or(LedgerError::CertificateNotFound(certificate_id))?;
        if stored.version != expected_certificate_version {
            return Err(LedgerError::VersionConflict {
                entity: "certificate",
                expected: expected_certificate_version,
                found: stored.version,
            });
        }

        inner.certificates.insert(
            certificate_id.as_u64(),
            Versioned {
                version: expected_certificate_version + 1,
                record: certificate,
            },
        );
        let handle = inner.journal_commit(op::REDEEM_BOND, proof)?;
        Ok(handle)
    }

    fn tranche(&self, id: TrancheId) -> Result<Versioned<Tranche>, LedgerError> {
        self.inner
            .read()
            .tranches
            .get(&id.as_u64())
            .cloned()
            .ok_or(LedgerError::TrancheNotFound(id))
    }

    fn allocation(&self, id: AllocationId) -> Result<Versioned<Allocation>, LedgerError> {
        self.inner
            .read()
            .allocations
            .get(&id.as_u64())
            .cloned()
            .ok_or(LedgerError::AllocationNotFound(id))
    }

    fn certificate(&self, id: CertificateId) -> Result<Versioned<Certificate>, LedgerError> {
        self.inner
            .read()
            .certificates
            .get(&id.as_u64())
            .cloned()
            .ok_or(LedgerError::CertificateNotFound(id))
    }

    fn investor_profile(
        &self,
        address: &AddressId,
    ) -> Result<Versioned<InvestorProfile>, LedgerError> {
        self.inner
            .read()
            .profiles
            .get(address)
            .cloned()
            .ok_or_else(|| LedgerError::ProfileNotFound(address.clone()))
    }

    fn operation(&self, handle: OperationHandle) -> Result<CommittedOperation, LedgerError> {
        self.inner
            .read()
            .journal
            .get(&handle.as_u64())
            .cloned()
            .ok_or(LedgerError::OperationNotFound(handle))
    }
}
