//! # Bond Flow Orchestrator
//!
//! The public operation surface. Each mutating operation runs the same
//! sequence: resolve the caller, read the entities it depends on, validate
//! the transition locally through the state machine, seal sensitive fields,
//! create a proof, and hand the ledger one atomic conditional commit. All
//! validation happens before the submit, and the submit is the only durable
//! side effect — a failure at any point leaves no partial mutation behind.
//!
//! Ledger version conflicts are retried by re-running the whole
//! read-modify-write cycle up to [`MAX_CONFLICT_RETRIES`] times, then
//! surfaced as [`FlowError::ConcurrentModification`].

use serde_json::json;

use cbf_codec::{CodecError, ConfidentialCodec, PlaceholderCodec, SealKind};
use cbf_core::{AddressId, AllocationId, CertificateId, OperationHandle, TrancheId};
use cbf_ledger::{op, IdentityProvider, Ledger, LedgerError};
use cbf_proof::ProofEngine;
use cbf_state::{Allocation, Certificate, InvestorProfile, StateError, Tranche, TrancheParams};

use crate::clock::{Clock, SystemClock};
use crate::error::FlowError;

/// How many full read-modify-write cycles to attempt before surfacing
/// [`FlowError::ConcurrentModification`].
pub const MAX_CONFLICT_RETRIES: u32 = 3;

/// The opaque result handle of a successful mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowReceipt<Id> {
    /// The ledger-assigned entity id the operation produced or touched.
    pub id: Id,
    /// The handle of the committed ledger transition.
    pub handle: OperationHandle,
}

/// Sequences codec, proof engine, lifecycle state machine, and ledger for
/// every public operation.
pub struct BondFlow<L, I, K = PlaceholderCodec, C = SystemClock> {
    ledger: L,
    identity: I,
    codec: K,
    clock: C,
    engine: ProofEngine,
}

impl<L: Ledger, I: IdentityProvider> BondFlow<L, I> {
    /// Wire the orchestrator with the placeholder codec and system clock.
    pub fn new(ledger: L, identity: I) -> Self {
        Self::with_parts(ledger, identity, PlaceholderCodec, SystemClock)
    }
}

impl<L: Ledger, I: IdentityProvider, K: ConfidentialCodec, C: Clock> BondFlow<L, I, K, C> {
    /// Wire the orchestrator with explicit codec and clock.
    pub fn with_parts(ledger: L, identity: I, codec: K, clock: C) -> Self {
        Self {
            ledger,
            identity,
            codec,
            clock,
            engine: ProofEngine,
        }
    }

    /// The wired ledger, for journal inspection.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    // ── Mutating operations ──────────────────────────────────────────

    /// Create a bond tranche owned by the current caller.
    pub fn create_bond_tranche(
        &self,
        params: TrancheParams,
    ) -> Result<FlowReceipt<TrancheId>, FlowError> {
        let caller = self.identity.current_caller()?;
        let now = self.clock.now();
        let tranche = Tranche::new(caller.clone(), params, now)?;

        let proof = self.engine.create_at(
            op::CREATE_BOND_TRANCHE,
            json!({
                "name": &tranche.name,
                "issuer": &caller,
                "total_amount": tranche.total_amount,
                "minimum_investment": tranche.minimum_investment,
                "maximum_investment": tranche.maximum_investment,
                "interest_rate_bps": tranche.interest_rate.as_bps(),
                "maturity_time": tranche.maturity_time,
            }),
            now,
        )?;
        let (id, handle) = self.ledger.submit_tranche(tranche, proof)?;
        tracing::debug!(tranche = %id, handle = %handle, "tranche created");
        Ok(FlowReceipt { id, handle })
    }

    /// Allocate `amount` into a tranche on behalf of the current caller.
    pub fn allocate_bond(
        &self,
        tranche_id: TrancheId,
        amount: u64,
    ) -> Result<FlowReceipt<AllocationId>, FlowError> {
        let caller = self.identity.current_caller()?;

        for _attempt in 1..=MAX_CONFLICT_RETRIES {
            let now = self.clock.now();
            let read = self.ledger.tranche(tranche_id)?;
            let updated_tranche = read.record.allocate(amount)?;

            let (profile_version, profile) = match self.ledger.investor_profile(&caller) {
                Ok(v) => (Some(v.version), v.record),
                Err(LedgerError::ProfileNotFound(_)) => {
                    (None, InvestorProfile::open(caller.clone(), &self.codec, now))
                }
                Err(other) => return Err(other.into()),
            };
            let profile = profile.record_investment(&self.codec, amount)?;

            let allocation = Allocation::new(
                tranche_id,
                self.codec.seal_amount(amount),
                self.codec.seal_identity(&caller),
                caller.clone(),
                now,
            );

            let proof = self.engine.create_at(
                op::ALLOCATE_BOND,
                json!({
                    "tranche_id": tranche_id.as_u64(),
                    "sealed_amount": &allocation.sealed_amount,
                    "sealed_investor": &allocation.sealed_investor,
                    "timestamp": allocation.timestamp,
                }),
                now,
            )?;

            match self.ledger.submit_allocation(
                tranche_id,
                read.version,
                updated_tranche,
                allocation,
                profile_version,
                profile,
                proof,
            ) {
                Ok((id, handle)) => {
                    tracing::debug!(allocation = %id, handle = %handle, "bond allocated");
                    return Ok(FlowReceipt { id, handle });
                }
                Err(LedgerError::VersionConflict { entity, .. }) => {
                    tracing::warn!(entity, "allocation conflicted, retrying");
                }
                Err(other) => return Err(other.into()),
            }
        }
        Err(FlowError::ConcurrentModification {
            attempts: MAX_CONFLICT_RETRIES,
        })
    }

    /// Issue the one permitted certificate from an allocation. The caller
    /// must be the allocation's investor or the tranche's issuer. The
    /// certificate carries the allocation's sealed amount and the tranche's
    /// rate, sealed at issue time.
    pub fn issue_certificate(
        &self,
        allocation_id: AllocationId,
    ) -> Result<FlowReceipt<CertificateId>, FlowError> {
        let caller = self.identity.current_caller()?;

        for _attempt in 1..=MAX_CONFLICT_RETRIES {
            let now = self.clock.now();
            let read = self.ledger.allocation(allocation_id)?;
            let tranche = self.ledger.tranche(read.record.tranche_id)?;

            read.record.ensure_authorized(&caller, &tranche.record.issuer)?;
            if let Some(existing) = read.record.certificate_id {
                return Err(StateError::AllocationAlreadyCertified {
                    certificate_id: existing,
                }
                .into());
            }
            if !self.codec.validate(&read.record.sealed_amount) {
                return Err(CodecError::malformed(
                    SealKind::Amount,
                    "allocation amount seal failed structural validation",
                )
                .into());
            }

            let certificate = Certificate::new(
                allocation_id,
                read.record.sealed_amount.clone(),
                self.codec.seal_rate(tranche.record.interest_rate),
                read.record.investor.clone(),
                now,
            );

            let proof = self.engine.create_at(
                op::ISSUE_CERTIFICATE,
                json!({
                    "allocation_id": allocation_id.as_u64(),
                    "sealed_bond_amount": &certificate.sealed_bond_amount,
                    "sealed_interest_rate": &certificate.sealed_interest_rate,
                    "owner": &certificate.owner,
                    "issue_date": certificate.issue_date,
                    "maturity_date": certificate.maturity_date,
                }),
                now,
            )?;

            match self
                .ledger
                .submit_certificate(allocation_id, read.version, certificate, proof)
            {
                Ok((id, handle)) => {
                    tracing::debug!(certificate = %id, handle = %handle, "certificate issued");
                    return Ok(FlowReceipt { id, handle });
                }
                Err(LedgerError::VersionConflict { entity, .. }) => {
                    tracing::warn!(entity, "certificate issuance conflicted, retrying");
                }
                Err(other) => return Err(other.into()),
            }
        }
        Err(FlowError::ConcurrentModification {
            attempts: MAX_CONFLICT_RETRIES,
        })
    }

    /// Redeem a matured certificate owned by the current caller.
    pub fn redeem_bond(
        &self,
        certificate_id: CertificateId,
    ) -> Result<FlowReceipt<CertificateId>, FlowError> {
        let caller = self.identity.current_caller()?;

        for _attempt in 1..=MAX_CONFLICT_RETRIES {
            let now = self.clock.now();
            let read = self.ledger.certificate(certificate_id)?;
            read.record.ensure_owner(&caller)?;
            let redeemed = read.record.redeem(now)?;

            let proof = self.engine.create_at(
                op::REDEEM_BOND,
                json!({
                    "certificate_id": certificate_id.as_u64(),
                    "owner": &caller,
                    "redeemed_at": now,
                }),
                now,
            )?;

            match self
                .ledger
                .submit_redemption(certificate_id, read.version, redeemed, proof)
            {
                Ok(handle) => {
                    tracing::debug!(certificate = %certificate_id, handle = %handle, "bond redeemed");
                    return Ok(FlowReceipt {
                        id: certificate_id,
                        handle,
                    });
                }
                Err(LedgerError::VersionConflict { entity, .. }) => {
                    tracing::warn!(entity, "redemption conflicted, retrying");
                }
                Err(other) => return Err(other.into()),
            }
        }
        Err(FlowError::ConcurrentModification {
            attempts: MAX_CONFLICT_RETRIES,
        })
    }

    // ── Read operations ──────────────────────────────────────────────
    //
    // Sealed fields come back as-is; a caller unseals only if authorized.

    /// Read a tranche's public metadata and status.
    pub fn tranche_info(&self, id: TrancheId) -> Result<Tranche, FlowError> {
        Ok(self.ledger.tranche(id)?.record)
    }

    /// Read an allocation, sealed fields included.
    pub fn allocation_info(&self, id: AllocationId) -> Result<Allocation, FlowError> {
        Ok(self.ledger.allocation(id)?.record)
    }

    /// Read a certificate, sealed fields included.
    pub fn certificate_info(&self, id: CertificateId) -> Result<Certificate, FlowError> {
        Ok(self.ledger.certificate(id)?.record)
    }

    /// Read an investor profile, sealed fields included.
    pub fn investor_profile(&self, address: &AddressId) -> Result<InvestorProfile, FlowError> {
        Ok(self.ledger.investor_profile(address)?.record)
    }
}
