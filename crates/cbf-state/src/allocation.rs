//! # Allocation Lifecycle
//!
//! One investor's committed stake in a tranche. The amount and identity
//! fragment are sealed; the investor address itself stays public so
//! ownership can be checked without unsealing. An allocation is immutable
//! after creation except for the single certificate link — at most one
//! certificate per allocation, enforced structurally by [`Allocation::certify`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cbf_codec::SealedValue;
use cbf_core::{AddressId, CertificateId, TrancheId};

use crate::error::StateError;

/// A committed stake in a tranche.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// The tranche this allocation draws from.
    pub tranche_id: TrancheId,
    /// Sealed allocation amount.
    pub sealed_amount: SealedValue,
    /// Sealed identity fragment of the investor.
    pub sealed_investor: SealedValue,
    /// The investor's address (public, used for ownership checks).
    pub investor: AddressId,
    /// When the allocation was committed.
    pub timestamp: DateTime<Utc>,
    /// Whether the sensitive fields are sealed.
    pub is_confidential: bool,
    /// The certificate that consumed this allocation, if any.
    pub certificate_id: Option<CertificateId>,
}

impl Allocation {
    /// Record a new allocation. The caller has already validated the
    /// amount against the tranche and sealed the sensitive fields.
    pub fn new(
        tranche_id: TrancheId,
        sealed_amount: SealedValue,
        sealed_investor: SealedValue,
        investor: AddressId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            tranche_id,
            sealed_amount,
            sealed_investor,
            investor,
            timestamp: now,
            is_confidential: true,
            certificate_id: None,
        }
    }

    /// Link the one permitted certificate, returning the updated record.
    pub fn certify(&self, certificate_id: CertificateId) -> Result<Self, StateError> {
        if let Some(existing) = self.certificate_id {
            return Err(StateError::AllocationAlreadyCertified {
                certificate_id: existing,
            });
        }
        let mut next = self.clone();
        next.certificate_id = Some(certificate_id);
        Ok(next)
    }

    /// Check that `caller` may issue a certificate from this allocation:
    /// either the allocation's investor or the tranche's issuer.
    pub fn ensure_authorized(
        &self,
        caller: &AddressId,
        tranche_issuer: &AddressId,
    ) -> Result<(), StateError> {
        if caller == &self.investor || caller == tranche_issuer {
            Ok(())
        } else {
            Err(StateError::NotOwner {
                caller: caller.clone(),
            })
        }
    }
}
