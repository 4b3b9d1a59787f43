//! # Investor Profile
//!
//! Per-investor aggregate created lazily on first allocation. The total
//! invested, reputation score, and risk tolerance are sealed; verification
//! and institutional flags are public metadata. `total_invested` decodes to
//! the sum of the investor's allocation amounts — re-established additively
//! on every allocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cbf_codec::{ConfidentialCodec, SealedValue};
use cbf_core::{units::checked_amount_add, AddressId};

use crate::error::StateError;

/// Initial reputation score for a newly opened profile.
const INITIAL_REPUTATION: u64 = 50;
/// Initial risk tolerance for a newly opened profile.
const INITIAL_RISK_TOLERANCE: u64 = 50;

/// Aggregate investment record for one investor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorProfile {
    /// The investor's address.
    pub address: AddressId,
    /// Sealed sum of all the investor's allocation amounts.
    pub sealed_total_invested: SealedValue,
    /// Sealed reputation score (0–100).
    pub sealed_reputation_score: SealedValue,
    /// Sealed risk tolerance (0–100).
    pub sealed_risk_tolerance: SealedValue,
    /// Whether the investor passed verification.
    pub is_verified: bool,
    /// Whether the investor is an institution.
    pub is_institutional: bool,
    /// When the profile was opened (first allocation).
    pub join_date: DateTime<Utc>,
}

impl InvestorProfile {
    /// Open a fresh profile: zero invested, median scores, unverified.
    pub fn open(address: AddressId, codec: &dyn ConfidentialCodec, now: DateTime<Utc>) -> Self {
        Self {
            address,
            sealed_total_invested: codec.seal_amount(0),
            sealed_reputation_score: codec.seal_amount(INITIAL_REPUTATION),
            sealed_risk_tolerance: codec.seal_amount(INITIAL_RISK_TOLERANCE),
            is_verified: false,
            is_institutional: false,
            join_date: now,
        }
    }

    /// Add `amount` to the sealed running total, returning the updated
    /// profile. The total is unsealed, added with overflow checking, and
    /// resealed — sealed values are never mutated in place.
    pub fn record_investment(
        &self,
        codec: &dyn ConfidentialCodec,
        amount: u64,
    ) -> Result<Self, StateError> {
        let current = codec.unseal_amount(&self.sealed_total_invested)?;
        let total = checked_amount_add(current, amount).map_err(|e| StateError::InvalidRange {
            detail: e.to_string(),
        })?;
        let mut next = self.clone();
        next.sealed_total_invested = codec.seal_amount(total);
        Ok(next)
    }

    /// Decode the running total for an authorized reader.
    pub fn total_invested(&self, codec: &dyn ConfidentialCodec) -> Result<u64, StateError> {
        Ok(codec.unseal_amount(&self.sealed_total_invested)?)
    }
}
