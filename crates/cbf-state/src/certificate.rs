//! # Certificate Lifecycle
//!
//! A redeemable claim issued from exactly one allocation. The bond amount
//! and interest rate are sealed; ownership, dates, and status flags are
//! public. Redemption is the single terminal mutation: it sets
//! `is_active = false, is_redeemed = true` and can never be repeated.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use cbf_codec::SealedValue;
use cbf_core::{AddressId, AllocationId};

use crate::error::StateError;

/// Fixed window between issue and maturity.
pub const CERTIFICATE_MATURITY_WINDOW_DAYS: i64 = 365;

/// A redeemable bond certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// The allocation this certificate was issued from.
    pub allocation_id: AllocationId,
    /// Sealed bond amount, carried over from the allocation.
    pub sealed_bond_amount: SealedValue,
    /// Sealed interest rate, sealed from the tranche's rate at issue time.
    pub sealed_interest_rate: SealedValue,
    /// The certificate owner's address.
    pub owner: AddressId,
    /// When the certificate was issued.
    pub issue_date: DateTime<Utc>,
    /// When the certificate matures: issue date plus the fixed window.
    pub maturity_date: DateTime<Utc>,
    /// Whether the certificate is live. `is_redeemed` implies not active.
    pub is_active: bool,
    /// Whether the certificate was redeemed. Terminal.
    pub is_redeemed: bool,
}

impl Certificate {
    /// Issue a certificate. Maturity is `issue_date` plus
    /// [`CERTIFICATE_MATURITY_WINDOW_DAYS`].
    pub fn new(
        allocation_id: AllocationId,
        sealed_bond_amount: SealedValue,
        sealed_interest_rate: SealedValue,
        owner: AddressId,
        issue_date: DateTime<Utc>,
    ) -> Self {
        Self {
            allocation_id,
            sealed_bond_amount,
            sealed_interest_rate,
            owner,
            issue_date,
            maturity_date: issue_date + Duration::days(CERTIFICATE_MATURITY_WINDOW_DAYS),
            is_active: true,
            is_redeemed: false,
        }
    }

    /// Whether the certificate is redeemable at `now`. Boundary inclusive.
    pub fn is_redeemable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_redeemed && now >= self.maturity_date
    }

    /// Redeem the certificate, returning the terminally updated record.
    pub fn redeem(&self, now: DateTime<Utc>) -> Result<Self, StateError> {
        // Redemption is the only path that clears is_active, so an inactive
        // certificate is by construction an already-redeemed one.
        if self.is_redeemed || !self.is_active {
            return Err(StateError::AlreadyRedeemed);
        }
        if now < self.maturity_date {
            return Err(StateError::NotMatured {
                now,
                maturity_date: self.maturity_date,
            });
        }
        let mut next = self.clone();
        next.is_active = false;
        next.is_redeemed = true;
        Ok(next)
    }

    /// Check that `caller` owns this certificate.
    pub fn ensure_owner(&self, caller: &AddressId) -> Result<(), StateError> {
        if caller == &self.owner {
            Ok(())
        } else {
            Err(StateError::NotOwner {
                caller: caller.clone(),
            })
        }
    }
}
