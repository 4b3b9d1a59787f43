//! # Tranche Lifecycle
//!
//! A tranche is a pool of bond capacity investors allocate into. Its
//! amount and rate bounds are public issuance metadata; confidentiality
//! applies to the allocations drawn from it. The capacity invariant —
//! `allocated_amount <= total_amount`, with `is_fully_allocated` exactly at
//! equality — is re-established by every transition and can be audited via
//! [`Tranche::check_invariants`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use cbf_core::{units::checked_amount_add, AddressId, RateBps};

use crate::error::StateError;

/// Validated input for creating a tranche.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrancheParams {
    /// Public display name.
    pub name: String,
    /// Public description.
    pub description: String,
    /// Total capacity in base units.
    pub total_amount: u64,
    /// Per-investor minimum allocation.
    pub minimum_investment: u64,
    /// Per-investor maximum allocation.
    pub maximum_investment: u64,
    /// Fixed-point interest rate.
    pub interest_rate: RateBps,
    /// Seconds from creation until the tranche matures.
    pub maturity_period_secs: u64,
}

/// A pool of bond capacity. Created by `createBondTranche`, mutated only by
/// successful allocations, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tranche {
    /// Public display name.
    pub name: String,
    /// Public description.
    pub description: String,
    /// The issuer's address.
    pub issuer: AddressId,
    /// Total capacity in base units.
    pub total_amount: u64,
    /// Sum of all successful allocations so far. Monotonically increasing.
    pub allocated_amount: u64,
    /// Per-investor minimum allocation.
    pub minimum_investment: u64,
    /// Per-investor maximum allocation.
    pub maximum_investment: u64,
    /// Fixed-point interest rate.
    pub interest_rate: RateBps,
    /// When the tranche was created.
    pub creation_time: DateTime<Utc>,
    /// When the tranche matures. Strictly after `creation_time`.
    pub maturity_time: DateTime<Utc>,
    /// Whether the tranche accepts allocations.
    pub is_active: bool,
    /// Whether `allocated_amount == total_amount`.
    pub is_fully_allocated: bool,
    /// Whether allocation amount/identity fields are sealed.
    pub is_confidential: bool,
}

impl Tranche {
    /// Create a tranche, validating the issuance bounds:
    /// `0 < minimum_investment <= maximum_investment <= total_amount` and
    /// `maturity_period_secs > 0`.
    pub fn new(
        issuer: AddressId,
        params: TrancheParams,
        now: DateTime<Utc>,
    ) -> Result<Self, StateError> {
        if params.total_amount == 0 {
            return Err(StateError::InvalidRange {
                detail: "total amount must be positive".to_string(),
            });
        }
        if params.minimum_investment == 0 {
            return Err(StateError::InvalidRange {
                detail: "minimum investment must be positive".to_string(),
            });
        }
        if params.minimum_investment > params.maximum_investment {
            return Err(StateError::InvalidRange {
                detail: format!(
                    "minimum investment {} exceeds maximum {}",
                    params.minimum_investment, params.maximum_investment
                ),
            });
        }
        if params.maximum_investment > params.total_amount {
            return Err(StateError::InvalidRange {
                detail: format!(
                    "maximum investment {} exceeds total amount {}",
                    params.maximum_investment, params.total_amount
                ),
            });
        }
        if params.maturity_period_secs == 0 {
            return Err(StateError::InvalidRange {
                detail: "maturity period must be positive".to_string(),
            });
        }
        let maturity_time = now
            .checked_add_signed(Duration::seconds(
                i64::try_from(params.maturity_period_secs).map_err(|_| {
                    StateError::InvalidRange {
                        detail: format!(
                            "maturity period {} seconds is unrepresentable",
                            params.maturity_period_secs
                        ),
                    }
                })?,
            ))
            .ok_or_else(|| StateError::InvalidRange {
                detail: "maturity time overflows the calendar".to_string(),
            })?;

        Ok(Self {
            name: params.name,
            description: params.description,
            issuer,
            total_amount: params.total_amount,
            allocated_amount: 0,
            minimum_investment: params.minimum_investment,
            maximum_investment: params.maximum_investment,
            interest_rate: params.interest_rate,
            creation_time: now,
            maturity_time,
            is_active: true,
            is_fully_allocated: false,
            is_confidential: true,
        })
    }

    /// Capacity remaining before the tranche is full.
    pub fn remaining_capacity(&self) -> u64 {
        self.total_amount - self.allocated_amount
    }

    /// Apply one allocation of `amount`, returning the updated tranche.
    ///
    /// Capacity is strict: a request past the remainder is rejected, a
    /// request equal to the remainder fills the tranche and flips
    /// `is_fully_allocated`.
    pub fn allocate(&self, amount: u64) -> Result<Self, StateError> {
        if !self.is_active {
            return Err(StateError::TrancheInactive {
                name: self.name.clone(),
            });
        }
        if self.is_fully_allocated {
            return Err(StateError::CapacityExceeded {
                requested: amount,
                remaining: 0,
            });
        }
        if amount < self.minimum_investment || amount > self.maximum_investment {
            return Err(StateError::AmountOutOfBounds {
                amount,
                minimum: self.minimum_investment,
                maximum: self.maximum_investment,
            });
        }
        let allocated = checked_amount_add(self.allocated_amount, amount)
            .map_err(|e| StateError::InvalidRange {
                detail: e.to_string(),
            })?;
        if allocated > self.total_amount {
            return Err(StateError::CapacityExceeded {
                requested: amount,
                remaining: self.remaining_capacity(),
            });
        }
        let mut next = self.clone();
        next.allocated_amount = allocated;
        next.is_fully_allocated = allocated == next.total_amount;
        Ok(next)
    }

    /// Deactivate the tranche. Tranches are never deleted; deactivation is
    /// the only way to stop further allocations.
    pub fn deactivate(&self) -> Self {
        let mut next = self.clone();
        next.is_active = false;
        next
    }

    /// Audit the structural invariants. Intended for ledger-side checks
    /// after applying a transition.
    pub fn check_invariants(&self) -> Result<(), StateError> {
        if self.allocated_amount > self.total_amount {
            return Err(StateError::InvalidRange {
                detail: format!(
                    "allocated {} exceeds total {}",
                    self.allocated_amount, self.total_amount
                ),
            });
        }
        if self.is_fully_allocated != (self.allocated_amount == self.total_amount) {
            return Err(StateError::InvalidRange {
                detail: "fully-allocated flag disagrees with amounts".to_string(),
            });
        }
        if self.maturity_time <= self.creation_time {
            return Err(StateError::InvalidRange {
                detail: "maturity time does not follow creation time".to_string(),
            });
        }
        Ok(())
    }
}
