//! # Lifecycle Error Types
//!
//! One variant per transition failure mode, each carrying the context a
//! caller needs to diagnose the rejection. Validation errors are detected
//! before any ledger mutation and returned without side effects.

use chrono::{DateTime, Utc};
use thiserror::Error;

use cbf_codec::CodecError;
use cbf_core::{AddressId, CertificateId};

/// Errors from bond lifecycle transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Construction-time bounds are inconsistent.
    #[error("invalid range: {detail}")]
    InvalidRange {
        /// Which bound check failed and with what values.
        detail: String,
    },

    /// The tranche is deactivated and accepts no further allocations.
    #[error("tranche {name:?} is not active")]
    TrancheInactive {
        /// The tranche's public name.
        name: String,
    },

    /// The allocation amount violates the tranche's per-investor bounds.
    #[error("amount {amount} outside investment bounds [{minimum}, {maximum}]")]
    AmountOutOfBounds {
        /// The rejected amount.
        amount: u64,
        /// The tranche's minimum investment.
        minimum: u64,
        /// The tranche's maximum investment.
        maximum: u64,
    },

    /// The allocation would push the tranche past its total capacity.
    /// Equality fills the tranche exactly and is allowed.
    #[error("allocation of {requested} exceeds remaining capacity {remaining}")]
    CapacityExceeded {
        /// The requested allocation amount.
        requested: u64,
        /// Capacity left before this request.
        remaining: u64,
    },

    /// The allocation already produced its one permitted certificate.
    #[error("allocation already certified as certificate {certificate_id}")]
    AllocationAlreadyCertified {
        /// The certificate that consumed the allocation.
        certificate_id: CertificateId,
    },

    /// The certificate has not reached its maturity date. The boundary is
    /// inclusive: `now == maturity_date` is redeemable.
    #[error("certificate not matured: now {now}, matures {maturity_date}")]
    NotMatured {
        /// The rejected redemption time.
        now: DateTime<Utc>,
        /// When the certificate matures.
        maturity_date: DateTime<Utc>,
    },

    /// The certificate was already redeemed. Terminal.
    #[error("certificate already redeemed")]
    AlreadyRedeemed,

    /// The caller does not own the entity and is not otherwise authorized.
    #[error("caller {caller} is not authorized for this entity")]
    NotOwner {
        /// The rejected caller.
        caller: AddressId,
    },

    /// A sealed field failed to decode. Fail-closed: the transition aborts.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
