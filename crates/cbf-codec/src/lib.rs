//! # cbf-codec — Confidential Codec
//!
//! Encodes sensitive scalars (amounts, rates, identity fragments, boolean
//! flags) into opaque [`SealedValue`]s before they leave the trusted
//! boundary, and decodes them back for authorized callers. The codec is a
//! capability interface: callers depend on [`ConfidentialCodec`], never on
//! a concrete backend.
//!
//! ## Backends
//!
//! - [`PlaceholderCodec`] — Phase 1. A reversible structural encoding with
//!   **no cryptographic confidentiality**. It exists to fix the contract a
//!   real backend must satisfy: round-trip exactness, injectivity per kind,
//!   and fail-closed decoding.
//! - `fhe` feature — Phase 2 slot for a real homomorphic backend with
//!   identical signatures. Not yet implemented; enabling the feature only
//!   reserves the slot.
//!
//! ## Contract
//!
//! For every backend and every supported input `v`:
//!
//! - `unseal(seal(v)) == v` (round-trip exactness)
//! - `v1 != v2  ⇒  seal(v1) != seal(v2)` for a fixed kind (injectivity —
//!   equality-based duplicate detection downstream stays sound)
//! - unsealing a corrupted or foreign payload is
//!   [`CodecError::MalformedSealedValue`], never a default value
//! - [`ConfidentialCodec::validate`] is structural-only and never panics

pub mod error;
#[cfg(feature = "fhe")]
pub mod fhe;
pub mod placeholder;
pub mod sealed;

pub use error::CodecError;
pub use placeholder::PlaceholderCodec;
pub use sealed::{SealKind, SealedValue};

use cbf_core::{AddressId, RateBps};

/// The confidential encoding capability.
///
/// Pure and stateless: no method has side effects, and implementations are
/// safe to share across threads without synchronization.
pub trait ConfidentialCodec: Send + Sync {
    /// Seal an amount in base units.
    fn seal_amount(&self, value: u64) -> SealedValue;

    /// Seal a fixed-point interest rate.
    fn seal_rate(&self, rate: RateBps) -> SealedValue;

    /// Seal the identity fragment of an address.
    fn seal_identity(&self, address: &AddressId) -> SealedValue;

    /// Seal a boolean flag.
    fn seal_flag(&self, flag: bool) -> SealedValue;

    /// Recover a sealed amount. Fails closed on anything this codec could
    /// not have produced as an amount seal.
    fn unseal_amount(&self, sealed: &SealedValue) -> Result<u64, CodecError>;

    /// Recover a sealed rate.
    fn unseal_rate(&self, sealed: &SealedValue) -> Result<RateBps, CodecError>;

    /// Recover a sealed identity fragment.
    fn unseal_identity(&self, sealed: &SealedValue) -> Result<u32, CodecError>;

    /// Recover a sealed flag.
    fn unseal_flag(&self, sealed: &SealedValue) -> Result<bool, CodecError>;

    /// Structural validity check. Returns `false` rather than erroring on
    /// any malformed input; says nothing about cryptographic integrity in
    /// the placeholder backend.
    fn validate(&self, sealed: &SealedValue) -> bool;
}
