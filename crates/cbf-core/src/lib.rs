//! # cbf-core — Foundational Types
//!
//! Shared vocabulary for the Cloaked Bond Flow core. Every other crate in
//! the workspace builds on the types defined here:
//!
//! - **Identifiers** ([`identity`]): domain-primitive newtypes for ledger
//!   entities. A [`TrancheId`] cannot be passed where an [`AllocationId`]
//!   is expected. Entity ids are monotonically increasing integers assigned
//!   by the ledger — this crate only validates them, never mints them.
//! - **Units** ([`units`]): fixed-point [`RateBps`] for interest rates and
//!   checked-arithmetic helpers for amounts. No floating point crosses the
//!   confidential boundary.
//! - **Canonical serialization** ([`canonical`]): deterministic JSON bytes
//!   (sorted keys, compact separators, floats rejected) for digest and
//!   proof input.
//! - **Digests** ([`digest`]): SHA-256 content digests over canonical bytes.
//! - **Errors** ([`error`]): the shared [`ValidationError`] hierarchy.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod units;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest, Sha256Accumulator};
pub use error::ValidationError;
pub use identity::{AddressId, AllocationId, CertificateId, OperationHandle, TrancheId};
pub use units::RateBps;
