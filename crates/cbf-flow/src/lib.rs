//! # cbf-flow — Flow Orchestrator
//!
//! The public operation surface of the Cloaked Bond Flow core:
//! [`BondFlow`] sequences the confidential codec, the proof engine, the
//! lifecycle state machine, and the ledger for each operation —
//! `createBondTranche`, `allocateBond`, `issueCertificate`, `redeemBond` —
//! plus the read-only queries. Ledger version conflicts are retried with a
//! fresh read-modify-write cycle up to [`MAX_CONFLICT_RETRIES`] times and
//! then surfaced as [`FlowError::ConcurrentModification`].
//!
//! Collaborators are injected as generics: any [`Ledger`], any
//! [`IdentityProvider`], any codec, and any [`Clock`] — [`ManualClock`]
//! makes maturity-boundary behavior testable.
//!
//! [`Ledger`]: cbf_ledger::Ledger
//! [`IdentityProvider`]: cbf_ledger::IdentityProvider

pub mod clock;
pub mod error;
pub mod flow;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::FlowError;
pub use flow::{BondFlow, FlowReceipt, MAX_CONFLICT_RETRIES};
