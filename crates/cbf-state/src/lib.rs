//! # cbf-state — Bond Lifecycle State Machine
//!
//! Defines the four ledger entities and their valid transitions. Every
//! transition is a pure method that validates its preconditions and returns
//! an **updated copy** of the record — entities are immutable values, and
//! the ledger is the only place updated records become durable.
//!
//! ## Entities and transitions
//!
//! - **[`Tranche`]** ([`tranche`]): created with validated bounds, mutated
//!   only by successful allocations (monotonically increasing
//!   `allocated_amount`), never deleted — only deactivated.
//! - **[`Allocation`]** ([`allocation`]): created once, immutable except
//!   for the single certificate link (at most one certificate per
//!   allocation, enforced structurally).
//! - **[`Certificate`]** ([`certificate`]): created from exactly one
//!   allocation; terminally redeemed once, boundary-inclusive on maturity.
//! - **[`InvestorProfile`]** ([`profile`]): created lazily on first
//!   allocation, accrues sealed totals additively, never deleted.
//!
//! ## Invariants
//!
//! Capacity: `allocated_amount <= total_amount` after every transition, and
//! `is_fully_allocated` holds exactly at equality. Redemption:
//! `is_redeemed ⇒ !is_active`, and eligibility is `now >= maturity_date`.
//! All numeric comparisons run on decoded scalars — sealed representations
//! are never compared for business logic.

pub mod allocation;
pub mod certificate;
pub mod error;
pub mod profile;
pub mod tranche;

pub use allocation::Allocation;
pub use certificate::{Certificate, CERTIFICATE_MATURITY_WINDOW_DAYS};
pub use error::StateError;
pub use profile::InvestorProfile;
pub use tranche::{Tranche, TrancheParams};
