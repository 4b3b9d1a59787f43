//! # Tranche Capacity — Integration Tests
//!
//! Strict capacity and per-investor bounds enforced through the full
//! orchestrator-plus-ledger path: exact fills, rejected overshoots, and
//! the fully-allocated terminal state.

use chrono::{DateTime, Utc};

use cbf_core::{AddressId, RateBps};
use cbf_flow::{BondFlow, FlowError, ManualClock};
use cbf_ledger::{InMemoryLedger, StaticIdentity};
use cbf_state::{StateError, TrancheParams};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn address(last_byte: u8) -> AddressId {
    AddressId::new(format!("0x{:038x}{:02x}", 0x1234u64, last_byte)).unwrap()
}

fn start() -> DateTime<Utc> {
    "2026-01-01T00:00:00Z".parse().unwrap()
}

fn params(total: u64, min: u64, max: u64) -> TrancheParams {
    TrancheParams {
        name: "Capacity".to_string(),
        description: "Capacity scenarios".to_string(),
        total_amount: total,
        minimum_investment: min,
        maximum_investment: max,
        interest_rate: RateBps::new(400).unwrap(),
        maturity_period_secs: 86_400 * 180,
    }
}

fn flow_as<'a>(
    ledger: &'a InMemoryLedger,
    caller: AddressId,
    clock: &'a ManualClock,
) -> BondFlow<
    &'a InMemoryLedger,
    StaticIdentity,
    cbf_codec::PlaceholderCodec,
    &'a ManualClock,
> {
    BondFlow::with_parts(
        ledger,
        StaticIdentity::new(caller),
        cbf_codec::PlaceholderCodec,
        clock,
    )
}

// ---------------------------------------------------------------------------
// Test: create-then-fill with two exact halves
// ---------------------------------------------------------------------------

#[test]
fn two_maximal_allocations_fill_the_tranche() {
    let ledger = InMemoryLedger::new();
    let clock = ManualClock::new(start());
    let issuing = flow_as(&ledger, address(0x01), &clock);
    let tranche = issuing
        .create_bond_tranche(params(1_000_000, 10_000, 500_000))
        .unwrap();

    flow_as(&ledger, address(0x02), &clock)
        .allocate_bond(tranche.id, 500_000)
        .unwrap();
    flow_as(&ledger, address(0x03), &clock)
        .allocate_bond(tranche.id, 500_000)
        .unwrap();

    let info = issuing.tranche_info(tranche.id).unwrap();
    assert_eq!(info.allocated_amount, 1_000_000);
    assert!(info.is_fully_allocated);

    // The full tranche turns everyone away, minimum-sized bids included.
    let err = flow_as(&ledger, address(0x04), &clock)
        .allocate_bond(tranche.id, 10_000)
        .unwrap_err();
    assert!(matches!(
        err,
        FlowError::State(StateError::CapacityExceeded { remaining: 0, .. })
    ));
}

// ---------------------------------------------------------------------------
// Test: strict rejection past the remainder
// ---------------------------------------------------------------------------

#[test]
fn allocation_past_remainder_rejected_whole() {
    let ledger = InMemoryLedger::new();
    let clock = ManualClock::new(start());
    let issuing = flow_as(&ledger, address(0x01), &clock);
    let tranche = issuing
        .create_bond_tranche(params(1_000_000, 10_000, 500_000))
        .unwrap();

    flow_as(&ledger, address(0x02), &clock)
        .allocate_bond(tranche.id, 500_000)
        .unwrap();
    flow_as(&ledger, address(0x03), &clock)
        .allocate_bond(tranche.id, 400_000)
        .unwrap();

    // 100_000 remains; a 150_000 bid is within bounds but over capacity,
    // and no partial fill happens.
    let err = flow_as(&ledger, address(0x04), &clock)
        .allocate_bond(tranche.id, 150_000)
        .unwrap_err();
    match err {
        FlowError::State(StateError::CapacityExceeded {
            requested,
            remaining,
        }) => {
            assert_eq!(requested, 150_000);
            assert_eq!(remaining, 100_000);
        }
        other => panic!("expected CapacityExceeded, got {other:?}"),
    }
    assert_eq!(
        issuing.tranche_info(tranche.id).unwrap().allocated_amount,
        900_000
    );

    // The exact remainder still fits.
    flow_as(&ledger, address(0x04), &clock)
        .allocate_bond(tranche.id, 100_000)
        .unwrap();
    assert!(issuing.tranche_info(tranche.id).unwrap().is_fully_allocated);
}

// ---------------------------------------------------------------------------
// Test: per-investor bounds
// ---------------------------------------------------------------------------

#[test]
fn bounds_are_enforced_before_capacity() {
    let ledger = InMemoryLedger::new();
    let clock = ManualClock::new(start());
    let issuing = flow_as(&ledger, address(0x01), &clock);
    let tranche = issuing
        .create_bond_tranche(params(1_000_000, 50_000, 200_000))
        .unwrap();
    let investing = flow_as(&ledger, address(0x02), &clock);

    let below = investing.allocate_bond(tranche.id, 10_000).unwrap_err();
    match below {
        FlowError::State(StateError::AmountOutOfBounds {
            amount,
            minimum,
            maximum,
        }) => {
            assert_eq!((amount, minimum, maximum), (10_000, 50_000, 200_000));
        }
        other => panic!("expected AmountOutOfBounds, got {other:?}"),
    }

    let above = investing.allocate_bond(tranche.id, 250_000).unwrap_err();
    assert!(matches!(
        above,
        FlowError::State(StateError::AmountOutOfBounds { .. })
    ));

    // Failed attempts left no trace.
    assert_eq!(
        issuing.tranche_info(tranche.id).unwrap().allocated_amount,
        0
    );
    assert_eq!(ledger.journal_len(), 1);
}

// ---------------------------------------------------------------------------
// Test: invalid issuance parameters never reach the ledger
// ---------------------------------------------------------------------------

#[test]
fn invalid_tranche_parameters_rejected_before_commit() {
    let ledger = InMemoryLedger::new();
    let clock = ManualClock::new(start());
    let issuing = flow_as(&ledger, address(0x01), &clock);

    // min > max
    assert!(issuing
        .create_bond_tranche(params(1_000_000, 600_000, 500_000))
        .is_err());
    // max > total
    assert!(issuing
        .create_bond_tranche(params(1_000_000, 10_000, 2_000_000))
        .is_err());
    // zero total
    assert!(issuing.create_bond_tranche(params(0, 0, 0)).is_err());

    assert_eq!(ledger.journal_len(), 0);
}
