//! # Proof Journal — Audit Integration Tests
//!
//! Every committed transition retains a verifiable proof token bound to
//! its operation name; the ledger rejects transitions whose token does
//! not attest, and the journal supports a full post-hoc audit.

use chrono::{DateTime, Duration, Utc};

use cbf_codec::PlaceholderCodec;
use cbf_core::{AddressId, RateBps};
use cbf_flow::{BondFlow, Clock, ManualClock};
use cbf_ledger::{op, InMemoryLedger, Ledger, LedgerError, StaticIdentity};
use cbf_proof::{ProofEngine, ProofToken};
use cbf_state::{Tranche, TrancheParams};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn issuer() -> AddressId {
    AddressId::new("0x00112233445566778899aabbccddeeff00112233").unwrap()
}

fn investor() -> AddressId {
    AddressId::new("0xaabbccddeeff00112233445566778899aabbccdd").unwrap()
}

fn start() -> DateTime<Utc> {
    "2026-01-01T00:00:00Z".parse().unwrap()
}

fn params() -> TrancheParams {
    TrancheParams {
        name: "Audited".to_string(),
        description: "Audit scenarios".to_string(),
        total_amount: 1_000_000,
        minimum_investment: 10_000,
        maximum_investment: 500_000,
        interest_rate: RateBps::new(525).unwrap(),
        maturity_period_secs: 86_400 * 365,
    }
}

fn flow_as<'a>(
    ledger: &'a InMemoryLedger,
    caller: AddressId,
    clock: &'a ManualClock,
) -> BondFlow<&'a InMemoryLedger, StaticIdentity, PlaceholderCodec, &'a ManualClock> {
    BondFlow::with_parts(ledger, StaticIdentity::new(caller), PlaceholderCodec, clock)
}

// ---------------------------------------------------------------------------
// Test: one verifiable proof per lifecycle transition
// ---------------------------------------------------------------------------

#[test]
fn journal_holds_one_attesting_proof_per_transition() {
    let ledger = InMemoryLedger::new();
    let clock = ManualClock::new(start());
    let issuing = flow_as(&ledger, issuer(), &clock);
    let investing = flow_as(&ledger, investor(), &clock);
    let engine = ProofEngine;

    let tranche = issuing.create_bond_tranche(params()).unwrap();
    let allocation = investing.allocate_bond(tranche.id, 250_000).unwrap();
    let certificate = investing.issue_certificate(allocation.id).unwrap();
    clock.advance(Duration::days(365));
    let redemption = investing.redeem_bond(certificate.id).unwrap();

    let expectations = [
        (tranche.handle, op::CREATE_BOND_TRANCHE),
        (allocation.handle, op::ALLOCATE_BOND),
        (certificate.handle, op::ISSUE_CERTIFICATE),
        (redemption.handle, op::REDEEM_BOND),
    ];
    for (handle, operation) in expectations {
        let committed = ledger.operation(handle).unwrap();
        assert_eq!(committed.operation, operation);
        assert!(engine.verify(&committed.proof, operation));
        // Bound to exactly one operation name.
        for (_, other) in &expectations {
            if *other != operation {
                assert!(!engine.verify(&committed.proof, other));
            }
        }
    }
    assert_eq!(ledger.journal_len(), 4);
}

// ---------------------------------------------------------------------------
// Test: the ledger refuses non-attesting proofs
// ---------------------------------------------------------------------------

#[test]
fn ledger_rejects_mismatched_and_tampered_proofs() {
    let ledger = InMemoryLedger::new();
    let clock = ManualClock::new(start());
    let engine = ProofEngine;
    let tranche = Tranche::new(issuer(), params(), clock.now()).unwrap();

    // A structurally valid token bound to the wrong operation.
    let wrong_op = engine
        .create_at(op::REDEEM_BOND, serde_json::json!({}), clock.now())
        .unwrap();
    let err = ledger
        .submit_tranche(tranche.clone(), wrong_op)
        .unwrap_err();
    match err {
        LedgerError::ProofVerificationFailed { operation } => {
            assert_eq!(operation, op::CREATE_BOND_TRANCHE);
        }
        other => panic!("expected ProofVerificationFailed, got {other:?}"),
    }

    // A garbage token.
    let garbage = ProofToken {
        payload_hex: "not hex at all".to_string(),
        digest_hex: String::new(),
    };
    assert!(matches!(
        ledger.submit_tranche(tranche.clone(), garbage).unwrap_err(),
        LedgerError::ProofVerificationFailed { .. }
    ));

    // A correct token still commits.
    let good = engine
        .create_at(op::CREATE_BOND_TRANCHE, serde_json::json!({}), clock.now())
        .unwrap();
    ledger.submit_tranche(tranche, good).unwrap();
    assert_eq!(ledger.journal_len(), 1);
}

// ---------------------------------------------------------------------------
// Test: journaled payloads reconstruct the audited inputs
// ---------------------------------------------------------------------------

#[test]
fn journaled_payload_reflects_the_operation_inputs() {
    let ledger = InMemoryLedger::new();
    let clock = ManualClock::new(start());
    let issuing = flow_as(&ledger, issuer(), &clock);

    let tranche = issuing.create_bond_tranche(params()).unwrap();
    let committed = ledger.operation(tranche.handle).unwrap();
    let data = committed.proof.data().unwrap();

    assert_eq!(data["name"], "Audited");
    assert_eq!(data["total_amount"], 1_000_000);
    assert_eq!(data["interest_rate_bps"], 525);
    assert_eq!(committed.proof.created_at().unwrap(), start());
}
