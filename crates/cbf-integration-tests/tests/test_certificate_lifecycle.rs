//! # Certificate Lifecycle — Integration Tests
//!
//! Issuance authorization, the one-certificate-per-allocation rule, and
//! redemption timing through the orchestrator with a manual clock.

use chrono::{DateTime, Duration, Utc};

use cbf_codec::PlaceholderCodec;
use cbf_core::{AddressId, RateBps};
use cbf_flow::{BondFlow, FlowError, ManualClock};
use cbf_ledger::{InMemoryLedger, StaticIdentity};
use cbf_state::{StateError, TrancheParams};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn issuer() -> AddressId {
    AddressId::new("0x00112233445566778899aabbccddeeff00112233").unwrap()
}

fn investor() -> AddressId {
    AddressId::new("0xaabbccddeeff00112233445566778899aabbccdd").unwrap()
}

fn stranger() -> AddressId {
    AddressId::new("0x9999999999999999999999999999999999999999").unwrap()
}

fn start() -> DateTime<Utc> {
    "2026-01-01T00:00:00Z".parse().unwrap()
}

fn params() -> TrancheParams {
    TrancheParams {
        name: "Series A".to_string(),
        description: "Certificate scenarios".to_string(),
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
// Test: double certification rejected with the existing certificate id
// ---------------------------------------------------------------------------

#[test]
fn second_certification_names_the_existing_certificate() {
    let ledger = InMemoryLedger::new();
    let clock = ManualClock::new(start());
    let issuing = flow_as(&ledger, issuer(), &clock);
    let investing = flow_as(&ledger, investor(), &clock);

    let tranche = issuing.create_bond_tranche(params()).unwrap();
    let allocation = investing.allocate_bond(tranche.id, 100_000).unwrap();
    let first = investing.issue_certificate(allocation.id).unwrap();

    // Investor retries, then the issuer tries too.
    for flow in [&investing, &issuing] {
        match flow.issue_certificate(allocation.id).unwrap_err() {
            FlowError::State(StateError::AllocationAlreadyCertified { certificate_id }) => {
                assert_eq!(certificate_id, first.id);
            }
            other => panic!("expected AllocationAlreadyCertified, got {other:?}"),
        }
    }
    assert_eq!(ledger.journal_len(), 3);
}

// ---------------------------------------------------------------------------
// Test: issuance authorization
// ---------------------------------------------------------------------------

#[test]
fn only_investor_or_issuer_may_certify() {
    let ledger = InMemoryLedger::new();
    let clock = ManualClock::new(start());
    let issuing = flow_as(&ledger, issuer(), &clock);
    let investing = flow_as(&ledger, investor(), &clock);

    let tranche = issuing.create_bond_tranche(params()).unwrap();
    let allocation = investing.allocate_bond(tranche.id, 100_000).unwrap();

    let err = flow_as(&ledger, stranger(), &clock)
        .issue_certificate(allocation.id)
        .unwrap_err();
    match err {
        FlowError::State(StateError::NotOwner { caller }) => assert_eq!(caller, stranger()),
        other => panic!("expected NotOwner, got {other:?}"),
    }

    // The issuer certifies on the investor's behalf; ownership still
    // follows the allocation.
    let certificate = issuing.issue_certificate(allocation.id).unwrap();
    assert_eq!(
        issuing.certificate_info(certificate.id).unwrap().owner,
        investor()
    );
}

// ---------------------------------------------------------------------------
// Test: redemption timing around the maturity boundary
// ---------------------------------------------------------------------------

#[test]
fn redemption_window_is_boundary_inclusive() {
    let ledger = InMemoryLedger::new();
    let clock = ManualClock::new(start());
    let issuing = flow_as(&ledger, issuer(), &clock);
    let investing = flow_as(&ledger, investor(), &clock);

    let tranche = issuing.create_bond_tranche(params()).unwrap();
    let allocation = investing.allocate_bond(tranche.id, 100_000).unwrap();
    let certificate = investing.issue_certificate(allocation.id).unwrap();
    let maturity = investing
        .certificate_info(certificate.id)
        .unwrap()
        .maturity_date;

    // One second short of maturity.
    clock.set(maturity - Duration::seconds(1));
    match investing.redeem_bond(certificate.id).unwrap_err() {
        FlowError::State(StateError::NotMatured {
            now,
            maturity_date,
        }) => {
            assert_eq!(now, maturity - Duration::seconds(1));
            assert_eq!(maturity_date, maturity);
        }
        other => panic!("expected NotMatured, got {other:?}"),
    }

    // Exactly at maturity.
    clock.set(maturity);
    investing.redeem_bond(certificate.id).unwrap();

    // Terminal: a second redemption attempt fails regardless of time.
    clock.advance(Duration::days(30));
    assert!(matches!(
        investing.redeem_bond(certificate.id).unwrap_err(),
        FlowError::State(StateError::AlreadyRedeemed)
    ));
}

// ---------------------------------------------------------------------------
// Test: only the owner redeems
// ---------------------------------------------------------------------------

#[test]
fn redemption_requires_ownership() {
    let ledger = InMemoryLedger::new();
    let clock = ManualClock::new(start());
    let issuing = flow_as(&ledger, issuer(), &clock);
    let investing = flow_as(&ledger, investor(), &clock);

    let tranche = issuing.create_bond_tranche(params()).unwrap();
    let allocation = investing.allocate_bond(tranche.id, 100_000).unwrap();
    let certificate = investing.issue_certificate(allocation.id).unwrap();

    clock.advance(Duration::days(365));

    // Not even the tranche issuer may redeem someone else's certificate.
    for outsider in [issuer(), stranger()] {
        assert!(matches!(
            flow_as(&ledger, outsider, &clock)
                .redeem_bond(certificate.id)
                .unwrap_err(),
            FlowError::State(StateError::NotOwner { .. })
        ));
    }
    assert!(
        !investing
            .certificate_info(certificate.id)
            .unwrap()
            .is_redeemed
    );

    investing.redeem_bond(certificate.id).unwrap();
}
