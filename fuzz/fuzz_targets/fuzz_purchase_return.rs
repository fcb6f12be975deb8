//! Fuzz target: BondingCurvePricer::purchase_return
//!
//! Arbitrary curve states and deposits. The pricer must never panic, and an
//! accepted purchase must grow the supply monotonically in the deposit.
//!
//! Run: cargo +nightly fuzz run fuzz_purchase_return

#![no_main]
use arbitrary::Arbitrary;
use bct_core::{BondingCurvePricer, CurveState, PurchaseRequest};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzPurchaseInput {
    total_supply: u128,
    reserve_balance: u128,
    deposit: u128,
    extra: u64,
    bootstrap_ratio: u128,
}

fuzz_target!(|input: FuzzPurchaseInput| {
    let pricer = BondingCurvePricer::with_bootstrap_ratio(input.bootstrap_ratio)
        .unwrap_or_default();
    let state = CurveState::new(input.total_supply, input.reserve_balance);

    let Ok(minted) = pricer.purchase_return(&state, &PurchaseRequest::new(input.deposit)) else {
        return;
    };

    // A larger deposit never mints less
    if let Some(bigger) = input.deposit.checked_add(input.extra as u128) {
        if let Ok(more) = pricer.purchase_return(&state, &PurchaseRequest::new(bigger)) {
            assert!(more >= minted, "deposit {} minted {} but {} minted {}", input.deposit, minted, bigger, more);
        }
    }

    if let Ok(trade) = pricer.buy(&state, &PurchaseRequest::new(input.deposit)) {
        assert_eq!(trade.amount_out, minted);
        assert!(trade.state_after.validate().is_ok());
    }
});
