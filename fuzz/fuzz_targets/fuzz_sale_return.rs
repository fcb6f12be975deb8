//! Fuzz target: BondingCurvePricer::sale_return
//!
//! The returned reserve must never exceed the reserve held, and selling the
//! whole supply must return all of it.
//!
//! Run: cargo +nightly fuzz run fuzz_sale_return

#![no_main]
use arbitrary::Arbitrary;
use bct_core::{BondingCurvePricer, CurveState, SaleRequest};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzSaleInput {
    total_supply: u128,
    reserve_balance: u128,
    sell_amount: u128,
}

fuzz_target!(|input: FuzzSaleInput| {
    let pricer = BondingCurvePricer::default();
    let state = CurveState::new(input.total_supply, input.reserve_balance);

    let Ok(returned) = pricer.sale_return(&state, &SaleRequest::new(input.sell_amount)) else {
        return;
    };
    assert!(returned <= state.reserve_balance);

    if input.sell_amount == state.total_supply {
        assert_eq!(returned, state.reserve_balance);
    }
    if input.sell_amount == 0 {
        assert_eq!(returned, 0);
    }

    let all = pricer
        .sale_return(&state, &SaleRequest::new(state.total_supply))
        .unwrap_or(0);
    assert!(returned <= all);
});
