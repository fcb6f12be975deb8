// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PROPERTY-BASED TESTS - bct-core
//
// Curve invariants that MUST hold for ALL valid states and requests.
// proptest generates thousands of random inputs per property.
//
// Run: cargo test --release -p bct-core --test prop_core
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use bct_core::{
    format_ether, parse_ether, BondingCurvePricer, CurveError, CurveState, PurchaseRequest,
    SaleRequest, WAD,
};
use proptest::prelude::*;

/// 1 token .. 10^9 tokens
const MIN_SUPPLY: u128 = WAD;
const MAX_SUPPLY: u128 = 1_000_000_000 * WAD;
/// 0.001 ether .. 10^6 ether
const MIN_RESERVE: u128 = WAD / 1_000;
const MAX_RESERVE: u128 = 1_000_000 * WAD;

fn arb_state() -> impl Strategy<Value = CurveState> {
    (MIN_SUPPLY..=MAX_SUPPLY, MIN_RESERVE..=MAX_RESERVE)
        .prop_map(|(supply, reserve)| CurveState::new(supply, reserve))
}

fn arb_state_and_fraction() -> impl Strategy<Value = (CurveState, u128)> {
    (arb_state(), 0u128..=1_000_000u128).prop_map(|(state, ppm)| {
        let amount = state.total_supply / 1_000_000 * ppm;
        (state, amount)
    })
}

fn pricer() -> BondingCurvePricer {
    BondingCurvePricer::new()
}

// ─────────────────────────────────────────────────────────────────
// PURCHASE PROPERTIES
// ─────────────────────────────────────────────────────────────────

proptest! {
    /// PROPERTY: a deposit into a live curve either mints something or is
    /// rejected as too small, exactly when it is below the one-unit quote
    #[test]
    fn prop_purchase_positive(state in arb_state(), deposit in 1u128..=1_000 * WAD) {
        let p = pricer();
        let one_unit = p.deposit_for_tokens(&state, 1).unwrap();
        match p.purchase_return(&state, &PurchaseRequest::new(deposit)) {
            Ok(minted) => {
                prop_assert!(minted > 0, "deposit {} minted nothing on {:?}", deposit, state);
                prop_assert!(deposit >= one_unit);
            }
            Err(e) => {
                prop_assert!(e.is_invalid_input(), "{}", e);
                prop_assert!(deposit < one_unit, "deposit {} >= quote {}", deposit, one_unit);
            }
        }
    }

    /// PROPERTY: a larger deposit never mints fewer tokens
    #[test]
    fn prop_purchase_monotonic(
        state in arb_state(),
        d1 in 1u128..=1_000 * WAD,
        extra in 1u128..=1_000 * WAD,
    ) {
        let p = pricer();
        // dust deposits are rejected; count them as minting nothing
        let small = p.purchase_return(&state, &PurchaseRequest::new(d1)).unwrap_or(0);
        let large = p.purchase_return(&state, &PurchaseRequest::new(d1 + extra)).unwrap_or(0);
        prop_assert!(large >= small);
    }

    /// PROPERTY: once the deposit moves the exact result by a whole unit,
    /// the minted amount strictly increases
    #[test]
    fn prop_purchase_strictly_increasing(state in arb_state(), d1 in WAD / 1_000..=100 * WAD) {
        let p = pricer();
        let small = p.purchase_return(&state, &PurchaseRequest::new(d1)).unwrap();
        let large = p.purchase_return(&state, &PurchaseRequest::new(d1 * 2)).unwrap();
        prop_assert!(large > small);
    }

    /// PROPERTY: zero deposit is always InvalidInput
    #[test]
    fn prop_zero_deposit_rejected(state in arb_state()) {
        let err = pricer().purchase_return(&state, &PurchaseRequest::new(0)).unwrap_err();
        prop_assert!(matches!(err, CurveError::InvalidInput(_)));
    }

    /// PROPERTY: bootstrap lands on a valid state with reserve == deposit
    #[test]
    fn prop_bootstrap_defined(deposit in 1u128..=u64::MAX as u128) {
        let trade = pricer().buy(&CurveState::empty(), &PurchaseRequest::new(deposit)).unwrap();
        prop_assert!(trade.amount_out > 0);
        prop_assert_eq!(trade.state_after.reserve_balance, deposit);
        prop_assert!(trade.state_after.validate().is_ok());
    }
}

// ─────────────────────────────────────────────────────────────────
// SALE PROPERTIES
// ─────────────────────────────────────────────────────────────────

proptest! {
    /// PROPERTY: selling the entire supply returns exactly the reserve
    #[test]
    fn prop_full_sale_drains_reserve(state in arb_state()) {
        let returned = pricer()
            .sale_return(&state, &SaleRequest::new(state.total_supply))
            .unwrap();
        prop_assert_eq!(returned, state.reserve_balance);
    }

    /// PROPERTY: selling nothing returns nothing
    #[test]
    fn prop_zero_sale_returns_zero(state in arb_state()) {
        prop_assert_eq!(pricer().sale_return(&state, &SaleRequest::new(0)).unwrap(), 0);
    }

    /// PROPERTY: sale return is non-decreasing in the amount sold and
    /// never exceeds the reserve
    #[test]
    fn prop_sale_monotonic((state, a1) in arb_state_and_fraction(), ppm in 0u128..=1_000_000u128) {
        let p = pricer();
        let a2 = a1 + (state.total_supply - a1) / 1_000_000 * ppm;
        let r1 = p.sale_return(&state, &SaleRequest::new(a1)).unwrap();
        let r2 = p.sale_return(&state, &SaleRequest::new(a2)).unwrap();
        prop_assert!(r2 >= r1);
        prop_assert!(r2 <= state.reserve_balance);
    }

    /// PROPERTY: overselling is always InvalidInput
    #[test]
    fn prop_oversell_rejected(state in arb_state(), excess in 1u128..=WAD) {
        let err = pricer()
            .sale_return(&state, &SaleRequest::new(state.total_supply + excess))
            .unwrap_err();
        prop_assert!(matches!(err, CurveError::InvalidInput(_)));
    }

    /// PROPERTY: a partial sale keeps the curve in a valid state
    #[test]
    fn prop_sale_state_valid((state, amount) in arb_state_and_fraction()) {
        let trade = pricer().sell(&state, &SaleRequest::new(amount)).unwrap();
        prop_assert!(trade.state_after.validate().is_ok());
        prop_assert_eq!(trade.state_after.total_supply, state.total_supply - amount);
    }
}

// ─────────────────────────────────────────────────────────────────
// ROUND TRIP
// ─────────────────────────────────────────────────────────────────

proptest! {
    /// PROPERTY: mint then immediately sell back returns the deposit minus
    /// rounding: never more, and never less than one token unit's worth
    #[test]
    fn prop_round_trip_near_identity(state in arb_state(), deposit in WAD / 1_000..=1_000 * WAD) {
        let p = pricer();
        let buy = p.buy(&state, &PurchaseRequest::new(deposit)).unwrap();
        let sell = p.sell(&buy.state_after, &SaleRequest::new(buy.amount_out)).unwrap();

        prop_assert!(sell.amount_out <= deposit, "paid out {} for {}", sell.amount_out, deposit);
        let loss = deposit - sell.amount_out;
        // minted is short by < 1 base unit, worth at most 2R/S reserve
        let after = buy.state_after;
        let tolerance = 2 * after.reserve_balance / after.total_supply + 2;
        prop_assert!(loss <= tolerance, "loss {} on {} (tolerance {})", loss, deposit, tolerance);
        prop_assert_eq!(sell.state_after.total_supply, state.total_supply);
    }

    /// PROPERTY: the deposit quote always buys at least the quoted tokens
    #[test]
    fn prop_deposit_quote_sufficient(state in arb_state(), tokens in WAD..=1_000_000 * WAD) {
        let p = pricer();
        let deposit = p.deposit_for_tokens(&state, tokens).unwrap();
        let minted = p.purchase_return(&state, &PurchaseRequest::new(deposit)).unwrap();
        prop_assert!(minted >= tokens);
    }
}

// ─────────────────────────────────────────────────────────────────
// UNIT STRINGS
// ─────────────────────────────────────────────────────────────────

proptest! {
    /// PROPERTY: formatting then parsing is lossless for every amount
    #[test]
    fn prop_format_parse_lossless(amount in any::<u128>()) {
        prop_assert_eq!(parse_ether(&format_ether(amount)).unwrap(), amount);
    }
}
