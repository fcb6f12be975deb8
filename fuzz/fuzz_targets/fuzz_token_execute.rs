//! Fuzz target: BctToken::execute
//!
//! Feeds raw JSON actions with random callers and values to a seeded ledger.
//! The ledger must never panic, and after every call the balances must sum
//! to the supply and no reserve may appear or vanish.
//!
//! Run: cargo +nightly fuzz run fuzz_token_execute

#![no_main]
use arbitrary::Arbitrary;
use bct_core::{CurveConfig, WAD};
use bct_token::{BctAction, BctEvent, BctToken};
use libfuzzer_sys::fuzz_target;

const CALLERS: [&str; 3] = ["deployer", "alice", "bob"];

#[derive(Arbitrary, Debug)]
struct FuzzCall {
    caller_idx: u8,
    value: u64,
    action_json: String,
}

#[derive(Arbitrary, Debug)]
struct FuzzTokenInput {
    withdrawal_fee_bps: u16,
    calls: Vec<FuzzCall>,
}

fuzz_target!(|input: FuzzTokenInput| {
    let config = CurveConfig {
        initial_supply: 100_000 * WAD,
        initial_reserve: WAD,
        withdrawal_fee_bps: input.withdrawal_fee_bps % 10_001,
        ..CurveConfig::default()
    };
    let Ok(mut token) = BctToken::from_config(&config, CALLERS[0]) else {
        return;
    };

    let mut deposited = WAD;
    let mut paid_out = 0u128;

    // Cap the call count (prevent slow inputs)
    for call in input.calls.iter().take(32) {
        let Ok(action) = serde_json::from_str::<BctAction>(&call.action_json) else {
            continue;
        };
        let caller = CALLERS[call.caller_idx as usize % CALLERS.len()];
        let resp = token.execute(caller, call.value as u128, action);

        for event in &resp.events {
            match event {
                BctEvent::Minted { deposit, .. } => deposited += deposit,
                BctEvent::Burned { returned, .. } => paid_out += returned,
                BctEvent::Transfer { .. } => {}
            }
        }

        let sum: u128 = token.balances.values().sum();
        assert_eq!(sum, token.total_supply());
        assert_eq!(
            token.reserve_balance() + token.collected_fees() + paid_out,
            deposited
        );
    }
});
