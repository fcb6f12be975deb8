// ========================================
// INTEGRATION TESTS FOR BONDING CURVE TOKEN (BCT)
// ========================================
//
// Test Scenarios:
// 1. Mint with 1 ether against a 100 000 token supply
// 2. Mint without value reverts
// 3. Bootstrap of an empty curve
// 4. Full redemption drains the reserve
// 5. Mint → burn round trip
// 6. Withdrawal fee accounting
// 7. JSON ABI round trip
// 8. Concurrent traders through SharedToken
//
// Usage:
//   cargo test --test integration_test -- --nocapture
//
// ========================================

use bct_core::float_curve::{self, from_base_units};
use bct_core::{parse_ether, CurveState, WAD};
use bct_scenarios::{accounts, deploy, DEPLOYER, INITIAL_TOKEN_SUPPLY};
use bct_token::{BctAction, BctEvent, BctResponse, BctToken, SharedToken, MUST_SEND_ETHER};
use std::thread;

fn assert_ledger_consistent(token: &BctToken) {
    let sum: u128 = token.balances.values().sum();
    assert_eq!(sum, token.total_supply(), "balances must sum to supply");
    assert!(token.curve_state().validate().is_ok());
}

// ========================================
// TEST 1: MINT WITH ONE ETHER
// ========================================
#[test]
fn test_mint_one_ether_matches_closed_form() {
    println!("\n🧪 TEST 1: Mint with 1 ether");

    for reserve in ["1", "2", "0.5", "37.25"] {
        let reserve = parse_ether(reserve).unwrap();
        let mut token = deploy(INITIAL_TOKEN_SUPPLY, reserve, 0).unwrap();
        let buyer = &accounts(1)[0];
        let deposit = parse_ether("1").unwrap();

        let resp = token.execute(buyer, deposit, BctAction::Mint);
        assert!(resp.success, "{}", resp.message);

        let expected = float_curve::purchase_return(
            from_base_units(INITIAL_TOKEN_SUPPLY),
            from_base_units(reserve),
            from_base_units(deposit),
        )
        .unwrap();
        let balance = token.balance_of(buyer);

        assert!(balance > 0);
        // within one whole token of the closed form
        assert!(
            (from_base_units(balance) - expected).abs() < 1.0,
            "reserve {}: got {} expected {}",
            reserve,
            from_base_units(balance),
            expected
        );
        // and in practice far closer
        assert!((from_base_units(balance) - expected).abs() < 1e-6);
        assert_eq!(token.reserve_balance(), reserve + deposit);
        assert_ledger_consistent(&token);

        println!("✅ reserve {} → minted {}", from_base_units(reserve), from_base_units(balance));
    }
}

// ========================================
// TEST 2: MINT WITHOUT VALUE
// ========================================
#[test]
fn test_mint_without_ether_reverts() {
    println!("\n🧪 TEST 2: Mint without value");

    let mut token = deploy(INITIAL_TOKEN_SUPPLY, WAD, 0).unwrap();
    let before = token.curve_state();

    let resp = token.execute(&accounts(1)[0], 0, BctAction::Mint);
    assert!(!resp.success);
    assert_eq!(resp.message, "ERC20: Must send ether to buy tokens.");
    assert_eq!(resp.message, MUST_SEND_ETHER);
    assert!(resp.events.is_empty());
    assert_eq!(token.curve_state(), before);

    println!("✅ reverted: {}", resp.message);
}

// ========================================
// TEST 3: BOOTSTRAP
// ========================================
#[test]
fn test_bootstrap_empty_curve() {
    println!("\n🧪 TEST 3: Bootstrap");

    let mut token = deploy(0, 0, 0).unwrap();
    assert!(token.curve_state().is_empty());

    let buyer = &accounts(1)[0];
    let resp = token.execute(buyer, 1, BctAction::Mint);
    assert!(resp.success, "{}", resp.message);

    let state = token.curve_state();
    assert!(state.total_supply > 0);
    assert_eq!(state.reserve_balance, 1);

    // the next purchase prices off the curve
    let resp = token.execute(buyer, 3, BctAction::Mint);
    assert!(resp.success);
    // (1, 1) + 3 → supply √4 = 2
    assert_eq!(token.curve_state(), CurveState::new(2, 4));

    println!("✅ bootstrapped to {:?}", token.curve_state());
}

// ========================================
// TEST 4: FULL REDEMPTION
// ========================================
#[test]
fn test_full_redemption_drains_reserve() {
    println!("\n🧪 TEST 4: Full redemption");

    let mut token = deploy(INITIAL_TOKEN_SUPPLY, WAD, 0).unwrap();
    let buyers = accounts(3);
    for (i, buyer) in buyers.iter().enumerate() {
        let resp = token.execute(buyer, (i as u128 + 1) * WAD, BctAction::Mint);
        assert!(resp.success);
    }
    let total_reserve = token.reserve_balance();
    assert_eq!(total_reserve, 7 * WAD);

    let mut paid_out = 0u128;
    let holders: Vec<String> = std::iter::once(DEPLOYER.to_string())
        .chain(buyers)
        .collect();
    for holder in &holders {
        let amount = token.balance_of(holder);
        let resp = token.execute(holder, 0, BctAction::Burn { amount });
        assert!(resp.success, "{}", resp.message);
        paid_out += resp.amount().unwrap();
        assert_ledger_consistent(&token);
    }

    assert_eq!(paid_out, total_reserve);
    assert!(token.curve_state().is_empty());
    println!("✅ {} holders redeemed {} reserve", holders.len(), from_base_units(paid_out));
}

// ========================================
// TEST 5: ROUND TRIP
// ========================================
#[test]
fn test_mint_burn_round_trip() {
    println!("\n🧪 TEST 5: Mint → burn round trip");

    let mut token = deploy(INITIAL_TOKEN_SUPPLY, WAD, 0).unwrap();
    let buyer = &accounts(1)[0];

    for deposit in ["0.001", "1", "250"] {
        let deposit = parse_ether(deposit).unwrap();
        let before = token.curve_state();

        let minted = token.execute(buyer, deposit, BctAction::Mint).amount().unwrap();
        let back = token
            .execute(buyer, 0, BctAction::Burn { amount: minted })
            .amount()
            .unwrap();

        assert!(back <= deposit);
        assert!(deposit - back < 1_000_000, "lost {} wei", deposit - back);
        assert_eq!(token.total_supply(), before.total_supply);
        // rounding dust stays in the reserve
        assert!(token.reserve_balance() >= before.reserve_balance);
    }
    assert_ledger_consistent(&token);
    println!("✅ round trips never paid out more than deposited");
}

// ========================================
// TEST 6: WITHDRAWAL FEE
// ========================================
#[test]
fn test_withdrawal_fee_accounting() {
    println!("\n🧪 TEST 6: Withdrawal fee");

    // 10%
    let mut token = deploy(INITIAL_TOKEN_SUPPLY, 4 * WAD, 1_000).unwrap();
    let resp = token.execute(DEPLOYER, 0, BctAction::Burn { amount: INITIAL_TOKEN_SUPPLY / 2 });
    assert!(resp.success);

    let gross = float_curve::sale_return(100_000.0, 4.0, 50_000.0).unwrap();
    assert_eq!(gross, 3.0);
    assert_eq!(resp.amount(), Some(3 * WAD * 9 / 10));
    assert_eq!(token.collected_fees(), 3 * WAD / 10);
    assert_eq!(token.reserve_balance(), WAD);

    match &resp.events[..] {
        [BctEvent::Burned { returned, fee, .. }] => {
            assert_eq!(returned + fee, 3 * WAD);
        }
        other => panic!("Expected one Burned event, got {:?}", other),
    }
    println!("✅ fee {} kept", from_base_units(token.collected_fees()));
}

// ========================================
// TEST 7: JSON ABI
// ========================================
#[test]
fn test_json_abi_round_trip() {
    println!("\n🧪 TEST 7: JSON ABI");

    let mut token = deploy(INITIAL_TOKEN_SUPPLY, WAD, 0).unwrap();
    let buyer = &accounts(1)[0];

    let calls = [
        (WAD, r#"{"action":"Mint"}"#),
        (0, r#"{"action":"QuoteBurn","amount":"1000000000000000000000"}"#),
        (0, r#"{"action":"ReserveBalance"}"#),
        (0, r#"{"action":"TokenInfo"}"#),
    ];
    for (value, call) in calls {
        let action: BctAction = serde_json::from_str(call).unwrap();
        let resp = token.execute(buyer, value, action);
        assert!(resp.success, "{}: {}", call, resp.message);

        let wire = serde_json::to_string(&resp).unwrap();
        let back: BctResponse = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, resp);
    }

    let info = token.execute(buyer, 0, BctAction::TokenInfo);
    let info: serde_json::Value = serde_json::from_str(info.data.as_deref().unwrap()).unwrap();
    assert_eq!(info["symbol"], "BCT");
    assert_eq!(info["reserve_balance"], "2000000000000000000");
    println!("✅ actions, responses and events survive JSON");
}

// ========================================
// TEST 8: CONCURRENT TRADERS
// ========================================
#[test]
fn test_concurrent_traders() {
    println!("\n🧪 TEST 8: Concurrent traders");

    let shared = SharedToken::new(deploy(INITIAL_TOKEN_SUPPLY, WAD, 250).unwrap());
    let traders = accounts(6);

    let handles: Vec<_> = traders
        .into_iter()
        .enumerate()
        .map(|(i, trader)| {
            let shared = shared.clone();
            thread::spawn(move || {
                let mut deposited = 0u128;
                let mut received = 0u128;
                for round in 0..20u128 {
                    let deposit = WAD / 100 * (i as u128 + 1) + round;
                    let resp = shared.execute(&trader, deposit, BctAction::Mint);
                    assert!(resp.success, "{}", resp.message);
                    deposited += deposit;

                    if round % 3 == 2 {
                        let amount = shared.read(|t| t.balance_of(&trader)) / 2;
                        let resp = shared.execute(&trader, 0, BctAction::Burn { amount });
                        assert!(resp.success, "{}", resp.message);
                        received += resp.amount().unwrap();
                    }
                }
                (deposited, received)
            })
        })
        .collect();

    let (mut deposited, mut received) = (0u128, 0u128);
    for handle in handles {
        let (d, r) = handle.join().unwrap();
        deposited += d;
        received += r;
    }

    let token = shared.snapshot();
    assert_ledger_consistent(&token);
    assert_eq!(
        token.reserve_balance() + token.collected_fees() + received,
        WAD + deposited,
        "every unit of reserve is accounted for"
    );
    println!(
        "✅ supply {} reserve {} fees {}",
        from_base_units(token.total_supply()),
        from_base_units(token.reserve_balance()),
        from_base_units(token.collected_fees())
    );
}
