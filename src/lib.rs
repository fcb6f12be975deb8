// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BCT SCENARIOS - shared fixtures for the end-to-end tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use bct_core::{CurveConfig, WAD};
use bct_token::BctToken;

/// Address holding the supply minted at deployment.
pub const DEPLOYER: &str = "0x0000000000000000000000000000000000000001";

/// Default deployment: 100 000 tokens to the deployer.
pub const INITIAL_TOKEN_SUPPLY: u128 = 100_000 * WAD;

/// Ledger seeded with `supply` tokens (to [`DEPLOYER`]) backed by `reserve`.
pub fn deploy(supply: u128, reserve: u128, withdrawal_fee_bps: u16) -> Result<BctToken, String> {
    let config = CurveConfig {
        initial_supply: supply,
        initial_reserve: reserve,
        withdrawal_fee_bps,
        ..CurveConfig::default()
    };
    BctToken::from_config(&config, DEPLOYER)
}

/// `n` distinct buyer addresses.
pub fn accounts(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("0x{:040x}", 0xb0b0 + i)).collect()
}
