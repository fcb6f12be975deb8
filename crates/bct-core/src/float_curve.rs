// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DETERMINISM GATE: This entire module is EXCLUDED from `deterministic` builds.
// f64::sqrt/powi results may differ in the last ulp across targets.
// For estimates, UI display and cross-checking the fixed-point pricer only.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
#![cfg(not(feature = "deterministic"))]

//! Floating-point rendition of the bonding curve, in whole units
//! (`1.0` = one token / one ether).
//!
//! Same validation and bootstrap rule as [`crate::BondingCurvePricer`];
//! additionally rejects negative and non-finite inputs, which the u128
//! pricer cannot represent. Amounts that move real balances must go
//! through the fixed-point pricer.

use crate::error::CurveError;
use crate::{DECIMALS, WAD};

/// Tokens minted per reserve unit on an empty curve, unless overridden.
pub const BOOTSTRAP_RATIO: f64 = 1.0;

/// `total_supply * (sqrt(1 + deposit_amount / reserve_balance) - 1)`
pub fn purchase_return(
    total_supply: f64,
    reserve_balance: f64,
    deposit_amount: f64,
) -> Result<f64, CurveError> {
    purchase_return_with_ratio(total_supply, reserve_balance, deposit_amount, BOOTSTRAP_RATIO)
}

/// [`purchase_return`] with an explicit bootstrap ratio (tokens per
/// reserve unit on an empty curve), matching
/// [`crate::BondingCurvePricer::with_bootstrap_ratio`].
pub fn purchase_return_with_ratio(
    total_supply: f64,
    reserve_balance: f64,
    deposit_amount: f64,
    bootstrap_ratio: f64,
) -> Result<f64, CurveError> {
    if !deposit_amount.is_finite() || deposit_amount <= 0.0 {
        return Err(CurveError::InvalidInput(format!(
            "deposit amount must be finite and > 0, got {}",
            deposit_amount
        )));
    }
    if !bootstrap_ratio.is_finite() || bootstrap_ratio <= 0.0 {
        return Err(CurveError::InvalidInput(format!(
            "bootstrap ratio must be finite and > 0, got {}",
            bootstrap_ratio
        )));
    }
    validate_state(total_supply, reserve_balance)?;

    if total_supply == 0.0 {
        return Ok(deposit_amount * bootstrap_ratio);
    }

    Ok(total_supply * ((1.0 + deposit_amount / reserve_balance).sqrt() - 1.0))
}

/// `reserve_balance * (1 - (1 - sell_amount / total_supply)^2)`
pub fn sale_return(
    total_supply: f64,
    reserve_balance: f64,
    sell_amount: f64,
) -> Result<f64, CurveError> {
    validate_state(total_supply, reserve_balance)?;
    if total_supply == 0.0 {
        return Err(CurveError::InvalidState(
            "no tokens in circulation to sell".to_string(),
        ));
    }
    if !sell_amount.is_finite() || sell_amount < 0.0 || sell_amount > total_supply {
        return Err(CurveError::InvalidInput(format!(
            "sell amount must be within [0, {}], got {}",
            total_supply, sell_amount
        )));
    }

    Ok(reserve_balance * (1.0 - (1.0 - sell_amount / total_supply).powi(2)))
}

/// Base units to whole units (lossy).
pub fn from_base_units(amount: u128) -> f64 {
    amount as f64 / WAD as f64
}

/// Whole units to base units, truncating below 10^-18. `None` for negative
/// or non-finite input or values beyond u128.
pub fn to_base_units(amount: f64) -> Option<u128> {
    if !amount.is_finite() || amount < 0.0 {
        return None;
    }
    let scaled = amount * 10f64.powi(DECIMALS as i32);
    if scaled >= u128::MAX as f64 {
        return None;
    }
    Some(scaled as u128)
}

fn validate_state(total_supply: f64, reserve_balance: f64) -> Result<(), CurveError> {
    if !total_supply.is_finite() || total_supply < 0.0 {
        return Err(CurveError::InvalidState(format!(
            "total supply must be finite and >= 0, got {}",
            total_supply
        )));
    }
    if !reserve_balance.is_finite() || reserve_balance < 0.0 {
        return Err(CurveError::InvalidState(format!(
            "reserve balance must be finite and >= 0, got {}",
            reserve_balance
        )));
    }
    if (total_supply == 0.0) != (reserve_balance == 0.0) {
        return Err(CurveError::InvalidState(format!(
            "supply {} and reserve {} must be both zero or both positive",
            total_supply, reserve_balance
        )));
    }
    Ok(())
}
