//! # Quadratic Bonding Curve (reserve ratio 0.5)
//!
//! With a constant reserve ratio of one half, reserve and supply are tied
//! by `R = k·S²`. Solving that invariant for a deposit or a redemption
//! gives the two pricing formulas:
//!
//! ```text
//! minted   = S · (√(1 + D / R) − 1)       (buy with D reserve)
//! returned = R · (1 − (1 − A / S)²)       (sell A tokens)
//! ```
//!
//! ## Fixed-point evaluation
//!
//! Both are evaluated on u128 base units (18 decimals) through 512-bit
//! intermediates, so no step can overflow before the final narrowing:
//!
//! ```text
//! minted   = ⌊√(S² · (R + D) / R)⌋ − S
//! returned = ⌊R · A · (2S − A) / S²⌋
//! ```
//!
//! Every division rounds down: the buyer never receives more tokens and the
//! seller never more reserve than the exact curve allows. Selling the whole
//! supply is exact (`A = S` gives `R·S²/S² = R`) and drains the reserve.
//!
//! ## Bootstrap
//!
//! An empty curve (`S = 0, R = 0`) has no defined price. The first purchase
//! mints at a fixed bootstrap ratio (1:1 by default), which places the
//! curve at `{S: minted, R: deposit}`.

use crate::error::CurveError;
use crate::{serde_u128, DEFAULT_BOOTSTRAP_RATIO, RESERVE_RATIO_PPM, WAD};
use serde::{Deserialize, Serialize};

mod wide {
    #![allow(clippy::all)]
    uint::construct_uint! {
        /// 512-bit unsigned integer for curve intermediates.
        pub struct U512(8);
    }
}

use wide::U512;

/// Position of the curve: tokens in circulation and reserve held against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CurveState {
    #[serde(with = "serde_u128")]
    pub total_supply: u128,
    #[serde(with = "serde_u128")]
    pub reserve_balance: u128,
}

impl CurveState {
    pub const fn new(total_supply: u128, reserve_balance: u128) -> Self {
        Self {
            total_supply,
            reserve_balance,
        }
    }

    /// The uninitialized curve at the origin.
    pub const fn empty() -> Self {
        Self::new(0, 0)
    }

    /// True before the first purchase (both sides zero).
    pub fn is_empty(&self) -> bool {
        self.total_supply == 0 && self.reserve_balance == 0
    }

    /// Supply and reserve must be both zero or both positive.
    pub fn validate(&self) -> Result<(), CurveError> {
        match (self.total_supply, self.reserve_balance) {
            (0, r) if r > 0 => Err(CurveError::InvalidState(format!(
                "reserve balance {} with zero total supply",
                r
            ))),
            (s, 0) if s > 0 => Err(CurveError::InvalidState(format!(
                "total supply {} with zero reserve balance",
                s
            ))),
            _ => Ok(()),
        }
    }

    /// State after `deposit` reserve bought `minted` tokens.
    pub fn apply_purchase(&self, deposit: u128, minted: u128) -> Result<Self, CurveError> {
        let total_supply = self
            .total_supply
            .checked_add(minted)
            .ok_or_else(|| CurveError::Overflow("total supply exceeds u128".to_string()))?;
        let reserve_balance = self
            .reserve_balance
            .checked_add(deposit)
            .ok_or_else(|| CurveError::Overflow("reserve balance exceeds u128".to_string()))?;
        let next = Self::new(total_supply, reserve_balance);
        next.validate()?;
        Ok(next)
    }

    /// State after `burned` tokens were redeemed for `returned` reserve.
    pub fn apply_sale(&self, burned: u128, returned: u128) -> Result<Self, CurveError> {
        let total_supply = self.total_supply.checked_sub(burned).ok_or_else(|| {
            CurveError::InvalidInput(format!(
                "cannot burn {} of {} tokens",
                burned, self.total_supply
            ))
        })?;
        let reserve_balance = self.reserve_balance.checked_sub(returned).ok_or_else(|| {
            CurveError::InvalidInput(format!(
                "cannot release {} of {} reserve",
                returned, self.reserve_balance
            ))
        })?;
        let next = Self::new(total_supply, reserve_balance);
        next.validate()?;
        Ok(next)
    }
}

/// Reserve offered to buy tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    #[serde(with = "serde_u128")]
    pub deposit_amount: u128,
}

impl PurchaseRequest {
    pub const fn new(deposit_amount: u128) -> Self {
        Self { deposit_amount }
    }
}

/// Tokens surrendered to redeem reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRequest {
    #[serde(with = "serde_u128")]
    pub sell_amount: u128,
}

impl SaleRequest {
    pub const fn new(sell_amount: u128) -> Self {
        Self { sell_amount }
    }
}

/// A priced purchase or sale together with the state it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(with = "serde_u128")]
    pub amount_in: u128,
    #[serde(with = "serde_u128")]
    pub amount_out: u128,
    pub state_before: CurveState,
    pub state_after: CurveState,
}

/// Stateless pricer for the reserve-ratio-0.5 curve.
///
/// Only the bootstrap ratio is configurable; the curve state is passed in
/// on every call and never retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondingCurvePricer {
    #[serde(with = "serde_u128")]
    bootstrap_ratio: u128,
}

impl Default for BondingCurvePricer {
    fn default() -> Self {
        Self::new()
    }
}

impl BondingCurvePricer {
    /// Pricer with the 1:1 bootstrap ratio.
    pub const fn new() -> Self {
        Self {
            bootstrap_ratio: DEFAULT_BOOTSTRAP_RATIO,
        }
    }

    /// Pricer whose first purchase mints `ratio / 10^18` tokens per reserve unit.
    pub fn with_bootstrap_ratio(ratio: u128) -> Result<Self, CurveError> {
        if ratio == 0 {
            return Err(CurveError::InvalidInput(
                "bootstrap ratio must be > 0".to_string(),
            ));
        }
        Ok(Self {
            bootstrap_ratio: ratio,
        })
    }

    pub fn bootstrap_ratio(&self) -> u128 {
        self.bootstrap_ratio
    }

    /// Tokens minted for a deposit: `S · (√(1 + D/R) − 1)`, rounded down.
    ///
    /// On an empty curve the deposit is converted at the bootstrap ratio.
    /// A deposit that rounds down to zero tokens is `InvalidInput`, on a
    /// live curve and at bootstrap alike.
    pub fn purchase_return(
        &self,
        state: &CurveState,
        request: &PurchaseRequest,
    ) -> Result<u128, CurveError> {
        if request.deposit_amount == 0 {
            return Err(CurveError::InvalidInput(
                "deposit amount must be greater than zero".to_string(),
            ));
        }
        state.validate()?;

        if state.is_empty() {
            return self.bootstrap_mint(request.deposit_amount);
        }

        let s = U512::from(state.total_supply);
        let r = U512::from(state.reserve_balance);
        let d = U512::from(request.deposit_amount);

        // S²·(R + D)/R split as S² + S²·D/R keeps the floor exact
        let s_sq = s * s;
        let new_supply = isqrt(s_sq + s_sq * d / r);

        let minted = narrow(new_supply - s, "minted tokens")?;
        if minted == 0 {
            return Err(CurveError::InvalidInput(format!(
                "deposit {} too small to mint any tokens",
                request.deposit_amount
            )));
        }
        Ok(minted)
    }

    /// Reserve released for a sale: `R · (1 − (1 − A/S)²)`, rounded down.
    pub fn sale_return(
        &self,
        state: &CurveState,
        request: &SaleRequest,
    ) -> Result<u128, CurveError> {
        state.validate()?;
        if state.total_supply == 0 {
            return Err(CurveError::InvalidState(
                "no tokens in circulation to sell".to_string(),
            ));
        }
        if request.sell_amount > state.total_supply {
            return Err(CurveError::InvalidInput(format!(
                "sell amount {} exceeds total supply {}",
                request.sell_amount, state.total_supply
            )));
        }

        if request.sell_amount == 0 {
            return Ok(0);
        }
        if request.sell_amount == state.total_supply {
            return Ok(state.reserve_balance);
        }

        let s = U512::from(state.total_supply);
        let r = U512::from(state.reserve_balance);
        let a = U512::from(request.sell_amount);

        // 1 − (1 − A/S)² = A·(2S − A) / S²
        let two_s = s + s;
        let returned = r * a * (two_s - a) / (s * s);

        narrow(returned, "returned reserve")
    }

    /// Prices a purchase and returns the resulting state.
    pub fn buy(&self, state: &CurveState, request: &PurchaseRequest) -> Result<Trade, CurveError> {
        let minted = self.purchase_return(state, request)?;
        let state_after = state.apply_purchase(request.deposit_amount, minted)?;
        Ok(Trade {
            amount_in: request.deposit_amount,
            amount_out: minted,
            state_before: *state,
            state_after,
        })
    }

    /// Prices a sale and returns the resulting state.
    pub fn sell(&self, state: &CurveState, request: &SaleRequest) -> Result<Trade, CurveError> {
        let returned = self.sale_return(state, request)?;
        let state_after = state.apply_sale(request.sell_amount, returned)?;
        Ok(Trade {
            amount_in: request.sell_amount,
            amount_out: returned,
            state_before: *state,
            state_after,
        })
    }

    /// Reserve needed to mint exactly `tokens`: `R · T · (2S + T) / S²`,
    /// rounded up so the quote is never short.
    pub fn deposit_for_tokens(&self, state: &CurveState, tokens: u128) -> Result<u128, CurveError> {
        if tokens == 0 {
            return Err(CurveError::InvalidInput(
                "token amount must be greater than zero".to_string(),
            ));
        }
        state.validate()?;

        let t = U512::from(tokens);
        if state.is_empty() {
            let wad = U512::from(WAD);
            let ratio = U512::from(self.bootstrap_ratio);
            return narrow(div_ceil(t * wad, ratio), "required deposit");
        }

        let s = U512::from(state.total_supply);
        let r = U512::from(state.reserve_balance);
        let two_s = s + s;

        narrow(div_ceil(r * t * (two_s + t), s * s), "required deposit")
    }

    /// Marginal price `dR/dS = R / (S · CW)` in WAD (reserve units per whole
    /// token), which is `2R/S` at the fixed reserve ratio. An empty curve
    /// quotes the bootstrap price.
    pub fn spot_price(&self, state: &CurveState) -> Result<u128, CurveError> {
        state.validate()?;
        let wad = U512::from(WAD);
        if state.is_empty() {
            return narrow(wad * wad / U512::from(self.bootstrap_ratio), "spot price");
        }

        let s = U512::from(state.total_supply);
        let r = U512::from(state.reserve_balance);
        let ppm = U512::from(1_000_000u32);
        let ratio = U512::from(RESERVE_RATIO_PPM);
        narrow(r * wad * ppm / (s * ratio), "spot price")
    }

    fn bootstrap_mint(&self, deposit: u128) -> Result<u128, CurveError> {
        let minted = U512::from(deposit) * U512::from(self.bootstrap_ratio) / U512::from(WAD);
        let minted = narrow(minted, "bootstrap mint")?;
        if minted == 0 {
            return Err(CurveError::InvalidInput(format!(
                "deposit {} too small to bootstrap the curve",
                deposit
            )));
        }
        Ok(minted)
    }
}

/// Integer square root (Newton's method). Returns ⌊√n⌋.
fn isqrt(n: U512) -> U512 {
    if n.is_zero() {
        return n;
    }
    let mut x = n;
    // ⌈n/2⌉
    let mut y = (x >> 1) + (x & U512::one());
    while y < x {
        x = y;
        y = (x + n / x) >> 1;
    }
    x
}

fn div_ceil(num: U512, den: U512) -> U512 {
    let q = num / den;
    if (q * den) < num {
        q + U512::one()
    } else {
        q
    }
}

fn narrow(value: U512, what: &str) -> Result<u128, CurveError> {
    if value.bits() > 128 {
        return Err(CurveError::Overflow(format!("{} exceeds u128", what)));
    }
    Ok(value.low_u128())
}

// ============================================================================
// TESTS
// ============================================================================
