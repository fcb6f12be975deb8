// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BONDING CURVE TOKEN (BCT) - CORE MODULE
//
// Pricing for a token issued against a reserve currency along a quadratic
// bonding curve (reserve ratio 0.5):
//   purchase: minted   = supply  * (sqrt(1 + deposit / reserve) - 1)
//   sale:     returned = reserve * (1 - (1 - amount / supply)^2)
// All amounts are u128 base units with 18 decimals (no floating-point).
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub mod bonding_curve;
pub mod curve_config;
pub mod error;
pub mod float_curve;
pub mod serde_u128;
pub mod units;

pub use bonding_curve::{BondingCurvePricer, CurveState, PurchaseRequest, SaleRequest, Trade};
pub use curve_config::{ConfigError, CurveConfig};
pub use error::CurveError;
pub use units::{format_ether, format_units, parse_ether, parse_units, UnitsError};

/// Decimal places of both the token and the reserve currency.
pub const DECIMALS: u8 = 18;

/// 1 whole token (or 1 ether) in base units: 10^18
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Reserve ratio in parts-per-million. Fixed: the sqrt/quadratic formulas
/// above only hold for a ratio of exactly 0.5.
pub const RESERVE_RATIO_PPM: u32 = 500_000;

/// Tokens minted per reserve unit on the first purchase into an empty
/// curve, in WAD (10^18 = 1:1).
pub const DEFAULT_BOOTSTRAP_RATIO: u128 = WAD;

/// Basis-point denominator for fees (10_000 = 100%)
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Returns true if the f64 estimator was compiled out.
pub const fn is_deterministic_build() -> bool {
    cfg!(feature = "deterministic")
}
