use crate::CurveArgs;
use bct_core::{parse_ether, BondingCurvePricer, ConfigError, CurveConfig, CurveState};
use serde::Serialize;
use std::path::Path;

/// Whole-unit decimal string to base units, naming the offending argument.
pub fn parse_amount(label: &str, value: &str) -> Result<u128, Box<dyn std::error::Error>> {
    parse_ether(value).map_err(|e| format!("Invalid {} '{}': {}", label, value, e).into())
}

/// Curve state and pricer described by `--supply`, `--reserve` and
/// `--bootstrap-ratio`. The state is validated here so a bad position is
/// reported before any pricing.
pub fn curve_from_args(
    args: &CurveArgs,
) -> Result<(CurveState, BondingCurvePricer), Box<dyn std::error::Error>> {
    let state = CurveState::new(
        parse_amount("supply", &args.supply)?,
        parse_amount("reserve", &args.reserve)?,
    );
    state.validate()?;
    let ratio = parse_amount("bootstrap ratio", &args.bootstrap_ratio)?;
    let pricer = BondingCurvePricer::with_bootstrap_ratio(ratio)?;
    Ok((state, pricer))
}

/// From a file when given, otherwise defaults plus `BCT_*` overrides.
pub fn load_config(path: Option<&Path>) -> Result<CurveConfig, ConfigError> {
    match path {
        Some(path) => {
            log::debug!("Loading curve config from {}", path.display());
            CurveConfig::load_from_file(path)
        }
        None => {
            log::debug!("Loading curve config from environment");
            CurveConfig::load_from_env()
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
