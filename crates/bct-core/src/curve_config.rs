use crate::bonding_curve::{BondingCurvePricer, CurveState};
use crate::{serde_u128, BPS_DENOMINATOR, DECIMALS, DEFAULT_BOOTSTRAP_RATIO};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Errors from loading or validating a curve configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Config file unreadable or unwritable
    Io(std::io::Error),
    /// TOML syntax or type error
    Parse(String),
    /// Environment variable present but malformed
    Env { var: String, reason: String },
    /// Values parsed but violate a constraint
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Config I/O error: {}", e),
            Self::Parse(e) => write!(f, "Config parse error: {}", e),
            Self::Env { var, reason } => write!(f, "Invalid {}: {}", var, reason),
            Self::Invalid(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Deployment parameters of a bonding curve token.
///
/// ```toml
/// name = "Bonding Curve Token"
/// symbol = "BCT"
/// decimals = 18
/// bootstrap_ratio = "1000000000000000000"
/// initial_supply = "0"
/// initial_reserve = "0"
/// withdrawal_fee_bps = 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveConfig {
    pub name: String,
    pub symbol: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Tokens per reserve unit on the first purchase, in WAD
    #[serde(default = "default_bootstrap_ratio", with = "serde_u128")]
    pub bootstrap_ratio: u128,
    /// Supply credited to the deployer at creation (base units)
    #[serde(default, with = "serde_u128")]
    pub initial_supply: u128,
    /// Reserve backing the initial supply (base units)
    #[serde(default, with = "serde_u128")]
    pub initial_reserve: u128,
    /// Fee withheld from sale returns, in basis points
    #[serde(default)]
    pub withdrawal_fee_bps: u16,
}

fn default_decimals() -> u8 {
    DECIMALS
}

fn default_bootstrap_ratio() -> u128 {
    DEFAULT_BOOTSTRAP_RATIO
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            name: "Bonding Curve Token".to_string(),
            symbol: "BCT".to_string(),
            decimals: DECIMALS,
            bootstrap_ratio: DEFAULT_BOOTSTRAP_RATIO,
            initial_supply: 0,
            initial_reserve: 0,
            withdrawal_fee_bps: 0,
        }
    }
}

impl CurveConfig {
    /// Load and validate from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: CurveConfig =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `BCT_*` environment variables
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("BCT_NAME") {
            config.name = name;
        }
        if let Ok(symbol) = std::env::var("BCT_SYMBOL") {
            config.symbol = symbol;
        }
        if let Some(v) = env_parse::<u128>("BCT_BOOTSTRAP_RATIO")? {
            config.bootstrap_ratio = v;
        }
        if let Some(v) = env_parse::<u128>("BCT_INITIAL_SUPPLY")? {
            config.initial_supply = v;
        }
        if let Some(v) = env_parse::<u128>("BCT_INITIAL_RESERVE")? {
            config.initial_reserve = v;
        }
        if let Some(v) = env_parse::<u16>("BCT_WITHDRAWAL_FEE_BPS")? {
            config.withdrawal_fee_bps = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Save to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() || self.name.len() > 64 {
            return Err(ConfigError::Invalid(
                "name must be 1-64 characters".to_string(),
            ));
        }
        if self.symbol.is_empty() || self.symbol.len() > 8 {
            return Err(ConfigError::Invalid(
                "symbol must be 1-8 characters".to_string(),
            ));
        }
        // pricing and unit formatting are fixed at 18 decimals
        if self.decimals != DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "decimals must be {}, got {}",
                DECIMALS, self.decimals
            )));
        }
        if self.bootstrap_ratio == 0 {
            return Err(ConfigError::Invalid(
                "bootstrap_ratio must be > 0".to_string(),
            ));
        }
        if self.withdrawal_fee_bps as u128 > BPS_DENOMINATOR {
            return Err(ConfigError::Invalid(
                "withdrawal_fee_bps must be <= 10000".to_string(),
            ));
        }
        self.initial_state()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.message().to_string()))?;
        Ok(())
    }

    /// Curve position at deployment
    pub fn initial_state(&self) -> CurveState {
        CurveState::new(self.initial_supply, self.initial_reserve)
    }

    pub fn pricer(&self) -> Result<BondingCurvePricer, ConfigError> {
        BondingCurvePricer::with_bootstrap_ratio(self.bootstrap_ratio)
            .map_err(|e| ConfigError::Invalid(e.message().to_string()))
    }
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Env {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
