// SPDX-License-Identifier: AGPL-3.0-only
//! # BCT Reference Ledger
//!
//! A token whose supply is issued and redeemed against a reserve along the
//! quadratic bonding curve priced by [`bct_core::BondingCurvePricer`].
//!
//! ## Actions
//! - `Mint` (payable): the attached value is deposited into the reserve and
//!   the caller is credited `purchase_return(value)` tokens
//! - `Burn`: the caller's tokens are destroyed and `sale_return(amount)`
//!   leaves the reserve, less the withdrawal fee
//! - `Transfer`: plain balance move, curve untouched
//! - Read-only: `BalanceOf`, `TotalSupply`, `ReserveBalance`, `TokenInfo`,
//!   `QuoteMint`, `QuoteBurn`
//!
//! ## State
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │  BctToken                                         │
//! │  ┌────────────────┐  ┌──────────┐  ┌───────────┐  │
//! │  │ Metadata       │  │ Balances │  │ Fees      │  │
//! │  │ name, symbol   │  │ addr→u128│  │ collected │  │
//! │  │ total_supply   │  │          │  │ (u128)    │  │
//! │  │ reserve_balance│  │          │  │           │  │
//! │  └────────────────┘  └──────────┘  └───────────┘  │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! `total_supply` always equals the sum of balances, and every unit of
//! reserve that ever entered is either still in `reserve_balance`, was paid
//! out to a seller, or sits in `collected_fees`.

use bct_core::{
    serde_u128, BondingCurvePricer, CurveConfig, CurveState, PurchaseRequest, SaleRequest,
    BPS_DENOMINATOR, DECIMALS,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Revert reason of a `Mint` carrying no value.
pub const MUST_SEND_ETHER: &str = "ERC20: Must send ether to buy tokens.";

// ─────────────────────────────────────────────────────────────
// TOKEN METADATA
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Tokens in circulation (base units)
    #[serde(with = "serde_u128")]
    pub total_supply: u128,
    /// Reserve backing the supply (base units)
    #[serde(with = "serde_u128")]
    pub reserve_balance: u128,
    /// Fee withheld from sale returns, in basis points
    pub withdrawal_fee_bps: u16,
}

impl TokenMetadata {
    pub fn curve_state(&self) -> CurveState {
        CurveState::new(self.total_supply, self.reserve_balance)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() || self.name.len() > 64 {
            return Err("Name must be 1-64 characters".to_string());
        }
        if self.symbol.is_empty() || self.symbol.len() > 8 {
            return Err("Symbol must be 1-8 characters".to_string());
        }
        if self.decimals != DECIMALS {
            return Err(format!("Decimals must be {}", DECIMALS));
        }
        if self.withdrawal_fee_bps as u128 > BPS_DENOMINATOR {
            return Err("Withdrawal fee must be <= 10000 bps".to_string());
        }
        self.curve_state().validate().map_err(|e| e.to_string())
    }
}

// ─────────────────────────────────────────────────────────────
// ACTIONS
// ─────────────────────────────────────────────────────────────

/// Calls accepted by [`BctToken::execute`], JSON-tagged by `action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum BctAction {
    /// Buy tokens with the value attached to the call.
    Mint,

    /// Redeem `amount` of the caller's tokens for reserve.
    Burn {
        #[serde(with = "serde_u128")]
        amount: u128,
    },

    /// Move `amount` tokens from caller to `to`.
    Transfer {
        to: String,
        #[serde(with = "serde_u128")]
        amount: u128,
    },

    // ── Read-only queries ──
    BalanceOf { account: String },

    TotalSupply,

    ReserveBalance,

    TokenInfo,

    /// Tokens a `Mint` with `deposit` attached would credit right now.
    QuoteMint {
        #[serde(with = "serde_u128")]
        deposit: u128,
    },

    /// Reserve a `Burn` of `amount` would pay out right now, after fees.
    QuoteBurn {
        #[serde(with = "serde_u128")]
        amount: u128,
    },
}

impl BctAction {
    pub fn name(&self) -> &'static str {
        match self {
            BctAction::Mint => "Mint",
            BctAction::Burn { .. } => "Burn",
            BctAction::Transfer { .. } => "Transfer",
            BctAction::BalanceOf { .. } => "BalanceOf",
            BctAction::TotalSupply => "TotalSupply",
            BctAction::ReserveBalance => "ReserveBalance",
            BctAction::TokenInfo => "TokenInfo",
            BctAction::QuoteMint { .. } => "QuoteMint",
            BctAction::QuoteBurn { .. } => "QuoteBurn",
        }
    }

    /// Only `Mint` may carry value.
    pub fn is_payable(&self) -> bool {
        matches!(self, BctAction::Mint)
    }
}

// ─────────────────────────────────────────────────────────────
// EVENTS
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum BctEvent {
    /// Emitted on Mint
    Minted {
        to: String,
        #[serde(with = "serde_u128")]
        deposit: u128,
        #[serde(with = "serde_u128")]
        amount: u128,
    },
    /// Emitted on Burn. `returned` is what the seller received; `fee` what
    /// the ledger kept.
    Burned {
        from: String,
        #[serde(with = "serde_u128")]
        amount: u128,
        #[serde(with = "serde_u128")]
        returned: u128,
        #[serde(with = "serde_u128")]
        fee: u128,
    },
    /// Emitted on Transfer
    Transfer {
        from: String,
        to: String,
        #[serde(with = "serde_u128")]
        amount: u128,
    },
}

// ─────────────────────────────────────────────────────────────
// RESPONSE
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BctResponse {
    pub success: bool,
    /// Return value (amounts as decimal strings, TokenInfo as JSON)
    #[serde(default)]
    pub data: Option<String>,
    pub message: String,
    #[serde(default)]
    pub events: Vec<BctEvent>,
}

impl BctResponse {
    fn ok(message: String, data: Option<String>, events: Vec<BctEvent>) -> Self {
        Self {
            success: true,
            data,
            message,
            events,
        }
    }

    fn fail(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message,
            events: Vec::new(),
        }
    }

    /// `data` parsed as a base-unit amount.
    pub fn amount(&self) -> Option<u128> {
        self.data.as_deref().and_then(|d| d.parse().ok())
    }
}

// ─────────────────────────────────────────────────────────────
// VALIDATION
// ─────────────────────────────────────────────────────────────

/// Stateless checks run before an action touches the ledger.
pub fn validate_action(action: &BctAction) -> Result<(), String> {
    match action {
        BctAction::Burn { amount } => {
            if *amount == 0 {
                return Err("Burn: amount must be > 0".to_string());
            }
            Ok(())
        }
        BctAction::Transfer { to, amount } => {
            if to.is_empty() {
                return Err("Transfer: recipient address is empty".to_string());
            }
            if *amount == 0 {
                return Err("Transfer: amount must be > 0".to_string());
            }
            Ok(())
        }
        BctAction::BalanceOf { account } => {
            if account.is_empty() {
                return Err("BalanceOf: account is empty".to_string());
            }
            Ok(())
        }
        BctAction::QuoteMint { deposit } => {
            if *deposit == 0 {
                return Err("QuoteMint: deposit must be > 0".to_string());
            }
            Ok(())
        }
        BctAction::Mint
        | BctAction::QuoteBurn { .. }
        | BctAction::TotalSupply
        | BctAction::ReserveBalance
        | BctAction::TokenInfo => Ok(()),
    }
}

// ─────────────────────────────────────────────────────────────
// LEDGER
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BctToken {
    pub metadata: TokenMetadata,
    /// BTreeMap for deterministic iteration and serialization
    pub balances: BTreeMap<String, u128>,
    /// Withdrawal fees withheld from burns (no longer part of the reserve)
    #[serde(with = "serde_u128")]
    pub collected_fees: u128,
    pricer: BondingCurvePricer,
}

impl BctToken {
    /// Empty curve with default parameters. The first `Mint` bootstraps it.
    pub fn new(name: String, symbol: String) -> Result<Self, String> {
        let config = CurveConfig {
            name,
            symbol,
            ..CurveConfig::default()
        };
        Self::from_config(&config, "")
    }

    /// Deploy from a curve configuration. A non-zero `initial_supply` is
    /// credited to `creator`.
    pub fn from_config(config: &CurveConfig, creator: &str) -> Result<Self, String> {
        config.validate().map_err(|e| e.to_string())?;
        let pricer = config.pricer().map_err(|e| e.to_string())?;

        let metadata = TokenMetadata {
            name: config.name.clone(),
            symbol: config.symbol.clone(),
            decimals: config.decimals,
            total_supply: config.initial_supply,
            reserve_balance: config.initial_reserve,
            withdrawal_fee_bps: config.withdrawal_fee_bps,
        };
        metadata.validate()?;

        let mut balances = BTreeMap::new();
        if config.initial_supply > 0 {
            if creator.is_empty() {
                return Err("Initial supply requires a creator address".to_string());
            }
            balances.insert(creator.to_string(), config.initial_supply);
        }

        log::info!(
            "Deployed {} ({}): supply {} reserve {}",
            metadata.name,
            metadata.symbol,
            metadata.total_supply,
            metadata.reserve_balance
        );

        Ok(Self {
            metadata,
            balances,
            collected_fees: 0,
            pricer,
        })
    }

    pub fn curve_state(&self) -> CurveState {
        self.metadata.curve_state()
    }

    pub fn pricer(&self) -> &BondingCurvePricer {
        &self.pricer
    }

    pub fn balance_of(&self, account: &str) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u128 {
        self.metadata.total_supply
    }

    pub fn reserve_balance(&self) -> u128 {
        self.metadata.reserve_balance
    }

    pub fn collected_fees(&self) -> u128 {
        self.collected_fees
    }

    /// Portion of a sale return kept as withdrawal fee (rounded down).
    pub fn withdrawal_fee(&self, returned: u128) -> u128 {
        let bps = self.metadata.withdrawal_fee_bps as u128;
        // split so returned * bps cannot overflow
        returned / BPS_DENOMINATOR * bps + returned % BPS_DENOMINATOR * bps / BPS_DENOMINATOR
    }

    /// Execute an action. `caller` is the sender address and `value` the
    /// reserve attached to the call.
    pub fn execute(&mut self, caller: &str, value: u128, action: BctAction) -> BctResponse {
        if value > 0 && !action.is_payable() {
            log::warn!(
                "{} by {} rejected: sent {} to non-payable action",
                action.name(),
                caller,
                value
            );
            return BctResponse::fail(format!("{}: action is not payable", action.name()));
        }
        if let Err(e) = validate_action(&action) {
            log::warn!("{} by {} rejected: {}", action.name(), caller, e);
            return BctResponse::fail(e);
        }

        match action {
            BctAction::Mint => self.mint(caller, value),
            BctAction::Burn { amount } => self.burn(caller, amount),
            BctAction::Transfer { to, amount } => self.transfer(caller, to, amount),

            BctAction::BalanceOf { account } => {
                let balance = self.balance_of(&account);
                BctResponse::ok(
                    format!("Balance: {}", balance),
                    Some(balance.to_string()),
                    Vec::new(),
                )
            }

            BctAction::TotalSupply => BctResponse::ok(
                "Total supply".to_string(),
                Some(self.metadata.total_supply.to_string()),
                Vec::new(),
            ),

            BctAction::ReserveBalance => BctResponse::ok(
                "Reserve balance".to_string(),
                Some(self.metadata.reserve_balance.to_string()),
                Vec::new(),
            ),

            BctAction::TokenInfo => BctResponse::ok(
                "Token info".to_string(),
                Some(serde_json::to_string(&self.metadata).unwrap_or_else(|_| "{}".to_string())),
                Vec::new(),
            ),

            BctAction::QuoteMint { deposit } => {
                match self
                    .pricer
                    .purchase_return(&self.curve_state(), &PurchaseRequest::new(deposit))
                {
                    Ok(minted) => BctResponse::ok(
                        format!("Mint {} for {}", minted, deposit),
                        Some(minted.to_string()),
                        Vec::new(),
                    ),
                    Err(e) => BctResponse::fail(format!("QuoteMint: {}", e)),
                }
            }

            BctAction::QuoteBurn { amount } => {
                match self
                    .pricer
                    .sale_return(&self.curve_state(), &SaleRequest::new(amount))
                {
                    Ok(returned) => {
                        let fee = self.withdrawal_fee(returned);
                        BctResponse::ok(
                            format!("Burn {} for {} (fee {})", amount, returned - fee, fee),
                            Some((returned - fee).to_string()),
                            Vec::new(),
                        )
                    }
                    Err(e) => BctResponse::fail(format!("QuoteBurn: {}", e)),
                }
            }
        }
    }

    fn mint(&mut self, caller: &str, value: u128) -> BctResponse {
        if value == 0 {
            log::warn!("Mint by {} rejected: no value attached", caller);
            return BctResponse::fail(MUST_SEND_ETHER.to_string());
        }

        let state = self.curve_state();
        let trade = match self.pricer.buy(&state, &PurchaseRequest::new(value)) {
            Ok(trade) => trade,
            Err(e) => {
                log::warn!("Mint by {} rejected: {}", caller, e);
                return BctResponse::fail(format!("Mint: {}", e));
            }
        };
        log::debug!(
            "Mint priced: deposit {} on ({}, {}) -> {}",
            value,
            state.total_supply,
            state.reserve_balance,
            trade.amount_out
        );

        let balance = self.balance_of(caller);
        let Some(new_balance) = balance.checked_add(trade.amount_out) else {
            return BctResponse::fail("Mint: balance overflow".to_string());
        };

        self.balances.insert(caller.to_string(), new_balance);
        self.metadata.total_supply = trade.state_after.total_supply;
        self.metadata.reserve_balance = trade.state_after.reserve_balance;

        log::info!("Minted {} to {} for {}", trade.amount_out, caller, value);
        BctResponse::ok(
            format!("Minted {} tokens for {}", trade.amount_out, value),
            Some(trade.amount_out.to_string()),
            vec![BctEvent::Minted {
                to: caller.to_string(),
                deposit: value,
                amount: trade.amount_out,
            }],
        )
    }

    fn burn(&mut self, caller: &str, amount: u128) -> BctResponse {
        let balance = self.balance_of(caller);
        if balance < amount {
            log::warn!("Burn by {} rejected: balance {} < {}", caller, balance, amount);
            return BctResponse::fail(format!(
                "Insufficient balance to burn: have {} need {}",
                balance, amount
            ));
        }

        let state = self.curve_state();
        let trade = match self.pricer.sell(&state, &SaleRequest::new(amount)) {
            Ok(trade) => trade,
            Err(e) => {
                log::warn!("Burn by {} rejected: {}", caller, e);
                return BctResponse::fail(format!("Burn: {}", e));
            }
        };
        let fee = self.withdrawal_fee(trade.amount_out);
        let payout = trade.amount_out - fee;
        log::debug!(
            "Burn priced: {} on ({}, {}) -> {} (fee {})",
            amount,
            state.total_supply,
            state.reserve_balance,
            trade.amount_out,
            fee
        );

        let Some(collected_fees) = self.collected_fees.checked_add(fee) else {
            return BctResponse::fail("Burn: fee accumulator overflow".to_string());
        };

        self.balances.insert(caller.to_string(), balance - amount);
        self.metadata.total_supply = trade.state_after.total_supply;
        self.metadata.reserve_balance = trade.state_after.reserve_balance;
        self.collected_fees = collected_fees;

        log::info!("Burned {} from {} for {} (fee {})", amount, caller, payout, fee);
        BctResponse::ok(
            format!("Burned {} tokens for {}", amount, payout),
            Some(payout.to_string()),
            vec![BctEvent::Burned {
                from: caller.to_string(),
                amount,
                returned: payout,
                fee,
            }],
        )
    }

    fn transfer(&mut self, caller: &str, to: String, amount: u128) -> BctResponse {
        let from_balance = self.balance_of(caller);
        if from_balance < amount {
            return BctResponse::fail(format!(
                "Insufficient balance: have {} need {}",
                from_balance, amount
            ));
        }

        self.balances
            .insert(caller.to_string(), from_balance - amount);
        // bounded by total_supply
        let to_balance = self.balance_of(&to).saturating_add(amount);
        self.balances.insert(to.clone(), to_balance);

        log::info!("Transferred {} from {} to {}", amount, caller, to);
        BctResponse::ok(
            format!("Transferred {} to {}", amount, to),
            None,
            vec![BctEvent::Transfer {
                from: caller.to_string(),
                to,
                amount,
            }],
        )
    }
}

// ─────────────────────────────────────────────────────────────
// TESTS
// ─────────────────────────────────────────────────────────────
