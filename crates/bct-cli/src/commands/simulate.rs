use crate::commands::common::{load_config, parse_amount, print_json};
use crate::{print_error, print_info, print_success};
use bct_core::{format_ether, serde_u128, CurveConfig};
use bct_token::{BctAction, BctEvent, BctResponse, BctToken, TokenMetadata};
use colored::*;
use serde::Serialize;
use std::path::Path;

/// Receives `initial_supply` at deployment
pub const DEPLOYER: &str = "deployer";
/// Performs every simulated mint and burn
pub const TRADER: &str = "trader";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellAmount {
    /// The trader's whole balance at the time of the sale
    All,
    Tokens(u128),
}

impl SellAmount {
    pub fn parse(value: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(SellAmount::All);
        }
        Ok(SellAmount::Tokens(parse_amount("sell amount", value)?))
    }
}

#[derive(Debug, Serialize)]
pub struct Step {
    #[serde(flatten)]
    pub action: BctAction,
    #[serde(with = "serde_u128")]
    pub value: u128,
    pub response: BctResponse,
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub steps: Vec<Step>,
    pub final_state: TokenMetadata,
    #[serde(with = "serde_u128")]
    pub collected_fees: u128,
    #[serde(with = "serde_u128")]
    pub trader_balance: u128,
}

/// Deploys a ledger from `config`, mints every deposit and then sells every
/// amount, all as [`TRADER`]. Rejected steps are recorded, not fatal.
pub fn run_simulation(
    config: &CurveConfig,
    deposits: &[u128],
    sells: &[SellAmount],
) -> Result<SimulationReport, Box<dyn std::error::Error>> {
    let mut token = BctToken::from_config(config, DEPLOYER)?;
    let mut steps = Vec::with_capacity(deposits.len() + sells.len());

    for &deposit in deposits {
        let response = token.execute(TRADER, deposit, BctAction::Mint);
        steps.push(Step {
            action: BctAction::Mint,
            value: deposit,
            response,
        });
    }

    for sell in sells {
        let amount = match sell {
            SellAmount::All => token.balance_of(TRADER),
            SellAmount::Tokens(amount) => *amount,
        };
        let action = BctAction::Burn { amount };
        let response = token.execute(TRADER, 0, action.clone());
        steps.push(Step {
            action,
            value: 0,
            response,
        });
    }

    log::debug!(
        "Simulation finished: {} steps, supply {}",
        steps.len(),
        token.total_supply()
    );

    Ok(SimulationReport {
        steps,
        final_state: token.metadata.clone(),
        collected_fees: token.collected_fees(),
        trader_balance: token.balance_of(TRADER),
    })
}

pub fn handle(
    config_path: Option<&Path>,
    deposits: &[String],
    sells: &[String],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let deposits = deposits
        .iter()
        .map(|d| parse_amount("deposit", d))
        .collect::<Result<Vec<_>, _>>()?;
    let sells = sells
        .iter()
        .map(|s| SellAmount::parse(s))
        .collect::<Result<Vec<_>, _>>()?;

    let report = run_simulation(&config, &deposits, &sells)?;
    if json {
        return print_json(&report);
    }

    print_info(&format!(
        "Simulating {} ({}) from supply {} / reserve {}",
        config.name,
        config.symbol,
        format_ether(config.initial_supply),
        format_ether(config.initial_reserve)
    ));
    for step in &report.steps {
        if step.response.success {
            for event in &step.response.events {
                print_success(&describe(event));
            }
        } else {
            print_error(&format!(
                "{} reverted: {}",
                step.action.name(),
                step.response.message
            ));
        }
    }

    println!();
    let state = &report.final_state;
    println!(
        "{} {}",
        "Total supply:  ".bold(),
        format_ether(state.total_supply).cyan()
    );
    println!(
        "{} {}",
        "Reserve:       ".bold(),
        format_ether(state.reserve_balance).cyan()
    );
    println!(
        "{} {}",
        "Fees collected:".bold(),
        format_ether(report.collected_fees)
    );
    println!(
        "{} {}",
        "Trader holds:  ".bold(),
        format_ether(report.trader_balance)
    );
    Ok(())
}

fn describe(event: &BctEvent) -> String {
    match event {
        BctEvent::Minted { to, deposit, amount } => format!(
            "Minted {} tokens to {} for {}",
            format_ether(*amount),
            to,
            format_ether(*deposit)
        ),
        BctEvent::Burned {
            from,
            amount,
            returned,
            fee,
        } => format!(
            "Burned {} tokens from {} for {} (fee {})",
            format_ether(*amount),
            from,
            format_ether(*returned),
            format_ether(*fee)
        ),
        BctEvent::Transfer { from, to, amount } => format!(
            "Transferred {} tokens from {} to {}",
            format_ether(*amount),
            from,
            to
        ),
    }
}
