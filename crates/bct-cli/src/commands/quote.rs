use crate::commands::common::{curve_from_args, parse_amount, print_json};
use crate::{print_info, print_success, CurveArgs};
use bct_core::{
    format_ether, BondingCurvePricer, CurveState, PurchaseRequest, SaleRequest, Trade,
};
use colored::*;
use serde::Serialize;

/// One priced trade, amounts in whole units.
#[derive(Debug, Serialize)]
pub struct QuoteOutput {
    pub operation: &'static str,
    pub amount_in: String,
    pub amount_out: String,
    pub supply_before: String,
    pub reserve_before: String,
    pub supply_after: String,
    pub reserve_after: String,
    /// Floating-point cross-check of `amount_out`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<f64>,
}

impl QuoteOutput {
    fn from_trade(operation: &'static str, trade: &Trade, estimate: Option<f64>) -> Self {
        Self {
            operation,
            amount_in: format_ether(trade.amount_in),
            amount_out: format_ether(trade.amount_out),
            supply_before: format_ether(trade.state_before.total_supply),
            reserve_before: format_ether(trade.state_before.reserve_balance),
            supply_after: format_ether(trade.state_after.total_supply),
            reserve_after: format_ether(trade.state_after.reserve_balance),
            estimate,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PriceOutput {
    pub supply: String,
    pub reserve: String,
    /// Reserve per whole token at the margin
    pub spot_price: String,
}

pub fn quote_buy(
    curve: &CurveArgs,
    deposit: &str,
) -> Result<QuoteOutput, Box<dyn std::error::Error>> {
    let (state, pricer) = curve_from_args(curve)?;
    let deposit = parse_amount("deposit", deposit)?;
    let trade = pricer.buy(&state, &PurchaseRequest::new(deposit))?;
    let estimate = estimate_purchase(&state, &pricer, deposit);
    Ok(QuoteOutput::from_trade("buy", &trade, estimate))
}

pub fn quote_sell(
    curve: &CurveArgs,
    amount: &str,
) -> Result<QuoteOutput, Box<dyn std::error::Error>> {
    let (state, pricer) = curve_from_args(curve)?;
    let amount = parse_amount("amount", amount)?;
    let trade = pricer.sell(&state, &SaleRequest::new(amount))?;
    let estimate = estimate_sale(&state, amount);
    Ok(QuoteOutput::from_trade("sell", &trade, estimate))
}

pub fn quote_price(curve: &CurveArgs) -> Result<PriceOutput, Box<dyn std::error::Error>> {
    let (state, pricer) = curve_from_args(curve)?;
    let price = pricer.spot_price(&state)?;
    Ok(PriceOutput {
        supply: format_ether(state.total_supply),
        reserve: format_ether(state.reserve_balance),
        spot_price: format_ether(price),
    })
}

pub fn buy(curve: &CurveArgs, deposit: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let quote = quote_buy(curve, deposit)?;
    if json {
        return print_json(&quote);
    }
    print_success(&format!(
        "{} reserve buys {} tokens",
        quote.amount_in, quote.amount_out
    ));
    print_trade(&quote);
    Ok(())
}

pub fn sell(curve: &CurveArgs, amount: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let quote = quote_sell(curve, amount)?;
    if json {
        return print_json(&quote);
    }
    print_success(&format!(
        "{} tokens return {} reserve",
        quote.amount_in, quote.amount_out
    ));
    print_trade(&quote);
    Ok(())
}

pub fn price(curve: &CurveArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let output = quote_price(curve)?;
    if json {
        return print_json(&output);
    }
    print_info(&format!(
        "Curve at supply {} / reserve {}",
        output.supply, output.reserve
    ));
    println!(
        "{} {} reserve per token",
        "Spot price:".bold(),
        output.spot_price.cyan()
    );
    Ok(())
}

fn print_trade(quote: &QuoteOutput) {
    println!(
        "{} {} → {}",
        "Supply: ".bold(),
        quote.supply_before,
        quote.supply_after.cyan()
    );
    println!(
        "{} {} → {}",
        "Reserve:".bold(),
        quote.reserve_before,
        quote.reserve_after.cyan()
    );
    if let Some(estimate) = quote.estimate {
        println!("{} {:.18}", "Estimate (f64):".dimmed(), estimate);
    }
}

#[cfg(not(feature = "deterministic"))]
fn estimate_purchase(
    state: &CurveState,
    pricer: &BondingCurvePricer,
    deposit: u128,
) -> Option<f64> {
    use bct_core::float_curve::{from_base_units, purchase_return_with_ratio};
    purchase_return_with_ratio(
        from_base_units(state.total_supply),
        from_base_units(state.reserve_balance),
        from_base_units(deposit),
        from_base_units(pricer.bootstrap_ratio()),
    )
    .ok()
}

#[cfg(not(feature = "deterministic"))]
fn estimate_sale(state: &CurveState, amount: u128) -> Option<f64> {
    use bct_core::float_curve::{from_base_units, sale_return};
    sale_return(
        from_base_units(state.total_supply),
        from_base_units(state.reserve_balance),
        from_base_units(amount),
    )
    .ok()
}

#[cfg(feature = "deterministic")]
fn estimate_purchase(
    _state: &CurveState,
    _pricer: &BondingCurvePricer,
    _deposit: u128,
) -> Option<f64> {
    None
}

#[cfg(feature = "deterministic")]
fn estimate_sale(_state: &CurveState, _amount: u128) -> Option<f64> {
    None
}
