use crate::commands::common::{load_config, print_json};
use crate::{print_info, print_success, ConfigCommands};
use bct_core::{format_ether, format_units, CurveConfig};
use colored::*;
use std::path::Path;

pub fn handle(action: ConfigCommands, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigCommands::Init { output, force } => {
            init(&output, force)?;
            if json {
                print_json(&serde_json::json!({ "written": output.display().to_string() }))?;
            } else {
                print_success(&format!("Default config written to {}", output.display()));
            }
        }
        ConfigCommands::Show { config } => show(config.as_deref(), json)?,
    }
    Ok(())
}

/// Write `CurveConfig::default()` to `output`, refusing to clobber an
/// existing file unless `force` is set.
pub fn init(output: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if output.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            output.display()
        )
        .into());
    }
    CurveConfig::default().save_to_file(output)?;
    log::info!("Wrote default curve config to {}", output.display());
    Ok(())
}

fn show(path: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(path)?;
    if json {
        return print_json(&config);
    }

    match path {
        Some(path) => print_info(&format!("Config from {}", path.display())),
        None => print_info("Config from defaults and BCT_* environment"),
    }
    println!("{} {}", "Name:           ".bold(), config.name.green());
    println!("{} {}", "Symbol:         ".bold(), config.symbol.green());
    println!("{} {}", "Decimals:       ".bold(), config.decimals);
    println!(
        "{} {} tokens per reserve unit",
        "Bootstrap ratio:".bold(),
        format_ether(config.bootstrap_ratio)
    );
    println!(
        "{} {}",
        "Initial supply: ".bold(),
        format_ether(config.initial_supply)
    );
    println!(
        "{} {}",
        "Initial reserve:".bold(),
        format_ether(config.initial_reserve)
    );
    println!(
        "{} {}%",
        "Withdrawal fee: ".bold(),
        format_units(config.withdrawal_fee_bps as u128, 2)
    );
    println!("{} {}", "Build:          ".bold(), build_mode());
    Ok(())
}

fn build_mode() -> &'static str {
    if bct_core::is_deterministic_build() {
        "deterministic (integer pricing only)"
    } else {
        "integer pricing with f64 estimates"
    }
}
