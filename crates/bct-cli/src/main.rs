// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BONDING CURVE TOKEN CLI - quote and simulate curve trades
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "bct")]
#[command(about = "Bonding Curve Token - quote and simulate reserve-ratio 0.5 curve trades", long_about = None)]
#[command(version)]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Curve position. Amounts are decimal strings in whole units (18 decimals).
#[derive(Args, Debug, Clone)]
struct CurveArgs {
    /// Tokens in circulation
    #[arg(short, long)]
    supply: String,

    /// Reserve held against the supply
    #[arg(short, long)]
    reserve: String,

    /// Tokens per reserve unit for the first purchase into an empty curve
    #[arg(long, default_value = "1")]
    bootstrap_ratio: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokens minted for a reserve deposit
    Buy {
        #[command(flatten)]
        curve: CurveArgs,

        /// Reserve deposited
        #[arg(short, long)]
        deposit: String,
    },

    /// Reserve returned for selling tokens
    Sell {
        #[command(flatten)]
        curve: CurveArgs,

        /// Tokens sold
        #[arg(short, long)]
        amount: String,
    },

    /// Marginal price of one token
    Price {
        #[command(flatten)]
        curve: CurveArgs,
    },

    /// Replay mints and burns against a freshly deployed ledger
    Simulate {
        /// Curve config file (default: BCT_* environment variables)
        #[arg(short, long, env = "BCT_CONFIG")]
        config: Option<PathBuf>,

        /// Reserve to deposit; repeat for several mints
        #[arg(short, long = "deposit", required = true)]
        deposits: Vec<String>,

        /// Tokens to sell after the mints, or "all"; repeatable
        #[arg(long = "sell")]
        sells: Vec<String>,
    },

    /// Curve configuration files
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write the default configuration
    Init {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate and print the effective configuration
    Show {
        /// Config file (default: BCT_* environment variables)
        #[arg(short, long, env = "BCT_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    match cli.command {
        Commands::Buy { curve, deposit } => commands::quote::buy(&curve, &deposit, json)?,
        Commands::Sell { curve, amount } => commands::quote::sell(&curve, &amount, json)?,
        Commands::Price { curve } => commands::quote::price(&curve, json)?,
        Commands::Simulate {
            config,
            deposits,
            sells,
        } => commands::simulate::handle(config.as_deref(), &deposits, &sells, json)?,
        Commands::Config { action } => commands::config::handle(action, json)?,
    }
    Ok(())
}

fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

fn print_info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}

// ─────────────────────────────────────────────────────────────────
// UNIT TESTS
// ─────────────────────────────────────────────────────────────────
