//! # burry CLI entry point
//!
//! Parses command-line arguments, installs logging, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use burry_cli::account::{run_airdrop, run_balance, run_keygen, AirdropArgs, BalanceArgs};
use burry_cli::escrow::{
    run_address, run_deposit, run_show, run_withdraw, AddressArgs, DepositArgs, ShowArgs,
    WithdrawArgs,
};
use burry_cli::price::run_price;
use burry_cli::{CliContext, DEFAULT_LEDGER_PATH};

/// Burry escrow operator CLI.
///
/// Locks lamports behind a price threshold and releases them once the
/// configured price feed reports a value above it.
#[derive(Parser, Debug)]
#[command(name = "burry", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    /// Ledger snapshot file.
    #[arg(long, global = true, default_value = DEFAULT_LEDGER_PATH)]
    ledger: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a fresh wallet address.
    Keygen,

    /// Credit lamports to a wallet.
    Airdrop(AirdropArgs),

    /// Print the balance of an address.
    Balance(BalanceArgs),

    /// Print the derived escrow address for an owner.
    Address(AddressArgs),

    /// Lock lamports behind an unlock price.
    Deposit(DepositArgs),

    /// Release an escrow if the current price is above its unlock price.
    Withdraw(WithdrawArgs),

    /// Print an owner's active escrow as JSON.
    Show(ShowArgs),

    /// Read the configured price feed.
    Price,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match cli.log_format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }

    tracing::debug!(ledger = %cli.ledger.display(), "burry CLI starting");

    let ctx = match CliContext::from_env(cli.ledger) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Keygen => run_keygen(),
        Commands::Airdrop(args) => run_airdrop(&ctx, &args),
        Commands::Balance(args) => run_balance(&ctx, &args),
        Commands::Address(args) => run_address(&ctx, &args),
        Commands::Deposit(args) => run_deposit(&ctx, &args),
        Commands::Withdraw(args) => run_withdraw(&ctx, &args).await,
        Commands::Show(args) => run_show(&ctx, &args),
        Commands::Price => run_price(&ctx).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
