//! # Escrow Subcommands
//!
//! `address`, `deposit`, `withdraw`, and `show`. Withdrawals read the
//! configured HTTP price feed unless `--price` pins a value.

use anyhow::{Context, Result};
use burry_core::{Address, Price};
use burry_escrow::{EscrowError, EscrowProgram};
use burry_oracle::{
    HttpPriceFeed, ManualPriceFeed, OracleConfig, PriceOracle, StalenessGuard,
};
use clap::Args;
use serde::Serialize;

use crate::{ledger_file, CliContext, EXIT_PRICE_NOT_MET};

/// Arguments for `burry address`.
#[derive(Args, Debug)]
pub struct AddressArgs {
    /// Depositor address.
    #[arg(long)]
    pub owner: Address,
}

/// Arguments for `burry deposit`.
#[derive(Args, Debug)]
pub struct DepositArgs {
    /// Depositor address.
    #[arg(long)]
    pub owner: Address,
    /// Lamports to lock.
    #[arg(long)]
    pub amount: u64,
    /// Release threshold as a decimal, e.g. `21.53`.
    #[arg(long, allow_hyphen_values = true)]
    pub unlock_price: Price,
}

/// Arguments for `burry withdraw`.
#[derive(Args, Debug)]
pub struct WithdrawArgs {
    /// Owner of the entry to release.
    #[arg(long)]
    pub owner: Address,
    /// Identity performing the withdrawal. Defaults to the owner.
    #[arg(long)]
    pub caller: Option<Address>,
    /// Use this price instead of querying the HTTP feed.
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<Price>,
}

/// Arguments for `burry show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Depositor address.
    #[arg(long)]
    pub owner: Address,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryView {
    address: Address,
    owner: Address,
    locked_amount: u64,
    unlock_price: Price,
    bump: u8,
    lamports: u64,
}

fn program_with<O: PriceOracle>(ctx: &CliContext, oracle: O) -> Result<EscrowProgram<O>> {
    let ledger = ledger_file::load(&ctx.ledger_path, ctx.escrow.new_ledger_rent)?;
    Ok(EscrowProgram::new(ledger, oracle, ctx.escrow))
}

/// Print the derived escrow address and bump for an owner.
pub fn run_address(ctx: &CliContext, args: &AddressArgs) -> Result<u8> {
    let program = program_with(ctx, ManualPriceFeed::new())?;
    let (address, bump) = program
        .escrow_address(&args.owner)
        .context("address derivation failed")?;
    println!("{address}");
    println!("  Bump: {bump}");
    Ok(0)
}

/// Lock funds behind a price threshold.
pub fn run_deposit(ctx: &CliContext, args: &DepositArgs) -> Result<u8> {
    let program = program_with(ctx, ManualPriceFeed::new())?;
    let receipt = program
        .deposit(&args.owner, args.amount, args.unlock_price)
        .with_context(|| format!("deposit for {} failed", args.owner))?;
    ledger_file::save(&ctx.ledger_path, program.ledger())?;

    let (address, _) = program.escrow_address(&args.owner)?;
    println!("OK: locked {} lamports", args.amount);
    println!("  Escrow:       {address}");
    println!("  Unlock price: {}", args.unlock_price);
    println!("  Receipt:      {receipt}");
    Ok(0)
}

/// Release an entry if the price condition holds.
///
/// Returns [`EXIT_PRICE_NOT_MET`] when the price gate refuses.
pub async fn run_withdraw(ctx: &CliContext, args: &WithdrawArgs) -> Result<u8> {
    match args.price {
        Some(price) => withdraw_with(ctx, args, ManualPriceFeed::with_price(price)).await,
        None => {
            let config = OracleConfig::from_env().context("invalid oracle configuration")?;
            let feed = HttpPriceFeed::new(&config).context("failed to build price feed client")?;
            let oracle = StalenessGuard::new(feed, config.max_staleness_secs);
            withdraw_with(ctx, args, oracle).await
        }
    }
}

async fn withdraw_with<O: PriceOracle>(
    ctx: &CliContext,
    args: &WithdrawArgs,
    oracle: O,
) -> Result<u8> {
    let program = program_with(ctx, oracle)?;
    let caller = args.caller.unwrap_or(args.owner);
    let before = program.ledger().balance(&args.owner);

    match program.withdraw_from(&args.owner, &caller).await {
        Ok(receipt) => {
            ledger_file::save(&ctx.ledger_path, program.ledger())?;
            let after = program.ledger().balance(&args.owner);
            println!(
                "OK: released {} lamports to {}",
                after.saturating_sub(before),
                args.owner
            );
            println!("  Receipt: {receipt}");
            Ok(0)
        }
        Err(EscrowError::PriceConditionNotMet { current, unlock }) => {
            eprintln!("{}", EscrowError::PriceConditionNotMet { current, unlock });
            eprintln!("  Current price: {current}");
            eprintln!("  Unlock price:  {unlock}");
            Ok(EXIT_PRICE_NOT_MET)
        }
        Err(err) => Err(anyhow::Error::new(err).context(format!(
            "withdrawal for {} failed",
            args.owner
        ))),
    }
}

/// Print an owner's active entry as JSON.
pub fn run_show(ctx: &CliContext, args: &ShowArgs) -> Result<u8> {
    let program = program_with(ctx, ManualPriceFeed::new())?;
    let (address, _) = program.escrow_address(&args.owner)?;
    let Some(entry) = program.entry(&args.owner)? else {
        anyhow::bail!("no escrow entry for {}", args.owner);
    };
    let view = EntryView {
        address,
        owner: entry.owner,
        locked_amount: entry.locked_amount,
        unlock_price: entry.unlock_price,
        bump: entry.bump,
        lamports: program.ledger().balance(&address),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&view).context("failed to serialize entry")?
    );
    Ok(0)
}
