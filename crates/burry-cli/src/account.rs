//! # Wallet Subcommands
//!
//! `keygen`, `airdrop`, and `balance`. Wallet addresses are ed25519 public
//! keys, so they always lie on the curve and can never collide with a
//! derived escrow address.

use anyhow::{Context, Result};
use burry_core::Address;
use clap::Args;
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;

use crate::{ledger_file, CliContext};

/// Arguments for `burry airdrop`.
#[derive(Args, Debug)]
pub struct AirdropArgs {
    /// Wallet to fund (64 hex chars).
    #[arg(long)]
    pub to: Address,
    /// Lamports to credit.
    #[arg(long)]
    pub amount: u64,
}

/// Arguments for `burry balance`.
#[derive(Args, Debug)]
pub struct BalanceArgs {
    /// Address to inspect.
    #[arg(long)]
    pub of: Address,
}

/// Generate a fresh wallet address.
pub fn run_keygen() -> Result<u8> {
    let signing_key = SigningKey::generate(&mut OsRng);
    let address = Address::new_from_array(signing_key.verifying_key().to_bytes());
    println!("{address}");
    Ok(0)
}

/// Credit lamports to a wallet.
pub fn run_airdrop(ctx: &CliContext, args: &AirdropArgs) -> Result<u8> {
    let ledger = ledger_file::load(&ctx.ledger_path, ctx.escrow.new_ledger_rent)?;
    let receipt = ledger
        .airdrop(&args.to, args.amount)
        .with_context(|| format!("airdrop to {} failed", args.to))?;
    ledger_file::save(&ctx.ledger_path, &ledger)?;

    tracing::info!(to = %args.to.short(), amount = args.amount, %receipt, "airdrop committed");
    println!("OK: credited {} lamports to {}", args.amount, args.to);
    println!("  Balance: {}", ledger.balance(&args.to));
    println!("  Receipt: {receipt}");
    Ok(0)
}

/// Print the balance of an address.
pub fn run_balance(ctx: &CliContext, args: &BalanceArgs) -> Result<u8> {
    let ledger = ledger_file::load(&ctx.ledger_path, ctx.escrow.new_ledger_rent)?;
    println!("{}", ledger.balance(&args.of));
    Ok(0)
}
