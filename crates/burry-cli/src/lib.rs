//! # burry-cli -- Operator CLI for the Burry escrow stack
//!
//! Provides the `burry` command-line interface. Every command loads the
//! ledger from a JSON snapshot file, runs one operation, and writes the
//! file back if the operation changed anything.
//!
//! ## Subcommands
//!
//! - `burry keygen` / `airdrop` / `balance` -- wallet management.
//! - `burry address` / `deposit` / `withdraw` / `show` -- escrow lifecycle.
//! - `burry price` -- read the configured price feed.
//!
//! ## Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | error |
//! | 2 | withdrawal refused, price condition not met (retry later) |

pub mod account;
pub mod escrow;
pub mod ledger_file;
pub mod price;

use std::path::PathBuf;

use anyhow::{Context, Result};
use burry_escrow::EscrowConfig;

/// Default ledger file location, relative to the working directory.
pub const DEFAULT_LEDGER_PATH: &str = ".burry/ledger.json";

/// Exit code for a withdrawal refused by the price gate.
pub const EXIT_PRICE_NOT_MET: u8 = 2;

/// State shared by all subcommands.
#[derive(Debug, Clone)]
pub struct CliContext {
    /// Ledger snapshot file.
    pub ledger_path: PathBuf,
    /// Escrow program configuration.
    pub escrow: EscrowConfig,
}

impl CliContext {
    /// Build a context, reading escrow configuration from the environment.
    pub fn from_env(ledger_path: PathBuf) -> Result<Self> {
        let escrow = EscrowConfig::from_env().context("invalid escrow configuration")?;
        Ok(Self {
            ledger_path,
            escrow,
        })
    }
}
