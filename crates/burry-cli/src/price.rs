//! `burry price`: read the configured feed once.

use anyhow::{Context, Result};
use burry_oracle::{HttpPriceFeed, OracleConfig, PriceOracle, StalenessGuard};

use crate::CliContext;

/// Fetch and print the latest observation of the configured feed as JSON.
pub async fn run_price(ctx: &CliContext) -> Result<u8> {
    let config = OracleConfig::from_env().context("invalid oracle configuration")?;
    tracing::debug!(?config, "oracle configuration loaded");
    let feed = HttpPriceFeed::new(&config).context("failed to build price feed client")?;
    let oracle = StalenessGuard::new(feed, config.max_staleness_secs);

    let observation = oracle
        .fetch_price(&ctx.escrow.price_feed)
        .await
        .with_context(|| format!("failed to read feed {}", ctx.escrow.price_feed))?;
    println!(
        "{}",
        serde_json::to_string_pretty(&observation).context("failed to serialize observation")?
    );
    Ok(0)
}
