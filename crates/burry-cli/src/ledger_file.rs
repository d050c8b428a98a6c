//! JSON snapshot persistence for the ledger.
//!
//! A missing file is an empty ledger. Writes go to a sibling temp file
//! that is then renamed over the target, so an interrupted write never
//! leaves a truncated snapshot behind.

use std::path::Path;

use anyhow::{Context, Result};
use burry_ledger::{Ledger, LedgerSnapshot, RentSchedule};

/// Load the ledger at `path`, or an empty one using `rent` if the file
/// does not exist yet. An existing file keeps its own rent schedule; a
/// configured rate that disagrees with it is logged and ignored.
pub fn load(path: &Path, rent: RentSchedule) -> Result<Ledger> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "ledger file not found, starting empty");
        return Ok(Ledger::new(rent));
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read ledger file: {}", path.display()))?;
    let snapshot: LedgerSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse ledger file: {}", path.display()))?;
    if snapshot.rent != rent {
        tracing::warn!(
            path = %path.display(),
            ledger_lamports_per_byte = snapshot.rent.lamports_per_byte,
            configured_lamports_per_byte = rent.lamports_per_byte,
            "configured rent differs from the ledger file, keeping the ledger's"
        );
    }
    tracing::debug!(
        path = %path.display(),
        accounts = snapshot.accounts.len(),
        sequence = snapshot.sequence,
        "ledger loaded"
    );
    Ok(Ledger::from_snapshot(snapshot))
}

/// Write `ledger` to `path`, creating parent directories as needed.
pub fn save(path: &Path, ledger: &Ledger) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&ledger.snapshot())
        .context("failed to serialize ledger")?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)
        .with_context(|| format!("failed to write ledger file: {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace ledger file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use burry_core::Address;

    #[test]
    fn missing_file_is_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = load(&dir.path().join("absent.json"), RentSchedule::new(5)).unwrap();
        assert_eq!(ledger.rent(), RentSchedule::new(5));
        assert!(ledger.snapshot().accounts.is_empty());
    }

    #[test]
    fn save_then_load_preserves_accounts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/ledger.json");
        let ledger = Ledger::new(RentSchedule::new(7));
        let wallet = Address::new_from_array([4; 32]);
        ledger.airdrop(&wallet, 99).unwrap();

        save(&path, &ledger).unwrap();
        let loaded = load(&path, RentSchedule::default()).unwrap();
        assert_eq!(loaded.balance(&wallet), 99);
        assert_eq!(loaded.rent(), RentSchedule::new(7));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load(&path, RentSchedule::default()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse ledger file"));
    }
}
