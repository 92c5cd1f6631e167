//! Plain JSON backup/restore of every record in a portfolio.
//!
//! Unlike the encrypted `.egxp` file this format is human-readable and meant
//! for moving data between devices or app versions. Settings are not part of
//! a backup.

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::certificate::Certificate;
use crate::models::holding::Holding;
use crate::models::portfolio::Portfolio;
use crate::models::watchlist::WatchlistItem;
use crate::services::certificate_service::CertificateService;
use crate::services::holding_service::HoldingService;
use crate::services::watchlist_service::WatchlistService;

pub const BACKUP_VERSION: u16 = 1;

/// On-disk shape of a JSON backup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    pub version: u16,
    pub exported_at: DateTime<Utc>,
    #[serde(default)]
    pub holdings: Vec<Holding>,
    #[serde(default)]
    pub watchlist: Vec<WatchlistItem>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

/// How an import treats records already in the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportMode {
    /// Drop all existing records first
    Replace,
    /// Keep existing records; skip incoming ones whose id or symbol is taken
    Merge,
}

/// Counts of records written (and skipped) by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub holdings: usize,
    pub watchlist: usize,
    pub certificates: usize,
    pub skipped: usize,
}

/// Serialize all records as pretty-printed JSON.
pub fn export_backup(portfolio: &Portfolio, now: DateTime<Utc>) -> Result<String, CoreError> {
    let backup = Backup {
        version: BACKUP_VERSION,
        exported_at: now,
        holdings: portfolio.holdings.clone(),
        watchlist: portfolio.watchlist.clone(),
        certificates: portfolio.certificates.clone(),
    };
    serde_json::to_string_pretty(&backup)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize backup: {e}")))
}

/// Parse a backup without touching any portfolio.
pub fn parse_backup(json: &str) -> Result<Backup, CoreError> {
    let backup: Backup = serde_json::from_str(json)?;
    if backup.version == 0 || backup.version > BACKUP_VERSION {
        return Err(CoreError::UnsupportedVersion(backup.version));
    }
    Ok(backup)
}

/// Restore records from a JSON backup.
///
/// Every record is validated against a scratch copy first; on any error the
/// portfolio is left untouched.
pub fn import_backup(
    portfolio: &mut Portfolio,
    json: &str,
    mode: ImportMode,
) -> Result<ImportReport, CoreError> {
    let backup = parse_backup(json)?;

    let mut scratch = match mode {
        ImportMode::Replace => Portfolio {
            settings: portfolio.settings.clone(),
            ..Portfolio::default()
        },
        ImportMode::Merge => portfolio.clone(),
    };
    let mut report = ImportReport::default();

    let holding_service = HoldingService::new();
    for holding in backup.holdings {
        let taken = scratch
            .holdings
            .iter()
            .any(|h| h.id == holding.id || h.symbol == holding.symbol.trim().to_uppercase());
        if mode == ImportMode::Merge && taken {
            warn!("Skipping holding {}: already present", holding.symbol);
            report.skipped += 1;
            continue;
        }
        holding_service.add_holding(&mut scratch, holding)?;
        report.holdings += 1;
    }

    let watchlist_service = WatchlistService::new();
    for item in backup.watchlist {
        let taken = scratch
            .watchlist
            .iter()
            .any(|w| w.id == item.id || w.symbol == item.symbol.trim().to_uppercase());
        if mode == ImportMode::Merge && taken {
            warn!("Skipping watchlist item {}: already present", item.symbol);
            report.skipped += 1;
            continue;
        }
        watchlist_service.add_item(&mut scratch, item)?;
        report.watchlist += 1;
    }

    let certificate_service = CertificateService::new();
    for cert in backup.certificates {
        if mode == ImportMode::Merge && scratch.certificates.iter().any(|c| c.id == cert.id) {
            warn!("Skipping certificate {}: already present", cert.id);
            report.skipped += 1;
            continue;
        }
        certificate_service.add_certificate(&mut scratch, cert)?;
        report.certificates += 1;
    }

    *portfolio = scratch;
    info!(
        "Imported {} holdings, {} watchlist items, {} certificates ({} skipped)",
        report.holdings, report.watchlist, report.certificates, report.skipped
    );
    Ok(report)
}
