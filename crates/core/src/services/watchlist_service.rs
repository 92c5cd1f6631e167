use log::debug;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::holding::{Holding, HoldingStatus};
use crate::models::portfolio::Portfolio;
use crate::models::watchlist::WatchlistItem;

/// Manages the watchlist. One entry per symbol.
pub struct WatchlistService;

impl WatchlistService {
    pub fn new() -> Self {
        Self
    }

    pub fn add_item(&self, portfolio: &mut Portfolio, mut item: WatchlistItem) -> Result<(), CoreError> {
        item.symbol = item.symbol.trim().to_uppercase();
        Self::validate(&item)?;

        if portfolio.watchlist.iter().any(|w| w.id == item.id) {
            return Err(CoreError::ValidationError(format!(
                "Watchlist id {} is already in use",
                item.id
            )));
        }
        if portfolio.watchlist.iter().any(|w| w.symbol == item.symbol) {
            return Err(CoreError::DuplicateSymbol(item.symbol));
        }

        debug!("Watching {}", item.symbol);
        portfolio.watchlist.push(item);
        Ok(())
    }

    /// Replace the item with `updated.id`, keeping its original `added_at`.
    pub fn update_item(&self, portfolio: &mut Portfolio, mut updated: WatchlistItem) -> Result<(), CoreError> {
        let idx = Self::index_of(portfolio, updated.id)?;

        updated.symbol = updated.symbol.trim().to_uppercase();
        Self::validate(&updated)?;

        if portfolio
            .watchlist
            .iter()
            .any(|w| w.id != updated.id && w.symbol == updated.symbol)
        {
            return Err(CoreError::DuplicateSymbol(updated.symbol));
        }

        updated.added_at = portfolio.watchlist[idx].added_at;
        portfolio.watchlist[idx] = updated;
        Ok(())
    }

    pub fn remove_item(&self, portfolio: &mut Portfolio, id: Uuid) -> Result<WatchlistItem, CoreError> {
        let idx = Self::index_of(portfolio, id)?;
        Ok(portfolio.watchlist.remove(idx))
    }

    /// Build a zero-share holding (status Watch) from a watchlist entry.
    ///
    /// The target price is a buy price, not a valuation, so it is appended to
    /// the notes and the holding's fair value stays unset.
    pub fn promote_to_holding(&self, item: &WatchlistItem, current_price: f64) -> Holding {
        let mut holding = Holding::new(item.symbol.clone(), item.name_en.clone(), 0, 0.0, current_price)
            .with_status(HoldingStatus::Watch)
            .with_sector(item.sector.clone());
        holding.name_ar = item.name_ar.clone();

        let notes: Vec<String> = item
            .notes
            .iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .chain(item.target_price.map(|t| format!("Watchlist target price: {t}")))
            .collect();
        holding.notes = (!notes.is_empty()).then(|| notes.join("\n"));
        holding
    }

    fn index_of(portfolio: &Portfolio, id: Uuid) -> Result<usize, CoreError> {
        portfolio
            .watchlist
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| CoreError::WatchlistItemNotFound(id.to_string()))
    }

    fn validate(item: &WatchlistItem) -> Result<(), CoreError> {
        if item.symbol.is_empty() {
            return Err(CoreError::ValidationError("Symbol must not be empty".into()));
        }
        if let Some(target) = item.target_price {
            if !(target.is_finite() && target > 0.0) {
                return Err(CoreError::ValidationError(format!(
                    "Target price of {} must be positive",
                    item.symbol
                )));
            }
        }
        Ok(())
    }
}

impl Default for WatchlistService {
    fn default() -> Self {
        Self::new()
    }
}
