use chrono::{DateTime, Utc};
use log::debug;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::holding::Holding;
use crate::models::portfolio::Portfolio;

/// Manages stock positions: validated add/update/remove and price updates.
///
/// Pure business logic: no I/O, no API calls.
pub struct HoldingService;

impl HoldingService {
    pub fn new() -> Self {
        Self
    }

    /// Add a new holding. Symbols are unique within the portfolio.
    pub fn add_holding(&self, portfolio: &mut Portfolio, mut holding: Holding) -> Result<(), CoreError> {
        holding.symbol = holding.symbol.trim().to_uppercase();
        holding.sector = holding.sector.trim().to_string();
        Self::validate(&holding)?;

        if portfolio.holdings.iter().any(|h| h.id == holding.id) {
            return Err(CoreError::ValidationError(format!(
                "Holding id {} is already in use",
                holding.id
            )));
        }
        if portfolio.holdings.iter().any(|h| h.symbol == holding.symbol) {
            return Err(CoreError::DuplicateSymbol(holding.symbol));
        }

        debug!("Adding holding {} ({} shares)", holding.symbol, holding.shares);
        portfolio.holdings.push(holding);
        Ok(())
    }

    /// Replace the holding with `updated.id`. The stored id is kept and
    /// `last_updated` is set to `now`. Nothing changes if validation fails.
    pub fn update_holding(
        &self,
        portfolio: &mut Portfolio,
        mut updated: Holding,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        let idx = Self::index_of(portfolio, updated.id)?;

        updated.symbol = updated.symbol.trim().to_uppercase();
        updated.sector = updated.sector.trim().to_string();
        Self::validate(&updated)?;

        let clash = portfolio
            .holdings
            .iter()
            .any(|h| h.id != updated.id && h.symbol == updated.symbol);
        if clash {
            return Err(CoreError::DuplicateSymbol(updated.symbol));
        }

        updated.last_updated = now;
        debug!("Updating holding {}", updated.symbol);
        portfolio.holdings[idx] = updated;
        Ok(())
    }

    /// Remove a holding by id and return it.
    pub fn remove_holding(&self, portfolio: &mut Portfolio, id: Uuid) -> Result<Holding, CoreError> {
        let idx = Self::index_of(portfolio, id)?;
        let removed = portfolio.holdings.remove(idx);
        debug!("Removed holding {}", removed.symbol);
        Ok(removed)
    }

    /// Set the market price of a holding.
    pub fn update_price(
        &self,
        portfolio: &mut Portfolio,
        id: Uuid,
        price: f64,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        if !(price.is_finite() && price >= 0.0) {
            return Err(CoreError::ValidationError(format!(
                "Price must be a non-negative number, got {price}"
            )));
        }
        let idx = Self::index_of(portfolio, id)?;
        let holding = &mut portfolio.holdings[idx];
        holding.current_price = price;
        holding.last_updated = now;
        Ok(())
    }

    pub fn get_holding<'a>(&self, portfolio: &'a Portfolio, id: Uuid) -> Option<&'a Holding> {
        portfolio.holdings.iter().find(|h| h.id == id)
    }

    /// Case-insensitive symbol lookup.
    pub fn find_by_symbol<'a>(&self, portfolio: &'a Portfolio, symbol: &str) -> Option<&'a Holding> {
        let upper = symbol.trim().to_uppercase();
        portfolio.holdings.iter().find(|h| h.symbol == upper)
    }

    fn index_of(portfolio: &Portfolio, id: Uuid) -> Result<usize, CoreError> {
        portfolio
            .holdings
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| CoreError::HoldingNotFound(id.to_string()))
    }

    /// Field rules:
    /// - symbol non-empty
    /// - average cost and current price finite and ≥ 0
    /// - target percentage within 0–100
    /// - fair value and EPS, when set, > 0
    /// - growth rate, when set, finite
    pub fn validate(holding: &Holding) -> Result<(), CoreError> {
        if holding.symbol.trim().is_empty() {
            return Err(CoreError::ValidationError("Symbol must not be empty".into()));
        }
        if !(holding.average_cost.is_finite() && holding.average_cost >= 0.0) {
            return Err(CoreError::ValidationError(format!(
                "Average cost of {} must be a non-negative number",
                holding.symbol
            )));
        }
        if !(holding.current_price.is_finite() && holding.current_price >= 0.0) {
            return Err(CoreError::ValidationError(format!(
                "Current price of {} must be a non-negative number",
                holding.symbol
            )));
        }
        if let Some(target) = holding.target_percentage {
            if !(0.0..=100.0).contains(&target) {
                return Err(CoreError::ValidationError(format!(
                    "Target percentage of {} must be between 0 and 100, got {target}",
                    holding.symbol
                )));
            }
        }
        if let Some(fv) = holding.fair_value {
            if !(fv.is_finite() && fv > 0.0) {
                return Err(CoreError::ValidationError(format!(
                    "Fair value of {} must be positive",
                    holding.symbol
                )));
            }
        }
        if let Some(eps) = holding.eps {
            if !(eps.is_finite() && eps > 0.0) {
                return Err(CoreError::ValidationError(format!(
                    "EPS of {} must be positive",
                    holding.symbol
                )));
            }
        }
        if let Some(growth) = holding.growth_rate {
            if !growth.is_finite() {
                return Err(CoreError::ValidationError(format!(
                    "Growth rate of {} must be a number",
                    holding.symbol
                )));
            }
        }
        Ok(())
    }
}

impl Default for HoldingService {
    fn default() -> Self {
        Self::new()
    }
}
