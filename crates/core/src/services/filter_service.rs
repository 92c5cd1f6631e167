use std::cmp::Ordering;

use crate::models::filter::{HoldingFilter, HoldingSortOrder};
use crate::models::holding::Holding;

fn by_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Narrows and orders the holdings list shown on screen.
pub struct FilterService;

impl FilterService {
    pub fn new() -> Self {
        Self
    }

    /// True when the holding meets every criterion that is set.
    ///
    /// Sectors compare with surrounding whitespace ignored, the same way
    /// [`distinct_sectors`](Self::distinct_sectors) lists them.
    pub fn matches(&self, holding: &Holding, filter: &HoldingFilter) -> bool {
        if let Some(role) = filter.role {
            if holding.role != role {
                return false;
            }
        }
        if let Some(status) = filter.status {
            if holding.status != status {
                return false;
            }
        }
        if let Some(sector) = &filter.sector {
            if holding.sector.trim() != sector.trim() {
                return false;
            }
        }

        let query = filter.search.trim().to_lowercase();
        query.is_empty()
            || holding.symbol.to_lowercase().contains(&query)
            || holding.name_en.to_lowercase().contains(&query)
    }

    /// Order holdings in place. Stable: ties keep their relative order.
    pub fn sort_holdings(&self, holdings: &mut [&Holding], order: HoldingSortOrder) {
        match order {
            HoldingSortOrder::ValueDesc => {
                holdings.sort_by(|a, b| by_f64(b.market_value(), a.market_value()))
            }
            HoldingSortOrder::ValueAsc => {
                holdings.sort_by(|a, b| by_f64(a.market_value(), b.market_value()))
            }
            HoldingSortOrder::ProfitLossPercentDesc => holdings
                .sort_by(|a, b| by_f64(b.profit_loss_percent(), a.profit_loss_percent())),
            HoldingSortOrder::ProfitLossPercentAsc => holdings
                .sort_by(|a, b| by_f64(a.profit_loss_percent(), b.profit_loss_percent())),
            HoldingSortOrder::SymbolAsc => holdings.sort_by(|a, b| a.symbol.cmp(&b.symbol)),
            HoldingSortOrder::LastUpdatedDesc => {
                holdings.sort_by(|a, b| b.last_updated.cmp(&a.last_updated))
            }
        }
    }

    /// Filter, then sort.
    pub fn filter_and_sort<'a>(
        &self,
        holdings: &'a [Holding],
        filter: &HoldingFilter,
        order: HoldingSortOrder,
    ) -> Vec<&'a Holding> {
        let mut selected: Vec<&Holding> = holdings
            .iter()
            .filter(|h| self.matches(h, filter))
            .collect();
        self.sort_holdings(&mut selected, order);
        selected
    }

    /// Non-empty sectors present in the holdings, sorted and de-duplicated.
    pub fn distinct_sectors(&self, holdings: &[Holding]) -> Vec<String> {
        let mut sectors: Vec<String> = holdings
            .iter()
            .map(|h| h.sector.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        sectors.sort();
        sectors.dedup();
        sectors
    }
}

impl Default for FilterService {
    fn default() -> Self {
        Self::new()
    }
}
