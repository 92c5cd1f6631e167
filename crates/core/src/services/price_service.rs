use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::holding::Holding;
use crate::providers::registry::QuoteProviderRegistry;

/// A symbol whose price could not be refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshFailure {
    pub symbol: String,
    pub message: String,
}

/// Outcome of a price refresh over a set of holdings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefreshReport {
    /// Symbols whose price was written
    pub updated: Vec<String>,
    pub failed: Vec<RefreshFailure>,
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Pulls current prices from quote providers into holdings.
///
/// Providers are tried in registry order; the first successful quote is
/// used. A failure for one symbol never aborts the others.
pub struct PriceService {
    registry: QuoteProviderRegistry,
}

impl PriceService {
    pub fn new(registry: QuoteProviderRegistry) -> Self {
        Self { registry }
    }

    pub fn has_provider(&self) -> bool {
        !self.registry.is_empty()
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.registry.provider_names()
    }

    /// Current price of one symbol, with provider fallback.
    pub async fn fetch_price(&self, symbol: &str) -> Result<f64, CoreError> {
        let mut last_err = CoreError::NoProvider;

        for provider in self.registry.providers() {
            match provider.get_current_price(symbol).await {
                Ok(price) if price.is_finite() && price >= 0.0 => {
                    debug!("{} quoted {symbol} at {price}", provider.name());
                    return Ok(price);
                }
                Ok(price) => {
                    warn!("{} returned unusable price {price} for {symbol}", provider.name());
                    last_err = CoreError::PriceNotAvailable(symbol.to_string());
                }
                Err(e) => {
                    warn!("{} failed for {symbol}: {e}", provider.name());
                    last_err = e;
                }
            }
        }

        Err(last_err)
    }

    /// Refresh the price and `last_updated` of every holding.
    ///
    /// Fails only when no provider is registered; per-symbol errors land in
    /// the report.
    pub async fn refresh_holdings(
        &self,
        holdings: &mut [Holding],
        now: DateTime<Utc>,
    ) -> Result<RefreshReport, CoreError> {
        if !self.has_provider() {
            return Err(CoreError::NoProvider);
        }

        let mut report = RefreshReport::default();
        for holding in holdings.iter_mut() {
            match self.fetch_price(&holding.symbol).await {
                Ok(price) => {
                    holding.current_price = price;
                    holding.last_updated = now;
                    report.updated.push(holding.symbol.clone());
                }
                Err(e) => report.failed.push(RefreshFailure {
                    symbol: holding.symbol.clone(),
                    message: e.to_string(),
                }),
            }
        }

        Ok(report)
    }
}
