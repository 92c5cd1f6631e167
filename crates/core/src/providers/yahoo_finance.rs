use async_trait::async_trait;

use super::traits::QuoteProvider;
use crate::errors::CoreError;

const PROVIDER_NAME: &str = "Yahoo Finance";

/// Yahoo Finance quotes for EGX listings.
///
/// - **Free**: No API key required.
/// - **Symbols**: EGX tickers are listed with an exchange suffix
///   (e.g. "COMI" is "COMI.CA"); prices come back in EGP.
///
/// Not WASM-compatible (uses native reqwest/tokio connectors).
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
    suffix: String,
}

impl YahooFinanceProvider {
    pub fn new(suffix: impl Into<String>) -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new().map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to create connector: {e}"),
        })?;
        Ok(Self {
            connector,
            suffix: suffix.into(),
        })
    }

    /// "comi" → "COMI.CA". Symbols that already carry the suffix are left alone.
    pub fn provider_symbol(&self, symbol: &str) -> String {
        let upper = symbol.trim().to_uppercase();
        if self.suffix.is_empty() || upper.ends_with(&self.suffix.to_uppercase()) {
            upper
        } else {
            format!("{upper}{}", self.suffix.to_uppercase())
        }
    }
}

#[async_trait]
impl QuoteProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        let ticker = self.provider_symbol(symbol);

        let resp = self
            .connector
            .get_latest_quotes(&ticker, "1d")
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to fetch latest quote for {ticker}: {e}"),
            })?;

        let quote = resp.last_quote().map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("No quote data for {ticker}: {e}"),
        })?;

        if !(quote.close.is_finite() && quote.close > 0.0) {
            return Err(CoreError::PriceNotAvailable(ticker));
        }
        Ok(quote.close)
    }
}
