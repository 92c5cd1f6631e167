use async_trait::async_trait;

use crate::errors::CoreError;

/// Source of current market prices for EGX symbols.
///
/// Implementations receive the bare EGX ticker (e.g. "COMI") and are
/// responsible for any exchange-specific symbol mapping.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Latest traded price of `symbol`, in the listing currency.
    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError>;
}
