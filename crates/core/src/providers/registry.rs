use super::traits::QuoteProvider;
#[cfg(not(target_arch = "wasm32"))]
use super::yahoo_finance::YahooFinanceProvider;

/// Quote providers in priority order. The first one that answers wins.
pub struct QuoteProviderRegistry {
    providers: Vec<Box<dyn QuoteProvider>>,
}

impl QuoteProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Registry with the built-in providers. `quote_suffix` maps an EGX
    /// ticker onto the provider's symbol (".CA" for Yahoo's Cairo listing).
    pub fn new_with_defaults(quote_suffix: &str) -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::new();

        #[cfg(not(target_arch = "wasm32"))]
        {
            match YahooFinanceProvider::new(quote_suffix) {
                Ok(yahoo) => registry.register(Box::new(yahoo)),
                Err(e) => log::warn!("Yahoo Finance provider unavailable: {e}"),
            }
        }
        #[cfg(target_arch = "wasm32")]
        let _ = quote_suffix;

        registry
    }

    /// Register a provider after the existing ones.
    pub fn register(&mut self, provider: Box<dyn QuoteProvider>) {
        self.providers.push(provider);
    }

    pub fn providers(&self) -> &[Box<dyn QuoteProvider>] {
        &self.providers
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }
}

impl Default for QuoteProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
