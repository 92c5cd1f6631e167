pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use errors::CoreError;
use models::{
    analysis::StockAnalysis,
    certificate::Certificate,
    filter::{HoldingFilter, HoldingSortOrder},
    holding::Holding,
    portfolio::Portfolio,
    settings::Settings,
    summary::{AllocationSlice, CertificateSummary, PortfolioSummary, TargetDrift},
    watchlist::WatchlistItem,
};
use providers::registry::QuoteProviderRegistry;
use services::{
    analytics_service::AnalyticsService, certificate_service::CertificateService,
    filter_service::FilterService, holding_service::HoldingService,
    price_service::{PriceService, RefreshReport},
    valuation_service::ValuationService, watchlist_service::WatchlistService,
};
use storage::backup::{self, ImportMode, ImportReport};
use storage::manager::StorageManager;

/// Main entry point for the EGX portfolio core library.
/// Holds the portfolio state and all services needed to operate on it.
#[must_use]
pub struct EgxPortfolio {
    portfolio: Portfolio,
    holding_service: HoldingService,
    watchlist_service: WatchlistService,
    certificate_service: CertificateService,
    price_service: PriceService,
    analytics_service: AnalyticsService,
    valuation_service: ValuationService,
    filter_service: FilterService,
    /// Set once the host supplies its own quote providers; settings changes
    /// then leave them untouched.
    custom_quote_registry: bool,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for EgxPortfolio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EgxPortfolio")
            .field("holdings", &self.portfolio.holdings.len())
            .field("watchlist", &self.portfolio.watchlist.len())
            .field("certificates", &self.portfolio.certificates.len())
            .field("settings", &self.portfolio.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl EgxPortfolio {
    /// Create a brand new empty portfolio with default settings.
    pub fn create_new() -> Self {
        Self::build(Portfolio::default())
    }

    /// Wrap an already materialized portfolio (e.g. from the host's store).
    pub fn from_portfolio(portfolio: Portfolio) -> Self {
        Self::build(portfolio)
    }

    /// Replace the quote providers (custom sources, or mocks in tests).
    pub fn with_quote_registry(mut self, registry: QuoteProviderRegistry) -> Self {
        self.price_service = PriceService::new(registry);
        self.custom_quote_registry = true;
        self
    }

    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Load an existing portfolio from encrypted bytes (password required).
    pub fn load_from_bytes(encrypted: &[u8], password: &str) -> Result<Self, CoreError> {
        let portfolio = StorageManager::load_from_bytes(encrypted, password)?;
        Ok(Self::build(portfolio))
    }

    /// Save the portfolio to encrypted bytes. Clears the unsaved-changes flag.
    pub fn save_to_bytes(&mut self, password: &str) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.portfolio, password)?;
        self.dirty = false;
        Ok(bytes)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<Self, CoreError> {
        let portfolio = StorageManager::load_from_file(path, password)?;
        Ok(Self::build(portfolio))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: &str, password: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.portfolio, path, password)?;
        self.dirty = false;
        Ok(())
    }

    /// Re-encrypt with a new password after verifying the current one
    /// against the most recently saved bytes.
    pub fn change_password(
        &mut self,
        last_saved_bytes: &[u8],
        current_password: &str,
        new_password: &str,
    ) -> Result<Vec<u8>, CoreError> {
        StorageManager::load_from_bytes(last_saved_bytes, current_password)?;
        let new_bytes = StorageManager::save_to_bytes(&self.portfolio, new_password)?;
        self.dirty = false;
        Ok(new_bytes)
    }

    /// Returns `true` if the portfolio has been modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Add a holding; returns its id.
    pub fn add_holding(&mut self, holding: Holding) -> Result<Uuid, CoreError> {
        let id = holding.id;
        self.holding_service.add_holding(&mut self.portfolio, holding)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update_holding(&mut self, holding: Holding) -> Result<(), CoreError> {
        self.holding_service
            .update_holding(&mut self.portfolio, holding, Utc::now())?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_holding(&mut self, id: Uuid) -> Result<Holding, CoreError> {
        let removed = self.holding_service.remove_holding(&mut self.portfolio, id)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Manually set a holding's market price.
    pub fn update_price(&mut self, id: Uuid, price: f64) -> Result<(), CoreError> {
        self.holding_service
            .update_price(&mut self.portfolio, id, price, Utc::now())?;
        self.dirty = true;
        Ok(())
    }

    #[must_use]
    pub fn get_holding(&self, id: Uuid) -> Option<&Holding> {
        self.holding_service.get_holding(&self.portfolio, id)
    }

    #[must_use]
    pub fn find_holding(&self, symbol: &str) -> Option<&Holding> {
        self.holding_service.find_by_symbol(&self.portfolio, symbol)
    }

    /// All holdings in insertion order.
    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.portfolio.holdings
    }

    /// Holdings passing `filter`, in `order`.
    #[must_use]
    pub fn list_holdings(&self, filter: &HoldingFilter, order: HoldingSortOrder) -> Vec<&Holding> {
        self.filter_service.filter_and_sort(&self.portfolio.holdings, filter, order)
    }

    /// Sectors present in the holdings, for filter choices.
    #[must_use]
    pub fn sectors(&self) -> Vec<String> {
        self.filter_service.distinct_sectors(&self.portfolio.holdings)
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Totals over the holdings passing `filter`.
    #[must_use]
    pub fn summary(&self, filter: &HoldingFilter) -> PortfolioSummary {
        self.analytics_service.aggregate(
            self.portfolio
                .holdings
                .iter()
                .filter(|h| self.filter_service.matches(h, filter)),
        )
    }

    #[must_use]
    pub fn allocation_by_sector(&self) -> Vec<AllocationSlice> {
        self.analytics_service.allocation_by_sector(&self.portfolio.holdings)
    }

    #[must_use]
    pub fn allocation_by_role(&self) -> Vec<AllocationSlice> {
        self.analytics_service.allocation_by_role(&self.portfolio.holdings)
    }

    #[must_use]
    pub fn target_drift(&self) -> Vec<TargetDrift> {
        self.analytics_service.target_drift(&self.portfolio.holdings)
    }

    /// Valuation of one holding, using the configured default growth rate.
    #[must_use]
    pub fn analyze(&self, id: Uuid) -> Option<StockAnalysis> {
        let growth = self.portfolio.settings.default_growth_rate;
        self.get_holding(id)
            .map(|h| self.valuation_service.analyze_holding(h, growth))
    }

    /// Valuation of every holding, in insertion order.
    #[must_use]
    pub fn analyze_all(&self) -> Vec<StockAnalysis> {
        self.valuation_service.analyze_holdings(
            &self.portfolio.holdings,
            self.portfolio.settings.default_growth_rate,
        )
    }

    // ── Watchlist ───────────────────────────────────────────────────

    pub fn add_watchlist_item(&mut self, item: WatchlistItem) -> Result<Uuid, CoreError> {
        let id = item.id;
        self.watchlist_service.add_item(&mut self.portfolio, item)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update_watchlist_item(&mut self, item: WatchlistItem) -> Result<(), CoreError> {
        self.watchlist_service.update_item(&mut self.portfolio, item)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_watchlist_item(&mut self, id: Uuid) -> Result<WatchlistItem, CoreError> {
        let removed = self.watchlist_service.remove_item(&mut self.portfolio, id)?;
        self.dirty = true;
        Ok(removed)
    }

    #[must_use]
    pub fn watchlist(&self) -> &[WatchlistItem] {
        &self.portfolio.watchlist
    }

    /// Move a watchlist entry into the holdings as a zero-share position.
    /// Returns the new holding's id. Nothing changes on error.
    pub fn promote_watchlist_item(&mut self, id: Uuid, current_price: f64) -> Result<Uuid, CoreError> {
        let item = self
            .portfolio
            .watchlist
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or_else(|| CoreError::WatchlistItemNotFound(id.to_string()))?;

        let holding = self.watchlist_service.promote_to_holding(&item, current_price);
        let holding_id = holding.id;
        self.holding_service.add_holding(&mut self.portfolio, holding)?;
        self.watchlist_service.remove_item(&mut self.portfolio, id)?;
        self.dirty = true;
        Ok(holding_id)
    }

    // ── Certificates ────────────────────────────────────────────────

    pub fn add_certificate(&mut self, cert: Certificate) -> Result<Uuid, CoreError> {
        let id = cert.id;
        self.certificate_service
            .add_certificate(&mut self.portfolio, cert)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update_certificate(&mut self, cert: Certificate) -> Result<(), CoreError> {
        self.certificate_service
            .update_certificate(&mut self.portfolio, cert)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_certificate(&mut self, id: Uuid) -> Result<Certificate, CoreError> {
        let removed = self
            .certificate_service
            .remove_certificate(&mut self.portfolio, id)?;
        self.dirty = true;
        Ok(removed)
    }

    #[must_use]
    pub fn certificates(&self) -> &[Certificate] {
        &self.portfolio.certificates
    }

    #[must_use]
    pub fn certificate_summary(&self, today: NaiveDate) -> CertificateSummary {
        self.analytics_service
            .summarize_certificates(&self.portfolio.certificates, today)
    }

    /// Persist `Matured` on certificates past their maturity date.
    pub fn mark_matured_certificates(&mut self, today: NaiveDate) -> usize {
        let changed = self
            .certificate_service
            .mark_matured(&mut self.portfolio, today);
        if changed > 0 {
            self.dirty = true;
        }
        changed
    }

    // ── Backup / Restore ────────────────────────────────────────────

    /// All records as a JSON backup string.
    pub fn export_backup(&self) -> Result<String, CoreError> {
        backup::export_backup(&self.portfolio, Utc::now())
    }

    /// Restore records from a JSON backup (all-or-nothing).
    pub fn import_backup(&mut self, json: &str, mode: ImportMode) -> Result<ImportReport, CoreError> {
        let report = backup::import_backup(&mut self.portfolio, json, mode)?;
        self.dirty = true;
        Ok(report)
    }

    // ── Prices ──────────────────────────────────────────────────────

    /// Fetch current prices for every holding from the quote providers.
    pub async fn refresh_prices(&mut self) -> Result<RefreshReport, CoreError> {
        let report = self
            .price_service
            .refresh_holdings(&mut self.portfolio.holdings, Utc::now())
            .await?;
        if !report.updated.is_empty() {
            self.dirty = true;
        }
        Ok(report)
    }

    #[must_use]
    pub fn quote_provider_names(&self) -> Vec<String> {
        self.price_service.provider_names()
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.portfolio.settings
    }

    /// Set the display currency. Must be exactly 3 ASCII letters.
    pub fn set_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let code = currency.trim().to_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., EGP, USD)"
            )));
        }
        self.portfolio.settings.currency = code;
        self.dirty = true;
        Ok(())
    }

    /// Growth rate (percent) assumed for holdings without one.
    pub fn set_default_growth_rate(&mut self, growth_rate: f64) -> Result<(), CoreError> {
        if !growth_rate.is_finite() {
            return Err(CoreError::ValidationError(
                "Default growth rate must be a number".into(),
            ));
        }
        self.portfolio.settings.default_growth_rate = growth_rate;
        self.dirty = true;
        Ok(())
    }

    /// Change the exchange suffix used for quotes. The default providers are
    /// rebuilt so it takes effect immediately. A registry installed through
    /// [`with_quote_registry`](Self::with_quote_registry) is kept as is.
    pub fn set_quote_suffix(&mut self, suffix: &str) {
        self.portfolio.settings.quote_suffix = suffix.trim().to_string();
        if !self.custom_quote_registry {
            let registry =
                QuoteProviderRegistry::new_with_defaults(&self.portfolio.settings.quote_suffix);
            self.price_service = PriceService::new(registry);
        }
        self.dirty = true;
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(portfolio: Portfolio) -> Self {
        let registry = QuoteProviderRegistry::new_with_defaults(&portfolio.settings.quote_suffix);

        Self {
            portfolio,
            holding_service: HoldingService::new(),
            watchlist_service: WatchlistService::new(),
            certificate_service: CertificateService::new(),
            price_service: PriceService::new(registry),
            analytics_service: AnalyticsService::new(),
            valuation_service: ValuationService::new(),
            filter_service: FilterService::new(),
            custom_quote_registry: false,
            dirty: false,
        }
    }
}
