use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stock the owner follows but does not (necessarily) hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistItem {
    pub id: Uuid,

    /// Ticker symbol, uppercased
    pub symbol: String,

    pub name_en: String,

    #[serde(default)]
    pub name_ar: String,

    #[serde(default)]
    pub sector: String,

    /// Price at which the owner would consider buying
    #[serde(default)]
    pub target_price: Option<f64>,

    #[serde(default)]
    pub notes: Option<String>,

    pub added_at: DateTime<Utc>,
}

impl WatchlistItem {
    pub fn new(symbol: impl Into<String>, name_en: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into().trim().to_uppercase(),
            name_en: name_en.into(),
            name_ar: String::new(),
            sector: String::new(),
            target_price: None,
            notes: None,
            added_at: Utc::now(),
        }
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = sector.into();
        self
    }

    pub fn with_target_price(mut self, target: f64) -> Self {
        self.target_price = Some(target);
        self
    }

    /// True once the market price has fallen to (or below) the target.
    pub fn is_target_reached(&self, current_price: f64) -> bool {
        matches!(self.target_price, Some(target) if current_price > 0.0 && current_price <= target)
    }
}
