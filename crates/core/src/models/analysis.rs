use serde::{Deserialize, Serialize};

/// Buy/sell classification from the price-to-fair-value ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    /// price / fair value < 0.70
    StrongBuy,
    /// price / fair value < 0.90
    Buy,
    /// 0.90 ≤ ratio ≤ 1.10
    Hold,
    /// 1.10 < ratio ≤ 1.30
    Sell,
    /// ratio > 1.30
    StrongSell,
    /// No fair value (or no usable price) to compare against
    NoData,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::StrongBuy => write!(f, "Strong Buy"),
            Recommendation::Buy => write!(f, "Buy"),
            Recommendation::Hold => write!(f, "Hold"),
            Recommendation::Sell => write!(f, "Sell"),
            Recommendation::StrongSell => write!(f, "Strong Sell"),
            Recommendation::NoData => write!(f, "No Data"),
        }
    }
}

/// Where a resolved fair value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FairValueSource {
    /// User-entered estimate
    Manual,
    /// EPS × (8.5 + 2 × growth)
    Graham,
}

/// Output of the valuation calculator for one price/fundamentals pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub resolved_fair_value: Option<f64>,
    pub fair_value_source: Option<FairValueSource>,
    /// (fair value − price) / price × 100
    pub upside_percent: Option<f64>,
    /// (fair value − price) / fair value × 100
    pub margin_of_safety: Option<f64>,
    pub recommendation: Recommendation,
}

/// Per-holding valuation view. Recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub symbol: String,
    pub current_price: f64,
    pub fair_value: Option<f64>,
    pub fair_value_source: Option<FairValueSource>,
    pub upside_percent: Option<f64>,
    pub margin_of_safety: Option<f64>,
    pub recommendation: Recommendation,
}
