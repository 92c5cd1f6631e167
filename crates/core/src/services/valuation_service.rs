//! Fair value estimation and buy/sell classification.
//!
//! Stateless and pure, no I/O. Missing or unusable inputs degrade to
//! `Recommendation::NoData` instead of failing.

use crate::models::analysis::{FairValueSource, Recommendation, StockAnalysis, Valuation};
use crate::models::holding::Holding;
use crate::models::settings::DEFAULT_GROWTH_RATE;

/// P/E of a no-growth company in Graham's formula.
const GRAHAM_BASE_MULTIPLE: f64 = 8.5;

/// Upper bounds (exclusive) of the price / fair value ratio bands.
const STRONG_BUY_BELOW: f64 = 0.70;
const BUY_BELOW: f64 = 0.90;
/// Upper bounds (inclusive) of the hold and sell bands.
const HOLD_UP_TO: f64 = 1.10;
const SELL_UP_TO: f64 = 1.30;

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Fair value resolution and recommendation bands.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Graham's intrinsic value estimate: `EPS × (8.5 + 2 × growth)`.
    ///
    /// Returns `None` for a missing or non-positive EPS and for a result that is
    /// not a positive number (e.g. a deeply negative growth rate).
    pub fn graham_fair_value(&self, eps: Option<f64>, growth_rate: Option<f64>) -> Option<f64> {
        let eps = positive(eps)?;
        let growth = growth_rate
            .filter(|g| g.is_finite())
            .unwrap_or(DEFAULT_GROWTH_RATE);
        positive(Some(eps * (GRAHAM_BASE_MULTIPLE + 2.0 * growth)))
    }

    /// Manual override first, then the Graham value.
    pub fn resolve_fair_value(
        &self,
        eps: Option<f64>,
        growth_rate: Option<f64>,
        fair_value_override: Option<f64>,
    ) -> Option<(f64, FairValueSource)> {
        if let Some(manual) = positive(fair_value_override) {
            return Some((manual, FairValueSource::Manual));
        }
        self.graham_fair_value(eps, growth_rate).map(|fv| (fv, FairValueSource::Graham))
    }

    /// Classify a price against a fair value.
    pub fn classify(&self, current_price: f64, fair_value: Option<f64>) -> Recommendation {
        let fair_value = match positive(fair_value) {
            Some(fv) => fv,
            None => return Recommendation::NoData,
        };
        if !(current_price.is_finite() && current_price > 0.0) {
            return Recommendation::NoData;
        }

        let ratio = current_price / fair_value;
        if ratio < STRONG_BUY_BELOW {
            Recommendation::StrongBuy
        } else if ratio < BUY_BELOW {
            Recommendation::Buy
        } else if ratio <= HOLD_UP_TO {
            Recommendation::Hold
        } else if ratio <= SELL_UP_TO {
            Recommendation::Sell
        } else {
            Recommendation::StrongSell
        }
    }

    /// Resolve a fair value and derive upside, margin of safety and a
    /// recommendation from it.
    pub fn compute_valuation(
        &self,
        current_price: f64,
        eps: Option<f64>,
        growth_rate: Option<f64>,
        fair_value_override: Option<f64>,
    ) -> Valuation {
        let resolved = self.resolve_fair_value(eps, growth_rate, fair_value_override);
        let fair_value = resolved.map(|(fv, _)| fv);
        let price_usable = current_price.is_finite() && current_price > 0.0;

        let upside_percent = match fair_value {
            Some(fv) if price_usable => Some((fv - current_price) / current_price * 100.0),
            _ => None,
        };
        let margin_of_safety = match fair_value {
            Some(fv) if current_price.is_finite() => Some((fv - current_price) / fv * 100.0),
            _ => None,
        };

        Valuation {
            resolved_fair_value: fair_value,
            fair_value_source: resolved.map(|(_, source)| source),
            upside_percent,
            margin_of_safety,
            recommendation: self.classify(current_price, fair_value),
        }
    }

    /// Valuation view of a single holding.
    ///
    /// `default_growth_rate` stands in for a missing growth figure.
    pub fn analyze_holding(&self, holding: &Holding, default_growth_rate: f64) -> StockAnalysis {
        let growth = holding.growth_rate.or(Some(default_growth_rate));
        let valuation = self.compute_valuation(
            holding.current_price,
            holding.eps,
            growth,
            holding.fair_value,
        );

        StockAnalysis {
            symbol: holding.symbol.clone(),
            current_price: holding.current_price,
            fair_value: valuation.resolved_fair_value,
            fair_value_source: valuation.fair_value_source,
            upside_percent: valuation.upside_percent,
            margin_of_safety: valuation.margin_of_safety,
            recommendation: valuation.recommendation,
        }
    }

    /// Analyze every holding, keeping input order.
    pub fn analyze_holdings(&self, holdings: &[Holding], default_growth_rate: f64) -> Vec<StockAnalysis> {
        holdings
            .iter()
            .map(|h| self.analyze_holding(h, default_growth_rate))
            .collect()
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
