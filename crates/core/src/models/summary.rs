use serde::{Deserialize, Serialize};

/// Totals across a (possibly filtered) set of holdings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Number of holdings aggregated
    pub count: usize,

    /// Sum of shares × current price
    pub total_value: f64,

    /// Sum of shares × average cost
    pub total_cost: f64,

    /// total_value − total_cost
    pub total_profit_loss: f64,

    /// total_profit_loss / total_cost × 100, or 0 when nothing was paid
    pub profit_loss_percent: f64,
}

/// One slice of an allocation breakdown (by sector or role).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub label: String,
    pub value: f64,
    /// Share of the total market value, 0–100
    pub percent: f64,
}

/// Actual vs. target weight for a holding that has a target percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDrift {
    pub symbol: String,
    pub actual_percent: f64,
    pub target_percent: f64,
    /// actual − target; positive means overweight
    pub drift: f64,
}

/// Totals across the certificates that are still earning interest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificateSummary {
    pub active_count: usize,
    pub total_principal: f64,
    pub annual_interest: f64,
    /// annual_interest / 12
    pub monthly_income: f64,
}
