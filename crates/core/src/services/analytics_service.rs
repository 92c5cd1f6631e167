use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::certificate::{Certificate, CertificateStatus};
use crate::models::holding::Holding;
use crate::models::summary::{AllocationSlice, CertificateSummary, PortfolioSummary, TargetDrift};

/// Label used for holdings without a sector.
pub const UNCATEGORIZED: &str = "Uncategorized";

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Portfolio analytics over in-memory records: totals, allocation
/// breakdowns, target drift and certificate income.
///
/// Stateless. Every method is a pure function of its arguments.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Totals over the given holdings (typically the filtered list on screen).
    pub fn aggregate<'a, I>(&self, holdings: I) -> PortfolioSummary
    where
        I: IntoIterator<Item = &'a Holding>,
    {
        let mut count = 0;
        let mut total_value = 0.0;
        let mut total_cost = 0.0;

        for holding in holdings {
            count += 1;
            total_value += holding.market_value();
            total_cost += holding.total_cost();
        }

        let total_profit_loss = total_value - total_cost;

        PortfolioSummary {
            count,
            total_value,
            total_cost,
            total_profit_loss,
            profit_loss_percent: percent_of(total_profit_loss, total_cost),
        }
    }

    fn allocation_by<F>(&self, holdings: &[Holding], label: F) -> Vec<AllocationSlice>
    where
        F: Fn(&Holding) -> String,
    {
        // Insertion order is kept so equal values stay in first-seen order.
        let mut order: Vec<String> = Vec::new();
        let mut values: HashMap<String, f64> = HashMap::new();

        for holding in holdings {
            let key = label(holding);
            if !values.contains_key(&key) {
                order.push(key.clone());
            }
            *values.entry(key).or_insert(0.0) += holding.market_value();
        }

        let total: f64 = values.values().sum();
        let mut slices: Vec<AllocationSlice> = order
            .into_iter()
            .map(|label| {
                let value = values.get(&label).copied().unwrap_or(0.0);
                AllocationSlice {
                    percent: percent_of(value, total),
                    label,
                    value,
                }
            })
            .collect();

        slices.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
        slices
    }

    /// Market value per sector, largest first. Blank sectors are grouped under
    /// [`UNCATEGORIZED`].
    pub fn allocation_by_sector(&self, holdings: &[Holding]) -> Vec<AllocationSlice> {
        self.allocation_by(holdings, |h| {
            let sector = h.sector.trim();
            if sector.is_empty() {
                UNCATEGORIZED.to_string()
            } else {
                sector.to_string()
            }
        })
    }

    /// Market value per holding role, largest first.
    pub fn allocation_by_role(&self, holdings: &[Holding]) -> Vec<AllocationSlice> {
        self.allocation_by(holdings, |h| h.role.to_string())
    }

    /// Actual weight vs. target weight for every holding that has a target.
    pub fn target_drift(&self, holdings: &[Holding]) -> Vec<TargetDrift> {
        let total = self.aggregate(holdings).total_value;

        holdings
            .iter()
            .filter_map(|h| {
                let target = h.target_percentage?;
                let actual = percent_of(h.market_value(), total);
                Some(TargetDrift {
                    symbol: h.symbol.clone(),
                    actual_percent: actual,
                    target_percent: target,
                    drift: actual - target,
                })
            })
            .collect()
    }

    /// Totals over certificates that are still active on `today`.
    pub fn summarize_certificates(
        &self,
        certificates: &[Certificate],
        today: NaiveDate,
    ) -> CertificateSummary {
        let mut summary = CertificateSummary::default();

        for cert in certificates
            .iter()
            .filter(|c| c.effective_status(today) == CertificateStatus::Active)
        {
            summary.active_count += 1;
            summary.total_principal += cert.principal;
            summary.annual_interest += cert.annual_interest();
        }

        summary.monthly_income = summary.annual_interest / 12.0;
        summary
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
