use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a certificate pays out its interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentFrequency {
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
    /// Single payout together with the principal
    AtMaturity,
}

impl PaymentFrequency {
    /// Payouts per year; `None` for a single payout at maturity.
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            PaymentFrequency::Monthly => Some(12),
            PaymentFrequency::Quarterly => Some(4),
            PaymentFrequency::SemiAnnually => Some(2),
            PaymentFrequency::Annually => Some(1),
            PaymentFrequency::AtMaturity => None,
        }
    }
}

impl std::fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentFrequency::Monthly => write!(f, "Monthly"),
            PaymentFrequency::Quarterly => write!(f, "Quarterly"),
            PaymentFrequency::SemiAnnually => write!(f, "Semi-annually"),
            PaymentFrequency::Annually => write!(f, "Annually"),
            PaymentFrequency::AtMaturity => write!(f, "At maturity"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificateStatus {
    Active,
    Matured,
    /// Broken before maturity
    Redeemed,
}

impl std::fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CertificateStatus::Active => write!(f, "Active"),
            CertificateStatus::Matured => write!(f, "Matured"),
            CertificateStatus::Redeemed => write!(f, "Redeemed"),
        }
    }
}

/// A bank certificate of deposit paying simple interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: Uuid,

    pub bank_name: String,

    /// Amount deposited
    pub principal: f64,

    pub duration_years: u32,

    /// Annual interest rate, in percent
    pub interest_rate: f64,

    pub purchase_date: NaiveDate,

    pub payment_frequency: PaymentFrequency,

    pub status: CertificateStatus,

    #[serde(default)]
    pub notes: Option<String>,
}

impl Certificate {
    pub fn new(
        bank_name: impl Into<String>,
        principal: f64,
        duration_years: u32,
        interest_rate: f64,
        purchase_date: NaiveDate,
        payment_frequency: PaymentFrequency,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            bank_name: bank_name.into(),
            principal,
            duration_years,
            interest_rate,
            purchase_date,
            payment_frequency,
            status: CertificateStatus::Active,
            notes: None,
        }
    }

    /// Purchase date plus the duration. A Feb 29 purchase matures on Feb 28
    /// in non-leap years.
    pub fn maturity_date(&self) -> NaiveDate {
        self.purchase_date
            .checked_add_months(Months::new(self.duration_years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn annual_interest(&self) -> f64 {
        self.principal * self.interest_rate / 100.0
    }

    pub fn total_interest(&self) -> f64 {
        self.annual_interest() * self.duration_years as f64
    }

    /// Amount paid on each payout date.
    pub fn payment_per_period(&self) -> f64 {
        match self.payment_frequency.periods_per_year() {
            Some(periods) => self.annual_interest() / periods as f64,
            None => self.total_interest(),
        }
    }

    /// Stored status, except that an active certificate counts as matured
    /// from its maturity date onwards.
    pub fn effective_status(&self, today: NaiveDate) -> CertificateStatus {
        if self.status == CertificateStatus::Active && today >= self.maturity_date() {
            CertificateStatus::Matured
        } else {
            self.status
        }
    }
}
