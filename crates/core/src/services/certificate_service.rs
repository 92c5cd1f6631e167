use chrono::NaiveDate;
use log::debug;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::certificate::{Certificate, CertificateStatus};
use crate::models::portfolio::Portfolio;

/// Manages bank certificates of deposit.
pub struct CertificateService;

impl CertificateService {
    pub fn new() -> Self {
        Self
    }

    pub fn add_certificate(&self, portfolio: &mut Portfolio, cert: Certificate) -> Result<(), CoreError> {
        Self::validate(&cert)?;
        if portfolio.certificates.iter().any(|c| c.id == cert.id) {
            return Err(CoreError::ValidationError(format!(
                "Certificate id {} is already in use",
                cert.id
            )));
        }
        debug!("Adding {} certificate of {}", cert.bank_name, cert.principal);
        portfolio.certificates.push(cert);
        Ok(())
    }

    pub fn update_certificate(&self, portfolio: &mut Portfolio, updated: Certificate) -> Result<(), CoreError> {
        let idx = Self::index_of(portfolio, updated.id)?;
        Self::validate(&updated)?;
        portfolio.certificates[idx] = updated;
        Ok(())
    }

    pub fn remove_certificate(&self, portfolio: &mut Portfolio, id: Uuid) -> Result<Certificate, CoreError> {
        let idx = Self::index_of(portfolio, id)?;
        Ok(portfolio.certificates.remove(idx))
    }

    /// Store `Matured` on every active certificate whose maturity date has
    /// been reached. Returns how many changed.
    pub fn mark_matured(&self, portfolio: &mut Portfolio, today: NaiveDate) -> usize {
        let mut changed = 0;
        for cert in &mut portfolio.certificates {
            if cert.status == CertificateStatus::Active
                && cert.effective_status(today) == CertificateStatus::Matured
            {
                cert.status = CertificateStatus::Matured;
                changed += 1;
            }
        }
        if changed > 0 {
            debug!("{changed} certificate(s) matured as of {today}");
        }
        changed
    }

    fn index_of(portfolio: &Portfolio, id: Uuid) -> Result<usize, CoreError> {
        portfolio
            .certificates
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CoreError::CertificateNotFound(id.to_string()))
    }

    pub fn validate(cert: &Certificate) -> Result<(), CoreError> {
        if cert.bank_name.trim().is_empty() {
            return Err(CoreError::ValidationError("Bank name must not be empty".into()));
        }
        if !(cert.principal.is_finite() && cert.principal > 0.0) {
            return Err(CoreError::ValidationError(format!(
                "Principal must be positive, got {}",
                cert.principal
            )));
        }
        if cert.duration_years == 0 {
            return Err(CoreError::ValidationError(
                "Duration must be at least one year".into(),
            ));
        }
        if !(cert.interest_rate.is_finite() && cert.interest_rate >= 0.0) {
            return Err(CoreError::ValidationError(format!(
                "Interest rate must be a non-negative number, got {}",
                cert.interest_rate
            )));
        }
        Ok(())
    }
}

impl Default for CertificateService {
    fn default() -> Self {
        Self::new()
    }
}
