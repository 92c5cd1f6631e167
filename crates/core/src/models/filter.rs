use serde::{Deserialize, Serialize};

use super::holding::{HoldingRole, HoldingStatus};

/// Criteria a holding must meet to be listed. `None` / blank means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingFilter {
    pub role: Option<HoldingRole>,
    pub status: Option<HoldingStatus>,
    pub sector: Option<String>,
    /// Case-insensitive substring of the symbol or English name
    #[serde(default)]
    pub search: String,
}

impl HoldingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(mut self, role: HoldingRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn status(mut self, status: HoldingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.role.is_none()
            && self.status.is_none()
            && self.sector.is_none()
            && self.search.trim().is_empty()
    }
}

/// Ordering for holding listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldingSortOrder {
    /// Largest market value first (default for display)
    #[default]
    ValueDesc,
    ValueAsc,
    /// Best performer first
    ProfitLossPercentDesc,
    ProfitLossPercentAsc,
    /// Alphabetical by symbol
    SymbolAsc,
    /// Most recently updated first
    LastUpdatedDesc,
}
