use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The part a position plays in the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoldingRole {
    /// Long-term anchor position
    Core,
    /// Held mainly for dividends
    Income,
    /// Held for earnings growth
    Growth,
    /// Short/medium-term trade
    Swing,
    /// Small, high-risk bet
    Speculative,
}

impl HoldingRole {
    pub const ALL: [HoldingRole; 5] = [
        HoldingRole::Core,
        HoldingRole::Income,
        HoldingRole::Growth,
        HoldingRole::Swing,
        HoldingRole::Speculative,
    ];
}

impl std::fmt::Display for HoldingRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoldingRole::Core => write!(f, "Core"),
            HoldingRole::Income => write!(f, "Income"),
            HoldingRole::Growth => write!(f, "Growth"),
            HoldingRole::Swing => write!(f, "Swing"),
            HoldingRole::Speculative => write!(f, "Speculative"),
        }
    }
}

/// What the owner currently intends to do with a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoldingStatus {
    Hold,
    Add,
    Reduce,
    Exit,
    Review,
    Watch,
}

impl HoldingStatus {
    pub const ALL: [HoldingStatus; 6] = [
        HoldingStatus::Hold,
        HoldingStatus::Add,
        HoldingStatus::Reduce,
        HoldingStatus::Exit,
        HoldingStatus::Review,
        HoldingStatus::Watch,
    ];
}

impl std::fmt::Display for HoldingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoldingStatus::Hold => write!(f, "Hold"),
            HoldingStatus::Add => write!(f, "Add"),
            HoldingStatus::Reduce => write!(f, "Reduce"),
            HoldingStatus::Exit => write!(f, "Exit"),
            HoldingStatus::Review => write!(f, "Review"),
            HoldingStatus::Watch => write!(f, "Watch"),
        }
    }
}

/// A position in a single EGX-listed stock.
///
/// Market value and profit/loss are derived on demand and never stored, so
/// a price update is the only thing needed to refresh every figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Unique identifier
    pub id: Uuid,

    /// Ticker symbol, uppercased (e.g., "COMI", "EAST")
    pub symbol: String,

    /// English display name (e.g., "Commercial International Bank")
    pub name_en: String,

    /// Arabic display name
    #[serde(default)]
    pub name_ar: String,

    /// Number of shares held
    pub shares: u64,

    /// Average cost per share in the display currency
    pub average_cost: f64,

    /// Latest known market price per share
    pub current_price: f64,

    /// Desired share of total portfolio value, 0–100
    #[serde(default)]
    pub target_percentage: Option<f64>,

    /// Manual fair value estimate; wins over the EPS-derived value
    #[serde(default)]
    pub fair_value: Option<f64>,

    /// Earnings per share (trailing)
    #[serde(default)]
    pub eps: Option<f64>,

    /// Expected annual earnings growth, in percent
    #[serde(default)]
    pub growth_rate: Option<f64>,

    pub role: HoldingRole,

    pub status: HoldingStatus,

    /// Free-text sector (e.g., "Banks", "Real Estate")
    #[serde(default)]
    pub sector: String,

    #[serde(default)]
    pub notes: Option<String>,

    /// When the record (usually the price) was last changed
    pub last_updated: DateTime<Utc>,
}

impl Holding {
    pub fn new(
        symbol: impl Into<String>,
        name_en: impl Into<String>,
        shares: u64,
        average_cost: f64,
        current_price: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into().trim().to_uppercase(),
            name_en: name_en.into(),
            name_ar: String::new(),
            shares,
            average_cost,
            current_price,
            target_percentage: None,
            fair_value: None,
            eps: None,
            growth_rate: None,
            role: HoldingRole::Core,
            status: HoldingStatus::Hold,
            sector: String::new(),
            notes: None,
            last_updated: Utc::now(),
        }
    }

    pub fn with_role(mut self, role: HoldingRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_status(mut self, status: HoldingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = sector.into();
        self
    }

    /// Attach fundamentals used by the Graham valuation.
    pub fn with_fundamentals(mut self, eps: Option<f64>, growth_rate: Option<f64>) -> Self {
        self.eps = eps;
        self.growth_rate = growth_rate;
        self
    }

    pub fn with_fair_value(mut self, fair_value: f64) -> Self {
        self.fair_value = Some(fair_value);
        self
    }

    pub fn with_target_percentage(mut self, target: f64) -> Self {
        self.target_percentage = Some(target);
        self
    }

    /// shares × current price
    pub fn market_value(&self) -> f64 {
        self.shares as f64 * self.current_price
    }

    /// shares × average cost
    pub fn total_cost(&self) -> f64 {
        self.shares as f64 * self.average_cost
    }

    pub fn profit_loss(&self) -> f64 {
        self.market_value() - self.total_cost()
    }

    /// Profit/loss relative to cost, in percent. Zero when nothing was paid.
    pub fn profit_loss_percent(&self) -> f64 {
        let cost = self.total_cost();
        if cost > 0.0 {
            self.profit_loss() / cost * 100.0
        } else {
            0.0
        }
    }
}
