use serde::{Deserialize, Serialize};

/// Growth rate (percent) assumed when a holding has EPS but no growth figure.
pub const DEFAULT_GROWTH_RATE: f64 = 5.0;

/// User-configurable settings, stored inside the portfolio file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency all prices are entered and displayed in (e.g., "EGP").
    pub currency: String,

    /// Appended to EGX symbols when asking quote providers (Cairo: ".CA").
    pub quote_suffix: String,

    /// Growth rate used by the Graham formula when a holding has none.
    pub default_growth_rate: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "EGP".to_string(),
            quote_suffix: ".CA".to_string(),
            default_growth_rate: DEFAULT_GROWTH_RATE,
        }
    }
}
