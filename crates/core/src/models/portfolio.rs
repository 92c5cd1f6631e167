use serde::{Deserialize, Serialize};

use super::certificate::Certificate;
use super::holding::Holding;
use super::settings::Settings;
use super::watchlist::WatchlistItem;

/// The main data container. Everything in here gets serialized,
/// encrypted, and saved to the portable .egxp file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Stock positions
    pub holdings: Vec<Holding>,

    /// Followed stocks
    #[serde(default)]
    pub watchlist: Vec<WatchlistItem>,

    /// Bank certificates of deposit
    #[serde(default)]
    pub certificates: Vec<Certificate>,

    #[serde(default)]
    pub settings: Settings,
}
