pub mod analytics_service;
pub mod certificate_service;
pub mod filter_service;
pub mod holding_service;
pub mod price_service;
pub mod valuation_service;
pub mod watchlist_service;
