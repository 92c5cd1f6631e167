pub mod analysis;
pub mod certificate;
pub mod filter;
pub mod holding;
pub mod portfolio;
pub mod settings;
pub mod summary;
pub mod watchlist;
