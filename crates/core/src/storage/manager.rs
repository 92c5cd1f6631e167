use crate::errors::CoreError;
use crate::models::portfolio::Portfolio;

use super::encryption::{self, KdfParams};
use super::format;

/// Save/load a portfolio to/from encrypted bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Portfolio → bincode → AES-256-GCM(Argon2id(password)) → EGXP bytes
    pub fn save_to_bytes(portfolio: &Portfolio, password: &str) -> Result<Vec<u8>, CoreError> {
        Self::save_with_params(portfolio, password, KdfParams::default())
    }

    /// Same as [`save_to_bytes`](Self::save_to_bytes) with explicit KDF cost.
    pub fn save_with_params(
        portfolio: &Portfolio,
        password: &str,
        kdf_params: KdfParams,
    ) -> Result<Vec<u8>, CoreError> {
        let plaintext = bincode::serialize(portfolio)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))?;
        let sealed = encryption::seal(&plaintext, password, kdf_params)?;
        Ok(format::encode(&sealed))
    }

    /// EGXP bytes → header → Argon2id → AES-256-GCM → bincode → Portfolio
    pub fn load_from_bytes(data: &[u8], password: &str) -> Result<Portfolio, CoreError> {
        let sealed = format::decode(data)?;
        let plaintext = encryption::open(&sealed, password)?;
        bincode::deserialize(&plaintext)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize portfolio: {e}")))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(portfolio: &Portfolio, path: &str, password: &str) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(portfolio, password)?;
        std::fs::write(path, bytes)?;
        log::info!(
            "Saved {} holdings, {} watchlist items, {} certificates to {path}",
            portfolio.holdings.len(),
            portfolio.watchlist.len(),
            portfolio.certificates.len()
        );
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<Portfolio, CoreError> {
        let bytes = std::fs::read(path)?;
        let portfolio = Self::load_from_bytes(&bytes, password)?;
        log::info!("Loaded portfolio from {path}");
        Ok(portfolio)
    }
}
