use thiserror::Error;

/// Unified error type for the egx-portfolio-core library.
///
/// The valuation, aggregation and filter/sort functions never fail; every
/// other public operation returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage / File ──────────────────────────────────────────────
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(u16),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed: wrong password or corrupted file")]
    Decryption,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Quotes ──────────────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api { provider: String, message: String },

    #[error("No quote provider registered")]
    NoProvider,

    #[error("Price not available for {0}")]
    PriceNotAvailable(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Symbol already exists: {0}")]
    DuplicateSymbol(String),

    #[error("Holding not found: {0}")]
    HoldingNotFound(String),

    #[error("Watchlist item not found: {0}")]
    WatchlistItemNotFound(String),

    #[error("Certificate not found: {0}")]
    CertificateNotFound(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<bincode::Error> for CoreError {
    fn from(e: bincode::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<aes_gcm::Error> for CoreError {
    fn from(_: aes_gcm::Error) -> Self {
        CoreError::Decryption
    }
}
