use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::errors::CoreError;

pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;

/// Argon2id parameters. Written into every file header so older files
/// stay readable if the defaults change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub memory_cost: u32,
    /// Iterations
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_cost: 65_536,
            time_cost: 3,
            parallelism: 4,
        }
    }
}

/// Ciphertext plus the random inputs needed to open it again.
#[derive(Debug, Clone)]
pub struct SealedPayload {
    pub kdf_params: KdfParams,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    /// AES-256-GCM output, authentication tag included
    pub ciphertext: Vec<u8>,
}

/// Derive a 256-bit key from a password using Argon2id.
pub fn derive_key(
    password: &str,
    salt: &[u8; SALT_LEN],
    params: &KdfParams,
) -> Result<[u8; 32], CoreError> {
    let argon2_params = Params::new(params.memory_cost, params.time_cost, params.parallelism, Some(32))
        .map_err(|e| CoreError::Encryption(format!("Invalid Argon2 params: {e}")))?;

    let mut key = [0u8; 32];
    Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params)
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| CoreError::Encryption(format!("Argon2 key derivation failed: {e}")))?;

    Ok(key)
}

fn cipher(key: &[u8; 32]) -> Result<Aes256Gcm, CoreError> {
    Aes256Gcm::new_from_slice(key)
        .map_err(|e| CoreError::Encryption(format!("Failed to create cipher: {e}")))
}

fn random_bytes<const N: usize>() -> Result<[u8; N], CoreError> {
    let mut buf = [0u8; N];
    getrandom::getrandom(&mut buf)
        .map_err(|e| CoreError::Encryption(format!("Failed to gather randomness: {e}")))?;
    Ok(buf)
}

/// Encrypt `plaintext` under a key derived from `password`, with a fresh
/// salt and nonce.
pub fn seal(plaintext: &[u8], password: &str, kdf_params: KdfParams) -> Result<SealedPayload, CoreError> {
    let salt = random_bytes::<SALT_LEN>()?;
    let nonce = random_bytes::<NONCE_LEN>()?;
    let key = derive_key(password, &salt, &kdf_params)?;

    let ciphertext = cipher(&key)?
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| CoreError::Encryption(format!("Encryption failed: {e}")))?;

    Ok(SealedPayload {
        kdf_params,
        salt,
        nonce,
        ciphertext,
    })
}

/// Decrypt a sealed payload. A wrong password and tampered bytes both
/// surface as `CoreError::Decryption`.
pub fn open(payload: &SealedPayload, password: &str) -> Result<Vec<u8>, CoreError> {
    let key = derive_key(password, &payload.salt, &payload.kdf_params)?;
    let plaintext = cipher(&key)?.decrypt(Nonce::from_slice(&payload.nonce), payload.ciphertext.as_slice())?;
    Ok(plaintext)
}
