//! Binary framing of the encrypted `.egxp` portfolio file.
//!
//! ```text
//! [EGXP: 4B] [version: 2B LE]
//! [memory_cost: 4B LE] [time_cost: 4B LE] [parallelism: 4B LE]
//! [salt: 16B] [nonce: 12B] [ciphertext_len: 8B LE] [ciphertext]
//! ```

use super::encryption::{KdfParams, SealedPayload, NONCE_LEN, SALT_LEN};
use crate::errors::CoreError;

pub const MAGIC: &[u8; 4] = b"EGXP";

pub const CURRENT_VERSION: u16 = 1;

/// Size of everything before the ciphertext.
pub const HEADER_SIZE: usize = 4 + 2 + 12 + SALT_LEN + NONCE_LEN + 8;

/// Serialize a sealed payload into file bytes.
pub fn encode(payload: &SealedPayload) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.ciphertext.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&CURRENT_VERSION.to_le_bytes());
    buf.extend_from_slice(&payload.kdf_params.memory_cost.to_le_bytes());
    buf.extend_from_slice(&payload.kdf_params.time_cost.to_le_bytes());
    buf.extend_from_slice(&payload.kdf_params.parallelism.to_le_bytes());
    buf.extend_from_slice(&payload.salt);
    buf.extend_from_slice(&payload.nonce);
    buf.extend_from_slice(&(payload.ciphertext.len() as u64).to_le_bytes());
    buf.extend_from_slice(&payload.ciphertext);
    buf
}

/// Parse file bytes back into a sealed payload. Bytes after the declared
/// ciphertext are ignored.
pub fn decode(data: &[u8]) -> Result<SealedPayload, CoreError> {
    if data.len() < HEADER_SIZE {
        return Err(CoreError::InvalidFileFormat(
            "File too small to be an EGXP file".into(),
        ));
    }

    let mut reader = Reader { data, pos: 0 };

    if reader.take::<4>()? != *MAGIC {
        return Err(CoreError::InvalidFileFormat(
            "Invalid magic bytes, not an EGXP file".into(),
        ));
    }

    let version = u16::from_le_bytes(reader.take()?);
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let kdf_params = KdfParams {
        memory_cost: u32::from_le_bytes(reader.take()?),
        time_cost: u32::from_le_bytes(reader.take()?),
        parallelism: u32::from_le_bytes(reader.take()?),
    };
    check_kdf_bounds(&kdf_params)?;

    let salt = reader.take::<SALT_LEN>()?;
    let nonce = reader.take::<NONCE_LEN>()?;
    let declared_len = u64::from_le_bytes(reader.take()?);

    let remaining = reader.remaining();
    if (remaining.len() as u64) < declared_len {
        return Err(CoreError::InvalidFileFormat(format!(
            "File truncated: expected {declared_len} bytes of ciphertext, got {}",
            remaining.len()
        )));
    }

    Ok(SealedPayload {
        kdf_params,
        salt,
        nonce,
        ciphertext: remaining[..declared_len as usize].to_vec(),
    })
}

/// Crafted headers must not be able to demand absurd Argon2 resources.
fn check_kdf_bounds(params: &KdfParams) -> Result<(), CoreError> {
    if !(8..=1_048_576).contains(&params.memory_cost) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF memory_cost out of range: {} KiB",
            params.memory_cost
        )));
    }
    if !(1..=20).contains(&params.time_cost) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF time_cost out of range: {}",
            params.time_cost
        )));
    }
    if !(1..=16).contains(&params.parallelism) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF parallelism out of range: {}",
            params.parallelism
        )));
    }
    Ok(())
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], CoreError> {
        let end = self.pos + N;
        let bytes: [u8; N] = self
            .data
            .get(self.pos..end)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| CoreError::InvalidFileFormat("Unexpected end of header".into()))?;
        self.pos = end;
        Ok(bytes)
    }

    fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}
