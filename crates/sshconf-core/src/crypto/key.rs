//! Field-cipher key derivation using Argon2id.
//!
//! The key is derived from the master password alone: the salt is a fixed
//! application constant, so the same password always yields the same key and
//! nothing besides the password digest has to be stored.

use argon2::Argon2;
use zeroize::ZeroizeOnDrop;

use crate::error::{Result, SshconfError};

/// Argon2id cost parameters.
///
/// - Memory: 19 MiB
/// - Iterations: 2
/// - Parallelism: 1
const ARGON2_MEMORY_KB: u32 = 19 * 1024;
const ARGON2_ITERATIONS: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;

/// Fixed salt for field-cipher keys. Changing it makes existing ciphertext unreadable.
const FIELD_KEY_SALT: &[u8] = b"sshconf/field-cipher/v1";

/// Length of derived key in bytes (256-bit ChaCha20 key).
pub const KEY_LENGTH: usize = 32;

/// Key material derived from the master password.
///
/// Zeroized on drop and redacted in `Debug` output.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Get a reference to the raw key bytes.
    ///
    /// Avoid storing or logging this value.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive the field-cipher key for `password`.
///
/// # Errors
///
/// Returns `SshconfError::InvalidInput` for an empty password and
/// `SshconfError::Crypto` if Argon2 rejects its parameters.
pub fn derive_key(password: &str) -> Result<DerivedKey> {
    if password.is_empty() {
        return Err(SshconfError::InvalidInput(
            "Master password cannot be empty".to_string(),
        ));
    }

    let params = argon2::Params::new(
        ARGON2_MEMORY_KB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        Some(KEY_LENGTH),
    )
    .map_err(|e| SshconfError::Crypto(format!("Failed to create Argon2 params: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut key = [0u8; KEY_LENGTH];
    argon2
        .hash_password_into(password.as_bytes(), FIELD_KEY_SALT, &mut key)
        .map_err(|e| SshconfError::Crypto(format!("Key derivation failed: {}", e)))?;

    tracing::debug!("derived field cipher key");
    Ok(DerivedKey { key })
}
