//! Authenticated encryption for the `Password` column.
//!
//! Each value is sealed with ChaCha20-Poly1305 under a fresh random nonce and
//! stored as base64 of `nonce || ciphertext || tag`, which keeps it free of
//! tabs and newlines.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chacha20poly1305::aead::{Aead, AeadCore, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use rand::rngs::OsRng;

use super::key::{derive_key, DerivedKey};
use crate::error::{Result, SshconfError};

const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;

/// Cipher for the sensitive column, keyed from the master password.
#[derive(Debug, Clone)]
pub struct FieldCipher {
    key: DerivedKey,
}

impl FieldCipher {
    /// Derive the cipher key from an already validated master password.
    pub fn from_password(password: &str) -> Result<Self> {
        Ok(Self {
            key: derive_key(password)?,
        })
    }

    /// Encrypt a plaintext field value.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let cipher = ChaCha20Poly1305::new(Key::from_slice(self.key.as_bytes()));
        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let sealed = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| SshconfError::Crypto(format!("Encryption failed: {}", e)))?;

        let mut payload = Vec::with_capacity(NONCE_SIZE + sealed.len());
        payload.extend_from_slice(&nonce);
        payload.extend_from_slice(&sealed);
        Ok(STANDARD.encode(payload))
    }

    /// Decrypt a stored field value.
    ///
    /// An empty value decrypts to the empty string.
    ///
    /// # Errors
    ///
    /// Returns `SshconfError::Crypto` if the value is malformed, was sealed
    /// under a different key, or has been tampered with.
    pub fn decrypt(&self, ciphertext: &str) -> Result<String> {
        if ciphertext.is_empty() {
            return Ok(String::new());
        }

        let payload = STANDARD
            .decode(ciphertext.trim())
            .map_err(|e| SshconfError::Crypto(format!("Invalid ciphertext encoding: {}", e)))?;
        if payload.len() < NONCE_SIZE + TAG_SIZE {
            return Err(SshconfError::Crypto("Ciphertext is truncated".to_string()));
        }

        let (nonce, sealed) = payload.split_at(NONCE_SIZE);
        let cipher = ChaCha20Poly1305::new(Key::from_slice(self.key.as_bytes()));
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| {
                SshconfError::Crypto(
                    "Decryption failed (wrong master password or corrupted value)".to_string(),
                )
            })?;

        String::from_utf8(plaintext)
            .map_err(|e| SshconfError::Crypto(format!("Decrypted value is not UTF-8: {}", e)))
    }
}
