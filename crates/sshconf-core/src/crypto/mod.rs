//! Cryptographic operations for sshconf.
//!
//! - **gate**: master password digest and validation (SHA-256, hex)
//! - **key**: Argon2id derivation of the field-cipher key
//! - **cipher**: ChaCha20-Poly1305 sealing of the `Password` column
//!
//! ## Threat Model
//!
//! We defend against:
//! - Casual reading of the store file or its backups
//! - Editing an encrypted field without detection
//!
//! We do NOT defend against:
//! - Offline guessing of the master password (the digest is unsalted)
//! - Compromised OS / keylogger

pub mod cipher;
pub mod gate;
pub mod key;

pub use cipher::FieldCipher;
pub use gate::{hash_password, validate_new_password, PasswordGate};
pub use key::{derive_key, DerivedKey};
