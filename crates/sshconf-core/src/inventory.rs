//! Host inventory operations.
//!
//! An [`Inventory`] ties the record store, the master password gate and the
//! field cipher together. Every mutating operation requires the inventory to
//! be unlocked first; listing works either way and hides passwords while
//! locked.

use std::fs;
use std::path::{Path, PathBuf};

use crate::crypto::{validate_new_password, FieldCipher, PasswordGate};
use crate::error::{Result, SshconfError};
use crate::paths::StorePaths;
use crate::render;
use crate::storage::{filter_records, Column, Record, RecordStore, TsvStore};

/// Shown in place of a password while the inventory is locked.
pub const LOCKED_PLACEHOLDER: &str = "[master password required]";

/// Shown in place of a password that does not decrypt under the current key.
pub const UNREADABLE_PLACEHOLDER: &str = "[unreadable]";

#[derive(Debug)]
pub struct Inventory {
    paths: StorePaths,
    store: TsvStore,
    gate: PasswordGate,
    cipher: Option<FieldCipher>,
}

impl Inventory {
    /// Open an inventory over `paths`. No file is touched until an
    /// operation needs it.
    pub fn open(paths: StorePaths) -> Self {
        let store = TsvStore::new(&paths.store);
        let gate = PasswordGate::new(&paths.password_file);
        Self {
            paths,
            store,
            gate,
            cipher: None,
        }
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    pub fn gate(&self) -> &PasswordGate {
        &self.gate
    }

    pub fn is_unlocked(&self) -> bool {
        self.cipher.is_some()
    }

    /// Validate the master password and derive the field cipher.
    pub fn unlock(&mut self, password: &str) -> Result<()> {
        self.gate.validate(password)?;
        self.cipher = Some(FieldCipher::from_password(password)?);
        tracing::debug!("inventory unlocked");
        Ok(())
    }

    fn cipher(&self) -> Result<&FieldCipher> {
        self.cipher.as_ref().ok_or(SshconfError::Locked)
    }

    /// Records as stored, with the `Password` column still sealed.
    pub fn records(&self) -> Result<Vec<Record>> {
        self.store.load()
    }

    /// Records matching `keyword` (all when `None`), ready for display.
    ///
    /// Passwords are decrypted when unlocked and replaced by
    /// [`LOCKED_PLACEHOLDER`] otherwise. Empty passwords stay empty.
    pub fn list(&self, keyword: Option<&str>) -> Result<Vec<Record>> {
        let records = self.store.load()?;
        let selected: Vec<Record> = match keyword {
            Some(keyword) => filter_records(&records, keyword)
                .into_iter()
                .cloned()
                .collect(),
            None => records,
        };

        Ok(selected
            .into_iter()
            .map(|mut record| {
                record.password = self.reveal(&record);
                record
            })
            .collect())
    }

    fn reveal(&self, record: &Record) -> String {
        if record.password.is_empty() {
            return String::new();
        }
        match &self.cipher {
            None => LOCKED_PLACEHOLDER.to_string(),
            Some(cipher) => match cipher.decrypt(&record.password) {
                Ok(plaintext) => plaintext,
                Err(e) => {
                    tracing::warn!(host = %record.host, error = %e, "password does not decrypt");
                    UNREADABLE_PLACEHOLDER.to_string()
                }
            },
        }
    }

    /// Append a host. `record.password` is plaintext and gets sealed here.
    pub fn add(&self, record: Record) -> Result<()> {
        let cipher = self.cipher()?;
        if record.host.trim().is_empty() {
            return Err(SshconfError::InvalidInput("Host cannot be empty".to_string()));
        }
        record.validate()?;

        let mut record = record;
        record.password = seal(cipher, &record.password)?;

        let mut records = self.store.load()?;
        tracing::info!(host = %record.host, "adding host");
        records.push(record);
        self.store.persist(&records)?;
        Ok(())
    }

    /// Remove the single host whose `Host` equals `key`.
    ///
    /// # Errors
    ///
    /// - `SshconfError::NotFound` if nothing matches
    /// - `SshconfError::Ambiguous` if several hosts match; nothing is removed
    pub fn remove(&self, key: &str) -> Result<Record> {
        self.cipher()?;
        let mut records = self.store.load()?;
        let matches: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.host == key)
            .map(|(index, _)| index)
            .collect();

        match matches.as_slice() {
            [] => Err(SshconfError::NotFound(key.to_string())),
            [index] => {
                let removed = records.remove(*index);
                self.store.persist(&records)?;
                tracing::info!(host = %removed.host, "removed host");
                Ok(removed)
            }
            _ => Err(SshconfError::Ambiguous {
                key: key.to_string(),
                hosts: matches.iter().map(|&i| records[i].host.clone()).collect(),
            }),
        }
    }

    /// Set `column` to `value` on every host whose `Host` equals `key`.
    ///
    /// Returns the number of hosts changed. A `Password` value is sealed
    /// before it is stored.
    pub fn update(&self, key: &str, column: Column, value: &str) -> Result<usize> {
        let cipher = self.cipher()?;
        let stored = match column {
            Column::Password => seal(cipher, value)?,
            _ => value.to_string(),
        };

        let mut records = self.store.load()?;
        let mut changed = 0;
        for record in records.iter_mut().filter(|record| record.host == key) {
            record.set(column, stored.clone());
            record.validate()?;
            changed += 1;
        }
        if changed == 0 {
            return Err(SshconfError::NotFound(key.to_string()));
        }

        self.store.persist(&records)?;
        tracing::info!(host = key, column = %column, count = changed, "updated hosts");
        Ok(changed)
    }

    /// Change the master password and re-seal every stored password.
    ///
    /// Returns the number of passwords re-sealed. The store is rewritten
    /// before the digest is swapped. If the digest write then fails, the old
    /// password still unlocks but the stored passwords are sealed under the
    /// new key and read as unreadable; restore the timestamped backup taken
    /// by that persist to recover them.
    pub fn rotate_password(&mut self, new: &str, old: &str) -> Result<usize> {
        self.gate.validate(old)?;
        validate_new_password(new)?;

        let old_cipher = FieldCipher::from_password(old)?;
        let new_cipher = FieldCipher::from_password(new)?;

        let mut records = self.store.load()?;
        let mut resealed = 0;
        for record in records.iter_mut().filter(|r| !r.password.is_empty()) {
            let plaintext = old_cipher.decrypt(&record.password).map_err(|e| {
                SshconfError::Crypto(format!("Cannot re-seal password of {}: {}", record.host, e))
            })?;
            record.password = new_cipher.encrypt(&plaintext)?;
            resealed += 1;
        }

        if !records.is_empty() {
            self.store.persist(&records)?;
        }
        self.gate.set_password(new, old)?;
        self.cipher = Some(new_cipher);
        Ok(resealed)
    }

    /// Set the first master password and seal any plaintext passwords
    /// already in the store.
    ///
    /// Returns the number of passwords sealed. Leaves the inventory unlocked.
    pub fn initialize_password(&mut self, new: &str) -> Result<usize> {
        if self.gate.is_initialized()? {
            return Err(SshconfError::AlreadyInitialized);
        }
        validate_new_password(new)?;

        let cipher = FieldCipher::from_password(new)?;
        let mut records = self.store.load()?;
        let mut sealed = 0;
        for record in records.iter_mut().filter(|r| !r.password.is_empty()) {
            record.password = cipher.encrypt(&record.password)?;
            sealed += 1;
        }

        if !records.is_empty() {
            self.store.persist(&records)?;
        }
        self.gate.initialize(new)?;
        self.cipher = Some(cipher);
        Ok(sealed)
    }

    /// Render the SSH client configuration for the current store.
    pub fn render_ssh_config(&self) -> Result<String> {
        Ok(render::render_ssh_config(&self.store.load()?))
    }

    /// Render and write the SSH client configuration.
    pub fn write_ssh_config(&self) -> Result<PathBuf> {
        self.cipher()?;
        let rendered = self.render_ssh_config()?;
        let target = &self.paths.ssh_config;
        write_private(target, &rendered)?;
        tracing::info!(path = %target.display(), "wrote ssh config");
        Ok(target.clone())
    }

    pub fn backups(&self) -> Result<Vec<PathBuf>> {
        self.store.backups()
    }

    pub fn clean_backups(&self) -> Result<usize> {
        self.store.clean_backups()
    }
}

fn seal(cipher: &FieldCipher, plaintext: &str) -> Result<String> {
    if plaintext.is_empty() {
        return Ok(String::new());
    }
    cipher.encrypt(plaintext)
}

fn write_private(path: &Path, contents: &str) -> Result<()> {
    crate::fs::ensure_parent_dir(path)?;
    fs::write(path, contents)?;
    crate::fs::set_private_permissions(path)?;
    Ok(())
}
