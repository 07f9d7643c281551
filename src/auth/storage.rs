//! Credential persistence: file-based (primary) + OS keychain (secondary)
//!
//! The credential record (access token + user identity) is stored as one
//! obfuscated file in the platform data directory, with the OS keychain as a
//! best-effort secondary copy. File storage is primary because it behaves the
//! same everywhere; the keychain copy is never required for correctness.
//! Token and user live in a single record, so a save can never expose a
//! token/user mismatch to readers.

use super::types::{AuthError, CredentialRecord};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use keyring::Entry;
use log::{debug, error, info, warn};
use std::path::PathBuf;

const SERVICE_NAME: &str = "ShelterHub";
const CREDENTIALS_KEY: &str = "credentials";
const CREDENTIALS_FILE: &str = "credentials.dat";

// Light obfuscation only - keeps the token out of casual file browsing.
// Confidentiality is the job of transport security and OS storage sandboxing.
const OBFUSCATION_KEY: &[u8] = b"ShelterHubCredentialStore";

/// Durable store for the credential record
pub struct CredentialStore {
    keyring_entry: Option<Entry>,
    data_dir: PathBuf,
}

impl CredentialStore {
    /// Create a store rooted at the platform data directory
    pub fn new() -> Result<Self, AuthError> {
        let data_dir = dirs::data_local_dir()
            .map(|d| d.join(SERVICE_NAME))
            .ok_or_else(|| AuthError::Storage("Could not determine data directory".to_string()))?;

        std::fs::create_dir_all(&data_dir)
            .map_err(|e| AuthError::Storage(format!("Failed to create data directory: {}", e)))?;

        // Keychain is optional - fall back to file-only when unavailable
        let keyring_entry = match Entry::new(SERVICE_NAME, CREDENTIALS_KEY) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Keychain not available ({}). Using file storage only.", e);
                None
            }
        };

        debug!("CredentialStore initialized at {}", data_dir.display());

        Ok(Self {
            keyring_entry,
            data_dir,
        })
    }

    /// Create a file-only store rooted at an explicit directory
    pub fn with_data_dir(data_dir: PathBuf) -> Result<Self, AuthError> {
        std::fs::create_dir_all(&data_dir)
            .map_err(|e| AuthError::Storage(format!("Failed to create data directory: {}", e)))?;

        Ok(Self {
            keyring_entry: None,
            data_dir,
        })
    }

    fn credentials_path(&self) -> PathBuf {
        self.data_dir.join(CREDENTIALS_FILE)
    }

    /// Simple XOR obfuscation (symmetric: applying it twice restores the input)
    fn obfuscate(data: &[u8]) -> Vec<u8> {
        data.iter()
            .enumerate()
            .map(|(i, &byte)| byte ^ OBFUSCATION_KEY[i % OBFUSCATION_KEY.len()])
            .collect()
    }

    fn save_to_file(&self, record: &CredentialRecord) -> Result<(), AuthError> {
        let path = self.credentials_path();

        let json = serde_json::to_string(record)
            .map_err(|e| AuthError::Storage(format!("Failed to serialize credentials: {}", e)))?;

        let encoded = BASE64.encode(Self::obfuscate(json.as_bytes()));

        std::fs::write(&path, &encoded).map_err(|e| {
            error!("Failed to write credentials file: {}", e);
            AuthError::Storage(format!("Failed to write credentials file: {}", e))
        })?;

        debug!(
            "Credentials stored for {} (token length: {} chars)",
            record.user.email,
            record.access_token.len()
        );
        Ok(())
    }

    fn load_from_file(&self) -> Result<Option<CredentialRecord>, AuthError> {
        let path = self.credentials_path();

        if !path.exists() {
            debug!("No credentials file (first run or logged out)");
            return Ok(None);
        }

        let encoded = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to read credentials file: {}", e);
                return Ok(None);
            }
        };

        // A file we cannot decode is useless - remove it and report absent
        let obfuscated = match BASE64.decode(encoded.trim()) {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to decode credentials file (base64): {}", e);
                let _ = std::fs::remove_file(&path);
                return Ok(None);
            }
        };

        let json = match String::from_utf8(Self::obfuscate(&obfuscated)) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to decode credentials file (utf8): {}", e);
                let _ = std::fs::remove_file(&path);
                return Ok(None);
            }
        };

        match serde_json::from_str::<CredentialRecord>(&json) {
            Ok(record) => {
                debug!("Loaded credentials for {}", record.user.email);
                Ok(Some(record))
            }
            Err(e) => {
                error!("Failed to deserialize credentials: {}", e);
                let _ = std::fs::remove_file(&path);
                Ok(None)
            }
        }
    }

    fn clear_from_file(&self) -> Result<(), AuthError> {
        let path = self.credentials_path();
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                AuthError::Storage(format!("Failed to delete credentials file: {}", e))
            })?;
            debug!("Cleared credentials file");
        }
        Ok(())
    }

    fn save_to_keyring(&self, record: &CredentialRecord) {
        let Some(entry) = &self.keyring_entry else {
            return;
        };

        let json = match serde_json::to_string(record) {
            Ok(j) => j,
            Err(e) => {
                warn!("Failed to serialize credentials for keychain: {}", e);
                return;
            }
        };

        if let Err(e) = entry.set_password(&json) {
            warn!("Failed to store in keychain (file storage still works): {}", e);
        }
    }

    fn load_from_keyring(&self) -> Option<CredentialRecord> {
        let entry = self.keyring_entry.as_ref()?;

        match entry.get_password() {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Failed to deserialize keychain credentials: {}", e);
                    None
                }
            },
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!("Keychain read error: {:?}", e);
                None
            }
        }
    }

    fn clear_from_keyring(&self) {
        if let Some(entry) = &self.keyring_entry {
            match entry.delete_credential() {
                Ok(_) => debug!("Cleared keychain credentials"),
                Err(keyring::Error::NoEntry) => {}
                Err(e) => warn!("Failed to clear keychain credentials: {}", e),
            }
        }
    }

    /// Persist the credential record (to the file, plus the keychain when
    /// available). Overwrites any previous record in one write.
    pub fn save(&self, record: &CredentialRecord) -> Result<(), AuthError> {
        self.save_to_file(record)?;
        self.save_to_keyring(record);
        Ok(())
    }

    /// Load the credential record, preferring the file and falling back to
    /// the keychain (migrating back to the file on a keychain hit).
    pub fn load(&self) -> Result<Option<CredentialRecord>, AuthError> {
        if let Some(record) = self.load_from_file()? {
            return Ok(Some(record));
        }

        if let Some(record) = self.load_from_keyring() {
            info!("Credentials recovered from keychain, migrating to file storage");
            let _ = self.save_to_file(&record);
            return Ok(Some(record));
        }

        Ok(None)
    }

    /// Remove the credential record from both storage locations
    pub fn clear(&self) -> Result<(), AuthError> {
        let result = self.clear_from_file();
        self.clear_from_keyring();
        if let Err(e) = &result {
            error!("Failed to clear credentials file: {}", e);
        }
        result
    }
}
