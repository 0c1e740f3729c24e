use std::fmt;
use std::sync::{Mutex, PoisonError};

use console_logging::{console_info, console_warn};

use crate::persist::{KeyValueStore, PersistError};

/// Durable key the credential lives under.
pub const CREDENTIAL_KEY: &str = "basic_auth_raw";

/// Opaque authorization token. Never inspected, only attached.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn authorization_value(&self) -> String {
        format!("Basic {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Single process-wide credential, mirrored to durable storage.
#[derive(Debug)]
pub struct CredentialStore {
    durable: KeyValueStore,
    current: Mutex<Option<Credential>>,
}

impl CredentialStore {
    /// Loads whatever credential survived the last run. An unreadable file
    /// counts as no credential.
    pub fn open(durable: KeyValueStore) -> Self {
        let current = match durable.read(CREDENTIAL_KEY) {
            Ok(Some(raw)) if !raw.trim().is_empty() => Some(Credential::new(raw.trim())),
            Ok(_) => None,
            Err(err) => {
                console_warn!("Failed to read stored credential: {}", err);
                None
            }
        };
        Self {
            durable,
            current: Mutex::new(current),
        }
    }

    pub fn get(&self) -> Option<Credential> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stores the credential in memory first, so a failed disk write still
    /// leaves this session authenticated.
    pub fn set(&self, credential: Credential) -> Result<(), PersistError> {
        let raw = credential.as_str().to_string();
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(credential);
        self.durable.write(CREDENTIAL_KEY, &raw)
    }

    pub fn clear(&self) -> Result<(), PersistError> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = None;
        self.durable.remove(CREDENTIAL_KEY)?;
        console_info!("Cleared stored credential");
        Ok(())
    }
}
