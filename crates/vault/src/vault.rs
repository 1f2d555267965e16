use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::{CredentialRecord, CredentialStore, CryptoError, EncryptionProvider, StoreError};

#[derive(Debug, Error)]
pub enum VaultError {
    /// No credential stored for this (user, marketplace). Callers treat
    /// this as "not connected", distinct from a credential that exists but
    /// cannot be used.
    #[error("no credential stored for marketplace {marketplace_id}")]
    NotFound { marketplace_id: String },

    /// A record exists but could not be decrypted.
    #[error("stored credential for marketplace {marketplace_id} is unusable")]
    Decryption { marketplace_id: String },

    #[error("credential encryption failed")]
    Encryption(#[source] CryptoError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Decrypted secret, scoped to one connector call.
///
/// The plaintext is wiped when the lease drops, on every exit path
/// including panics, so it never outlives the dispatch that needed it.
pub struct SecretLease {
    plaintext: String,
}

impl SecretLease {
    pub fn expose(&self) -> &str {
        &self.plaintext
    }
}

impl Drop for SecretLease {
    fn drop(&mut self) {
        // Best-effort in-place wipe before the buffer is freed.
        let zeros = "\0".repeat(self.plaintext.len());
        self.plaintext.replace_range(.., &zeros);
    }
}

impl fmt::Debug for SecretLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretLease(<redacted>)")
    }
}

/// Encrypts, stores, and leases per-user per-marketplace credentials.
///
/// Plaintext exists only inside a [`SecretLease`]; records and logs carry
/// ciphertext and ids only.
pub struct CredentialVault {
    store: Arc<dyn CredentialStore>,
    crypto: Arc<dyn EncryptionProvider>,
}

impl CredentialVault {
    pub fn new(store: Arc<dyn CredentialStore>, crypto: Arc<dyn EncryptionProvider>) -> Self {
        Self { store, crypto }
    }

    /// Encrypt and persist a secret. Idempotent under retry: re-storing the
    /// same (user, marketplace) overwrites the previous record.
    pub async fn store(
        &self,
        user_id: &str,
        marketplace_id: &str,
        secret: &str,
    ) -> Result<(), VaultError> {
        let encrypted_secret = self
            .crypto
            .encrypt(secret.as_bytes())
            .map_err(VaultError::Encryption)?;

        self.store
            .put(CredentialRecord {
                user_id: user_id.to_string(),
                marketplace_id: marketplace_id.to_string(),
                encrypted_secret,
                created_at: Utc::now(),
            })
            .await?;

        debug!(marketplace = %marketplace_id, "credential stored");
        Ok(())
    }

    /// Decrypt the stored secret into a scoped lease.
    ///
    /// `NotFound` means absent; `Decryption` means present but unusable.
    /// Callers decide which of the two downgrades and which fails.
    pub async fn fetch(
        &self,
        user_id: &str,
        marketplace_id: &str,
    ) -> Result<SecretLease, VaultError> {
        let record = self
            .store
            .get(user_id, marketplace_id)
            .await?
            .ok_or_else(|| VaultError::NotFound {
                marketplace_id: marketplace_id.to_string(),
            })?;

        let plaintext_bytes =
            self.crypto
                .decrypt(&record.encrypted_secret)
                .map_err(|_| VaultError::Decryption {
                    marketplace_id: marketplace_id.to_string(),
                })?;

        let plaintext =
            String::from_utf8(plaintext_bytes).map_err(|_| VaultError::Decryption {
                marketplace_id: marketplace_id.to_string(),
            })?;

        Ok(SecretLease { plaintext })
    }

    pub async fn remove(&self, user_id: &str, marketplace_id: &str) -> Result<(), VaultError> {
        self.store.delete(user_id, marketplace_id).await?;
        Ok(())
    }
}
