use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("encryption failed: {0}")]
    Encrypt(String),

    #[error("decryption failed: {0}")]
    Decrypt(String),
}

/// External encryption collaborator.
///
/// The algorithm is out of scope for this core; deployments plug in a KMS-
/// or libsodium-backed provider. The vault only requires round-tripping.
pub trait EncryptionProvider: Send + Sync {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError>;
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// Keyed byte-rotation cipher for tests. Not encryption; do not deploy.
pub struct MockCipher {
    key: u8,
    reject_decrypt: bool,
}

impl MockCipher {
    pub fn new(key: u8) -> Self {
        Self {
            key,
            reject_decrypt: false,
        }
    }

    /// Provider whose decrypt always fails, to simulate a credential that
    /// is present but no longer usable (rotated master key, corrupt blob).
    pub fn rejecting(key: u8) -> Self {
        Self {
            key,
            reject_decrypt: true,
        }
    }
}

impl EncryptionProvider for MockCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(plaintext
            .iter()
            .map(|b| b.wrapping_add(self.key))
            .collect())
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if self.reject_decrypt {
            return Err(CryptoError::Decrypt("mock cipher set to reject".to_string()));
        }
        Ok(ciphertext
            .iter()
            .map(|b| b.wrapping_sub(self.key))
            .collect())
    }
}
