pub mod encrypt;
pub mod store;
pub mod vault;

pub use encrypt::{CryptoError, EncryptionProvider, MockCipher};
pub use store::{CredentialRecord, CredentialStore, InMemoryCredentialStore, StoreError};
pub use vault::{CredentialVault, SecretLease, VaultError};
