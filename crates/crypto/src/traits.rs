//! Cipher trait for swappable authenticated encryption backends.

use crate::error::CryptoError;

/// Authenticated encryption with associated data over raw bytes.
///
/// The blob layout is `[nonce || ciphertext || tag]`; implementations draw a
/// fresh nonce on every [`encrypt`](Self::encrypt) call.
pub trait Cipher: Send + Sync {
    /// Nonce length in bytes.
    fn nonce_len(&self) -> usize;

    /// Authentication tag length in bytes.
    fn tag_len(&self) -> usize;

    /// Shortest blob [`decrypt`](Self::decrypt) can accept (empty plaintext).
    fn min_blob_len(&self) -> usize {
        self.nonce_len() + self.tag_len()
    }

    /// Encrypt `plaintext` with `key` and `aad` (additional authenticated data).
    fn encrypt(&self, key: &[u8; 32], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Decrypt a blob previously produced by [`encrypt`](Self::encrypt).
    ///
    /// Fails with [`CryptoError::TruncatedInput`] when the blob cannot hold a
    /// nonce and tag, and with [`CryptoError::Authentication`] when the tag
    /// does not verify. No plaintext is returned on failure.
    fn decrypt(&self, key: &[u8; 32], blob: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError>;
}
