//! XChaCha20-Poly1305 implementation of the [`Cipher`] trait.

#[allow(deprecated)] // upstream generic-array 0.x deprecation
use chacha20poly1305::{
    XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit, Payload},
};

use crate::{
    error::CryptoError,
    random::{OsRandom, RandomSource},
    traits::Cipher,
};

/// Nonce size for XChaCha20-Poly1305 (24 bytes).
pub const NONCE_LEN: usize = 24;

/// Poly1305 tag size (16 bytes).
pub const TAG_LEN: usize = 16;

/// XChaCha20-Poly1305 AEAD cipher.
///
/// Encrypted blob layout: `[nonce: 24 bytes][ciphertext + Poly1305 tag: N + 16 bytes]`.
/// The 192-bit nonce is drawn from `R` on every call, so random nonces can be
/// used under one key without a practical collision risk.
#[derive(Debug, Clone, Default)]
pub struct XChaCha20Poly1305Cipher<R = OsRandom> {
    rng: R,
}

impl XChaCha20Poly1305Cipher<OsRandom> {
    pub fn new() -> Self {
        Self { rng: OsRandom }
    }
}

impl<R: RandomSource> XChaCha20Poly1305Cipher<R> {
    /// Use a custom nonce source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RandomSource> Cipher for XChaCha20Poly1305Cipher<R> {
    fn nonce_len(&self) -> usize {
        NONCE_LEN
    }

    fn tag_len(&self) -> usize {
        TAG_LEN
    }

    #[allow(deprecated)]
    fn encrypt(
        &self,
        key: &[u8; 32],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let cipher = XChaCha20Poly1305::new(key.into());

        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng.fill(&mut nonce_bytes)?;
        let nonce = XNonce::from_slice(&nonce_bytes);

        // Only fails for plaintexts beyond the cipher's length limit.
        let ciphertext = cipher
            .encrypt(nonce, Payload {
                msg: plaintext,
                aad,
            })
            .map_err(|_| CryptoError::InvalidArgument("plaintext too long".to_string()))?;

        let mut result = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        result.extend_from_slice(&nonce_bytes);
        result.extend_from_slice(&ciphertext);
        Ok(result)
    }

    #[allow(deprecated)]
    fn decrypt(&self, key: &[u8; 32], blob: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if blob.len() < NONCE_LEN + TAG_LEN {
            return Err(CryptoError::TruncatedInput {
                len: blob.len(),
                min: NONCE_LEN + TAG_LEN,
            });
        }

        let (nonce_bytes, ct) = blob.split_at(NONCE_LEN);
        let nonce = XNonce::from_slice(nonce_bytes);
        let cipher = XChaCha20Poly1305::new(key.into());

        cipher
            .decrypt(nonce, Payload { msg: ct, aad })
            .map_err(|_| CryptoError::Authentication)
    }
}
