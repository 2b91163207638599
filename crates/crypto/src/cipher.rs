//! Text-encoded authenticated encryption of stored secrets.
//!
//! Ciphertexts are standard base64 (with padding) of the raw cipher blob, so
//! they fit in a single text column and survive process restarts unchanged.

use base64::Engine;

use crate::{
    error::CryptoError, kdf::SymmetricKey, traits::Cipher, xchacha20::XChaCha20Poly1305Cipher,
};

/// Encrypts and decrypts secrets to and from printable ciphertext.
///
/// Generic over [`Cipher`] but defaults to [`XChaCha20Poly1305Cipher`].
/// Holds no key: every call takes the key explicitly.
#[derive(Debug, Clone, Default)]
pub struct SymmetricCipher<C: Cipher = XChaCha20Poly1305Cipher> {
    cipher: C,
}

impl SymmetricCipher<XChaCha20Poly1305Cipher> {
    /// Create a cipher with the default XChaCha20-Poly1305 backend.
    pub fn new() -> Self {
        Self::with_cipher(XChaCha20Poly1305Cipher::new())
    }
}

impl<C: Cipher> SymmetricCipher<C> {
    /// Create a cipher with a custom backend.
    pub fn with_cipher(cipher: C) -> Self {
        Self { cipher }
    }

    /// Encrypt `plaintext` under `key`, returning base64 text.
    pub fn encrypt(&self, plaintext: &[u8], key: &SymmetricKey) -> Result<String, CryptoError> {
        let blob = self.cipher.encrypt(key.as_bytes(), plaintext, b"")?;

        #[cfg(feature = "tracing")]
        tracing::debug!(plaintext_len = plaintext.len(), "encrypted secret");

        Ok(base64::engine::general_purpose::STANDARD.encode(blob))
    }

    /// Decrypt base64 text produced by [`encrypt`](Self::encrypt).
    ///
    /// The text must be exact base64; surrounding whitespace is a decoding
    /// error. Wrong key and tampered data both report
    /// [`CryptoError::Authentication`].
    pub fn decrypt(&self, ciphertext: &str, key: &SymmetricKey) -> Result<Vec<u8>, CryptoError> {
        let blob = base64::engine::general_purpose::STANDARD.decode(ciphertext)?;

        let result = self.cipher.decrypt(key.as_bytes(), &blob, b"");

        #[cfg(feature = "tracing")]
        if let Err(ref e) = result {
            tracing::debug!(blob_len = blob.len(), error = %e, "failed to decrypt secret");
        }

        result
    }

    /// Decrypt to a UTF-8 string.
    pub fn decrypt_string(
        &self,
        ciphertext: &str,
        key: &SymmetricKey,
    ) -> Result<String, CryptoError> {
        Ok(String::from_utf8(self.decrypt(ciphertext, key)?)?)
    }
}

/// Encrypt with the default cipher.
pub fn encrypt(plaintext: &[u8], key: &SymmetricKey) -> Result<String, CryptoError> {
    SymmetricCipher::new().encrypt(plaintext, key)
}

/// Decrypt with the default cipher.
pub fn decrypt(ciphertext: &str, key: &SymmetricKey) -> Result<Vec<u8>, CryptoError> {
    SymmetricCipher::new().decrypt(ciphertext, key)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::derive_key;

    #[test]
    fn round_trip() {
        let key = derive_key("test-password");
        let plaintext = "This is a secret message";

        let ciphertext = encrypt(plaintext.as_bytes(), &key).unwrap();
        assert!(!ciphertext.is_empty());
        assert_ne!(ciphertext, plaintext);

        let decrypted = SymmetricCipher::new()
            .decrypt_string(&ciphertext, &key)
            .unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn wrong_key_is_authentication_failure() {
        let ciphertext = encrypt(b"secret", &derive_key("password1")).unwrap();
        let result = decrypt(&ciphertext, &derive_key("password2"));
        assert!(matches!(result, Err(CryptoError::Authentication)));
    }

    #[test]
    fn invalid_base64_is_decoding_failure() {
        let result = decrypt("invalid-base64!", &derive_key("test-password"));
        assert!(matches!(result, Err(CryptoError::Decoding(_))));
    }

    #[test]
    fn short_payload_is_truncated() {
        // "test" in base64: four bytes, far below nonce + tag.
        let result = decrypt("dGVzdA==", &derive_key("test-password"));
        assert!(matches!(
            result,
            Err(CryptoError::TruncatedInput { len: 4, min: 40 })
        ));
    }

    #[test]
    fn ciphertext_is_printable_ascii() {
        let ciphertext = encrypt(&[0u8, 1, 2, 255, 0], &derive_key("k")).unwrap();
        assert!(ciphertext.bytes().all(|b| b.is_ascii_graphic()));
    }

    #[test]
    fn surrounding_whitespace_is_decoding_failure() {
        let key = derive_key("k");
        let ciphertext = encrypt(b"value", &key).unwrap();
        for padded in [format!("{ciphertext}\n"), format!(" {ciphertext}")] {
            let result = decrypt(&padded, &key);
            assert!(matches!(result, Err(CryptoError::Decoding(_))));
        }
        assert_eq!(decrypt(&ciphertext, &key).unwrap(), b"value");
    }

    #[test]
    fn non_utf8_plaintext_rejected_by_decrypt_string() {
        let key = derive_key("k");
        let ciphertext = encrypt(&[0xff, 0xfe], &key).unwrap();
        let result = SymmetricCipher::new().decrypt_string(&ciphertext, &key);
        assert!(matches!(result, Err(CryptoError::InvalidUtf8(_))));
    }
}
