//! Crypto error types.

/// Errors produced by the credential cryptography core.
///
/// Messages never carry plaintext or key material.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// A caller-supplied argument is out of range (e.g. a zero password length).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Ciphertext text is not valid base64.
    #[error("base64 decode error: {0}")]
    Decoding(#[from] base64::DecodeError),

    /// Decoded ciphertext cannot hold a nonce and an authentication tag.
    #[error("ciphertext too short: {len} bytes, need at least {min}")]
    TruncatedInput { len: usize, min: usize },

    /// Tag verification failed: wrong key or tampered data.
    #[error("authentication failed")]
    Authentication,

    /// Password hashing failed.
    #[error("hashing failed: {0}")]
    Hashing(String),

    /// The OS random number generator failed.
    #[error("randomness unavailable: {0}")]
    Randomness(String),

    /// Decrypted bytes are not UTF-8.
    #[error("plaintext is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
