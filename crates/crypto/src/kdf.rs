//! Key derivation: secret string → 256-bit symmetric key.
//!
//! [`derive_key`] is the deterministic SHA-256 mapping the vault has always
//! used, so existing ciphertexts stay readable. Its input is usually a
//! namespaced user id ([`user_key_input`]), which anyone knowing the id can
//! recompute; [`derive_passphrase_key`] is the salted Argon2id alternative for
//! deployments that can supply a real passphrase.

use {
    argon2::Argon2,
    base64::Engine,
    sha2::{Digest, Sha256},
    zeroize::Zeroizing,
};

use crate::{error::CryptoError, random::RandomSource};

/// Key length in bytes.
pub const KEY_LEN: usize = 32;

/// Prefix prepended to a numeric user id to form the key-derivation input.
pub const DEFAULT_KEY_NAMESPACE: &str = "user-master-key-";

/// Salt length for [`derive_passphrase_key`].
pub const SALT_LEN: usize = 16;

/// A 256-bit symmetric key, zeroed on drop.
#[derive(Clone)]
pub struct SymmetricKey(Zeroizing<[u8; KEY_LEN]>);

impl SymmetricKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

impl PartialEq for SymmetricKey {
    fn eq(&self, other: &Self) -> bool {
        // Constant-time: fold every byte difference before deciding.
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl Eq for SymmetricKey {}

/// Derive a key from `secret` with a single SHA-256 pass.
///
/// Deterministic and infallible: the same secret always yields the same key,
/// which is what lets a stored ciphertext be reopened later from the secret
/// alone. Provides no brute-force resistance for guessable inputs.
pub fn derive_key(secret: &str) -> SymmetricKey {
    let digest = Sha256::digest(secret.as_bytes());
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key.copy_from_slice(&digest);

    #[cfg(feature = "tracing")]
    tracing::trace!(input_len = secret.len(), "derived symmetric key");

    SymmetricKey(key)
}

/// Build the key-derivation input for a user: `{namespace}{user_id}`.
pub fn user_key_input(namespace: &str, user_id: u64) -> String {
    format!("{namespace}{user_id}")
}

/// Derive the per-user key from a namespaced user id.
pub fn derive_user_key(namespace: &str, user_id: u64) -> SymmetricKey {
    derive_key(&user_key_input(namespace, user_id))
}

/// Argon2id parameters for [`derive_passphrase_key`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 64 MiB = 65536).
    pub m_cost: u32,
    /// Number of iterations (default: 3).
    pub t_cost: u32,
    /// Degree of parallelism (default: 1).
    pub p_cost: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            m_cost: 65536, // 64 MiB
            t_cost: 3,
            p_cost: 1,
        }
    }
}

/// Derive a 256-bit key from a passphrase and salt using Argon2id.
pub fn derive_passphrase_key(
    passphrase: &[u8],
    salt: &[u8],
    params: &KdfParams,
) -> Result<SymmetricKey, CryptoError> {
    let argon2_params =
        argon2::Params::new(params.m_cost, params.t_cost, params.p_cost, Some(KEY_LEN))
            .map_err(|e| CryptoError::InvalidArgument(format!("invalid KDF params: {e}")))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2_params,
    );

    let mut output = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(passphrase, salt, output.as_mut())
        .map_err(|e| CryptoError::InvalidArgument(format!("KDF failed: {e}")))?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        m_cost = params.m_cost,
        t_cost = params.t_cost,
        "derived passphrase key"
    );

    Ok(SymmetricKey(output))
}

/// Generate a random 16-byte salt and return it as base64.
pub fn generate_salt(rng: &impl RandomSource) -> Result<String, CryptoError> {
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(salt))
}

/// Decode a base64-encoded salt.
pub fn decode_salt(b64: &str) -> Result<Vec<u8>, CryptoError> {
    Ok(base64::engine::general_purpose::STANDARD.decode(b64)?)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::OsRandom;

    fn cheap_params() -> KdfParams {
        KdfParams {
            m_cost: 256, // Low cost for tests
            t_cost: 1,
            p_cost: 1,
        }
    }

    #[test]
    fn derive_key_deterministic() {
        let key1 = derive_key("password1");
        let key2 = derive_key("password1");
        assert_eq!(key1, key2);
        assert_eq!(key1.as_bytes().len(), 32);
    }

    #[test]
    fn different_secrets_different_keys() {
        assert_ne!(derive_key("password1"), derive_key("password2"));
        assert_ne!(
            derive_user_key(DEFAULT_KEY_NAMESPACE, 1),
            derive_user_key(DEFAULT_KEY_NAMESPACE, 2)
        );
    }

    #[test]
    fn derive_key_matches_sha256() {
        // SHA-256("abc")
        let expected = [
            0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
            0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
            0xf2, 0x00, 0x15, 0xad,
        ];
        assert_eq!(derive_key("abc").as_bytes(), &expected);
    }

    #[test]
    fn empty_secret_still_derives() {
        assert_eq!(derive_key("").as_bytes().len(), KEY_LEN);
    }

    #[test]
    fn user_key_input_uses_namespace() {
        assert_eq!(user_key_input(DEFAULT_KEY_NAMESPACE, 42), "user-master-key-42");
        assert_eq!(
            derive_user_key(DEFAULT_KEY_NAMESPACE, 42),
            derive_key("user-master-key-42")
        );
    }

    #[test]
    fn debug_is_redacted() {
        let rendered = format!("{:?}", derive_key("secret"));
        assert_eq!(rendered, "SymmetricKey([REDACTED])");
    }

    #[test]
    fn passphrase_key_deterministic_for_same_salt() {
        let salt = b"test-salt-16byte";
        let key1 = derive_passphrase_key(b"passphrase", salt, &cheap_params()).unwrap();
        let key2 = derive_passphrase_key(b"passphrase", salt, &cheap_params()).unwrap();
        assert_eq!(key1, key2);
    }

    #[test]
    fn passphrase_key_depends_on_salt() {
        let key1 = derive_passphrase_key(b"passphrase", b"salt-aaaaaaaaaaaa", &cheap_params())
            .unwrap();
        let key2 = derive_passphrase_key(b"passphrase", b"salt-bbbbbbbbbbbb", &cheap_params())
            .unwrap();
        assert_ne!(key1, key2);
    }

    #[test]
    fn passphrase_key_rejects_bad_params() {
        let params = KdfParams {
            m_cost: 1,
            t_cost: 0,
            p_cost: 1,
        };
        let result = derive_passphrase_key(b"passphrase", b"test-salt-16byte", &params);
        assert!(matches!(result, Err(CryptoError::InvalidArgument(_))));
    }

    #[test]
    fn generate_and_decode_salt() {
        let b64 = generate_salt(&OsRandom).unwrap();
        let decoded = decode_salt(&b64).unwrap();
        assert_eq!(decoded.len(), SALT_LEN);
        assert_ne!(b64, generate_salt(&OsRandom).unwrap());
    }

    #[test]
    fn kdf_params_serialization() {
        let params = KdfParams::default();
        let json = serde_json::to_string(&params).unwrap();
        let parsed: KdfParams = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, params);
    }
}
