//! Login password hashing with Argon2id.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`)
//! that carry their own salt and cost parameters, so verification needs
//! nothing but the stored string.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};

use crate::{
    error::CryptoError,
    random::{OsRandom, RandomSource},
};

/// Salt length drawn per hash.
const SALT_LEN: usize = 16;

/// Argon2id cost parameters for new hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HashParams {
    /// Memory cost in KiB (default: 19 MiB).
    pub m_cost: u32,
    /// Number of iterations (default: 2).
    pub t_cost: u32,
    /// Degree of parallelism (default: 1).
    pub p_cost: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            m_cost: Params::DEFAULT_M_COST,
            t_cost: Params::DEFAULT_T_COST,
            p_cost: Params::DEFAULT_P_COST,
        }
    }
}

/// Hashes and verifies login passwords.
///
/// Hashing is deliberately slow; callers on a latency-sensitive path should
/// run it on a blocking thread.
pub struct CredentialHasher<R = OsRandom> {
    argon2: Argon2<'static>,
    rng: R,
}

impl CredentialHasher<OsRandom> {
    /// Create a hasher with the given cost parameters.
    pub fn new(params: HashParams) -> Result<Self, CryptoError> {
        Self::with_rng(params, OsRandom)
    }
}

impl Default for CredentialHasher<OsRandom> {
    fn default() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
            rng: OsRandom,
        }
    }
}

impl<R: RandomSource> CredentialHasher<R> {
    /// Create a hasher drawing salts from `rng`.
    pub fn with_rng(params: HashParams, rng: R) -> Result<Self, CryptoError> {
        let argon2_params = Params::new(params.m_cost, params.t_cost, params.p_cost, None)
            .map_err(|e| CryptoError::InvalidArgument(format!("invalid hash params: {e}")))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params),
            rng,
        })
    }

    /// Hash `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, CryptoError> {
        let mut salt_bytes = [0u8; SALT_LEN];
        self.rng
            .fill(&mut salt_bytes)
            .map_err(|e| CryptoError::Hashing(e.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| CryptoError::Hashing(format!("failed to encode salt: {e}")))?;

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CryptoError::Hashing(format!("failed to hash password: {e}")))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            m_cost = self.argon2.params().m_cost(),
            t_cost = self.argon2.params().t_cost(),
            "hashed password"
        );

        Ok(hash.to_string())
    }

    /// Check `password` against a stored hash.
    ///
    /// Malformed hashes verify as `false`. The parameters embedded in the hash
    /// are used, not this hasher's, so older hashes keep verifying after a
    /// cost change.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            #[cfg(feature = "tracing")]
            tracing::debug!("stored password hash is malformed");
            return false;
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Hash with the default parameters.
pub fn hash_password(password: &str) -> Result<String, CryptoError> {
    CredentialHasher::default().hash(password)
}

/// Verify against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    CredentialHasher::default().verify(password, hash)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> CredentialHasher {
        CredentialHasher::new(HashParams {
            m_cost: 256,
            t_cost: 1,
            p_cost: 1,
        })
        .unwrap()
    }

    #[test]
    fn hash_verify() {
        let hash = hash_password("testpassword123").unwrap();
        assert!(!hash.is_empty());
        assert_ne!(hash, "testpassword123");
        assert!(verify_password("testpassword123", &hash));
        assert!(!verify_password("wrongpassword", &hash));
    }

    #[test]
    fn hash_is_phc_argon2id() {
        let hash = cheap_hasher().hash("pw").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=256,t=1,p=1$"));
    }

    #[test]
    fn same_password_hashes_differ() {
        let hasher = cheap_hasher();
        let h1 = hasher.hash("same").unwrap();
        let h2 = hasher.hash("same").unwrap();
        assert_ne!(h1, h2);
        assert!(hasher.verify("same", &h1));
        assert!(hasher.verify("same", &h2));
    }

    #[test]
    fn verify_uses_embedded_params() {
        let hash = cheap_hasher().hash("portable").unwrap();
        assert!(CredentialHasher::default().verify("portable", &hash));
    }

    #[test]
    fn empty_password_round_trip() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("").unwrap();
        assert!(hasher.verify("", &hash));
        assert!(!hasher.verify(" ", &hash));
    }

    #[test]
    fn malformed_hash_is_false() {
        let hasher = cheap_hasher();
        assert!(!hasher.verify("pw", ""));
        assert!(!hasher.verify("pw", "not-a-hash"));
        assert!(!hasher.verify("pw", "$argon2id$v=19$m=256,t=1,p=1$!!!$???"));
    }

    #[test]
    fn invalid_params_rejected() {
        let result = CredentialHasher::new(HashParams {
            m_cost: 1,
            t_cost: 0,
            p_cost: 0,
        });
        assert!(matches!(result, Err(CryptoError::InvalidArgument(_))));
    }

    #[test]
    fn randomness_failure_is_hashing_error() {
        struct Broken;
        impl RandomSource for Broken {
            fn fill(&self, _: &mut [u8]) -> Result<(), CryptoError> {
                Err(CryptoError::Randomness("unavailable".into()))
            }
        }

        let hasher = CredentialHasher::with_rng(HashParams::default(), Broken).unwrap();
        assert!(matches!(hasher.hash("pw"), Err(CryptoError::Hashing(_))));
    }
}
