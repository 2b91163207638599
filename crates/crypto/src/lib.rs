//! Credential cryptography for the passkeep vault.
//!
//! Login passwords are hashed with Argon2id, stored secrets are sealed with
//! XChaCha20-Poly1305 under a key derived per call from a caller-supplied
//! secret, and the "suggest a password" feature draws characters from the OS
//! RNG. Nothing here touches storage or the network; keys are passed
//! explicitly and never cached.

pub mod cipher;
pub mod error;
pub mod generator;
pub mod hasher;
pub mod kdf;
pub mod policy;
pub mod random;
pub mod strength;
pub mod traits;
pub mod xchacha20;

pub use {
    cipher::{SymmetricCipher, decrypt, encrypt},
    error::CryptoError,
    generator::{CharClass, CharClasses, GeneratedPassword, PasswordGenerator, generate},
    hasher::{CredentialHasher, HashParams, hash_password, verify_password},
    kdf::{DEFAULT_KEY_NAMESPACE, KdfParams, SymmetricKey, derive_key, derive_user_key},
    policy::{PasswordPolicy, PolicyViolation, validate_password},
    random::{OsRandom, RandomSource},
    strength::{StrengthReport, Tier, score},
    traits::Cipher,
    xchacha20::XChaCha20Poly1305Cipher,
};
