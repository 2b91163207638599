//! Config schema types.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasskeepConfig {
    pub hashing: HashingConfig,
    pub keys: KeysConfig,
    pub generator: GeneratorConfig,
    pub policy: PolicyConfig,
}

/// Argon2id cost for login password hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    /// Memory cost in KiB.
    pub m_cost: u32,
    pub t_cost: u32,
    pub p_cost: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            m_cost: 19 * 1024,
            t_cost: 2,
            p_cost: 1,
        }
    }
}

/// How the per-user encryption key is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyDerivation {
    /// SHA-256 of `{namespace}{user_id}`. Reproducible by anyone who knows the id.
    #[default]
    Sha256,
    /// Argon2id over a passphrase with a per-user random salt.
    Argon2id,
}

impl std::fmt::Display for KeyDerivation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sha256 => write!(f, "sha256"),
            Self::Argon2id => write!(f, "argon2id"),
        }
    }
}

impl std::str::FromStr for KeyDerivation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" => Ok(Self::Sha256),
            "argon2id" => Ok(Self::Argon2id),
            other => Err(format!("unknown key derivation '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub kdf: KeyDerivation,
    /// Prefix joined with the user id to form the derivation input.
    pub namespace: String,
    /// Only used when `kdf = "argon2id"`.
    pub argon2: PassphraseKdfConfig,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            kdf: KeyDerivation::default(),
            namespace: "user-master-key-".into(),
            argon2: PassphraseKdfConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassphraseKdfConfig {
    pub m_cost: u32,
    pub t_cost: u32,
    pub p_cost: u32,
}

impl Default for PassphraseKdfConfig {
    fn default() -> Self {
        Self {
            m_cost: 65536, // 64 MiB
            t_cost: 3,
            p_cost: 1,
        }
    }
}

/// Password suggestion defaults and the accepted length range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub default_length: u32,
    pub min_length: u32,
    pub max_length: u32,
    pub lower: bool,
    pub upper: bool,
    pub digit: bool,
    pub symbol: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_length: 12,
            min_length: 4,
            max_length: 128,
            lower: true,
            upper: true,
            digit: true,
            symbol: false,
        }
    }
}

impl GeneratorConfig {
    /// Requested length, or the default, clamped to `[min_length, max_length]`.
    pub fn resolve_length(&self, requested: Option<u32>) -> u32 {
        let length = requested.unwrap_or(self.default_length);
        length.clamp(self.min_length, self.max_length.max(self.min_length))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub min_length: usize,
    pub require_strong: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_strong: false,
        }
    }
}
