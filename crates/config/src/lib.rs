//! Configuration loading, validation, and env substitution.
//!
//! Config files: `passkeep.toml`, `passkeep.yaml`, or `passkeep.json`
//! Searched in `./` then `~/.config/passkeep/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    loader::{
        apply_env_overrides, config_dir, discover_and_load, find_or_default_config_path,
        load_config, save_config,
    },
    schema::{
        GeneratorConfig, HashingConfig, KeyDerivation, KeysConfig, PasskeepConfig,
        PassphraseKdfConfig, PolicyConfig,
    },
    validate::{Diagnostic, Severity, ValidationResult, validate},
};
