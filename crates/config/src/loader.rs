use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{env_subst::substitute_env, schema::PasskeepConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "passkeep.toml",
    "passkeep.yaml",
    "passkeep.yml",
    "passkeep.json",
];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<PasskeepConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations, then apply
/// `PASSKEEP_*` environment overrides.
///
/// Search order:
/// 1. `./passkeep.{toml,yaml,yml,json}` (project-local)
/// 2. `<config_dir>/passkeep.{toml,yaml,yml,json}`, where `config_dir` is
///    `override_dir` if given, else `~/.config/passkeep/`
///
/// Returns `PasskeepConfig::default()` if no config file is found or the
/// file fails to parse.
pub fn discover_and_load(override_dir: Option<&Path>) -> PasskeepConfig {
    let mut config = if let Some(path) = find_config_file(override_dir) {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
                PasskeepConfig::default()
            },
        }
    } else {
        debug!("no config file found, using defaults");
        PasskeepConfig::default()
    };
    apply_env_overrides(&mut config);
    config
}

/// Find the first config file in standard locations.
fn find_config_file(override_dir: Option<&Path>) -> Option<PathBuf> {
    // Project-local
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    let dir = override_dir.map(Path::to_path_buf).or_else(config_dir)?;
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/passkeep/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "passkeep").map(|d| d.config_dir().to_path_buf())
}

/// Returns the path of an existing config file, or the default TOML path.
pub fn find_or_default_config_path(override_dir: Option<&Path>) -> PathBuf {
    if let Some(path) = find_config_file(override_dir) {
        return path;
    }
    override_dir
        .map(Path::to_path_buf)
        .or_else(config_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("passkeep.toml")
}

/// Serialize `config` to TOML and write it to `path`.
///
/// Creates parent directories if needed.
pub fn save_config(config: &PasskeepConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("serialize config: {e}"))?;
    std::fs::write(path, toml_str)?;
    debug!(path = %path.display(), "saved config");
    Ok(())
}

/// Apply `PASSKEEP_*` environment variable overrides.
///
/// Recognized: `PASSKEEP_KDF`, `PASSKEEP_KEY_NAMESPACE`,
/// `PASSKEEP_HASH_M_COST`, `PASSKEEP_HASH_T_COST`, `PASSKEEP_HASH_P_COST`,
/// `PASSKEEP_REQUIRE_STRONG`. Unparseable values are ignored with a warning.
pub fn apply_env_overrides(config: &mut PasskeepConfig) {
    apply_env_overrides_with(config, |name| std::env::var(name).ok());
}

fn apply_env_overrides_with(
    config: &mut PasskeepConfig,
    lookup: impl Fn(&str) -> Option<String>,
) {
    fn parsed<T: std::str::FromStr>(name: &str, value: Option<String>) -> Option<T> {
        let value = value?;
        match value.trim().parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(var = name, value = %value, "ignoring invalid env override");
                None
            },
        }
    }

    if let Some(kdf) = parsed("PASSKEEP_KDF", lookup("PASSKEEP_KDF")) {
        config.keys.kdf = kdf;
    }
    if let Some(ns) = lookup("PASSKEEP_KEY_NAMESPACE") {
        config.keys.namespace = ns;
    }
    if let Some(v) = parsed("PASSKEEP_HASH_M_COST", lookup("PASSKEEP_HASH_M_COST")) {
        config.hashing.m_cost = v;
    }
    if let Some(v) = parsed("PASSKEEP_HASH_T_COST", lookup("PASSKEEP_HASH_T_COST")) {
        config.hashing.t_cost = v;
    }
    if let Some(v) = parsed("PASSKEEP_HASH_P_COST", lookup("PASSKEEP_HASH_P_COST")) {
        config.hashing.p_cost = v;
    }
    if let Some(v) = parsed("PASSKEEP_REQUIRE_STRONG", lookup("PASSKEEP_REQUIRE_STRONG")) {
        config.policy.require_strong = v;
    }
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<PasskeepConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}
