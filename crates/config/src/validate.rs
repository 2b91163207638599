//! Semantic checks on a loaded configuration.

use crate::schema::{KeyDerivation, PasskeepConfig};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dotted path, e.g. "generator.min_length"
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.path, self.message)
    }
}

/// Result of validating a configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    fn push(&mut self, severity: Severity, path: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity,
            path: path.to_string(),
            message: message.into(),
        });
    }
}

/// Argon2 requires at least 8 KiB per lane.
const ARGON2_MIN_M_COST_PER_LANE: u32 = 8;

/// Largest lane count Argon2 accepts.
const ARGON2_MAX_P_COST: u32 = 0xFF_FFFF;

/// Smallest memory cost Argon2 accepts for `p_cost` lanes.
fn min_m_cost(p_cost: u32) -> u32 {
    ARGON2_MIN_M_COST_PER_LANE.saturating_mul(p_cost.max(1))
}

/// Check value ranges and flag weak settings.
pub fn validate(config: &PasskeepConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    let h = &config.hashing;
    check_argon2(&mut result, "hashing", h.m_cost, h.t_cost, h.p_cost);
    if h.m_cost < 19 * 1024 && h.m_cost >= min_m_cost(h.p_cost) {
        result.push(
            Severity::Warning,
            "hashing.m_cost",
            format!("{} KiB is below the recommended 19456 KiB", h.m_cost),
        );
    }

    let k = &config.keys;
    if k.kdf == KeyDerivation::Sha256 {
        result.push(
            Severity::Warning,
            "keys.kdf",
            "sha256 keys are derived from the user id alone; use argon2id with a passphrase",
        );
        if k.namespace.is_empty() {
            result.push(
                Severity::Warning,
                "keys.namespace",
                "empty namespace: keys depend only on the numeric user id",
            );
        }
    } else {
        let a = &k.argon2;
        check_argon2(&mut result, "keys.argon2", a.m_cost, a.t_cost, a.p_cost);
    }

    let g = &config.generator;
    if g.min_length == 0 {
        result.push(Severity::Error, "generator.min_length", "must be at least 1");
    }
    if g.min_length > g.max_length {
        result.push(
            Severity::Error,
            "generator.max_length",
            format!("{} is below min_length {}", g.max_length, g.min_length),
        );
    }
    if g.default_length < g.min_length || g.default_length > g.max_length {
        result.push(
            Severity::Error,
            "generator.default_length",
            format!(
                "{} is outside [{}, {}]",
                g.default_length, g.min_length, g.max_length
            ),
        );
    }

    if config.policy.min_length == 0 {
        result.push(Severity::Warning, "policy.min_length", "0 accepts empty passwords");
    }

    result
}

fn check_argon2(
    result: &mut ValidationResult,
    section: &str,
    m_cost: u32,
    t_cost: u32,
    p_cost: u32,
) {
    if t_cost == 0 {
        result.push(Severity::Error, &format!("{section}.t_cost"), "must be at least 1");
    }
    if p_cost == 0 {
        result.push(Severity::Error, &format!("{section}.p_cost"), "must be at least 1");
    }
    if p_cost > ARGON2_MAX_P_COST {
        result.push(
            Severity::Error,
            &format!("{section}.p_cost"),
            format!("must be at most {ARGON2_MAX_P_COST}"),
        );
    }
    let min_m = min_m_cost(p_cost);
    if m_cost < min_m {
        result.push(
            Severity::Error,
            &format!("{section}.m_cost"),
            format!("must be at least {min_m} KiB"),
        );
    }
}
